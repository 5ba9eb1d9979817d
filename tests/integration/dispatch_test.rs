//! Integration tests for routing descriptor operations to backends.

use std::sync::Arc;

use bytes::Bytes;

use bucketry::ErrorKind;
use bucketry::config::AppConfig;
use bucketry::storage::{BackendResolver, BucketDeclaration, BucketRegistry, IncomingFile};
use bucketry::types::ObjectId;

use crate::helpers::MemoryBackend;

const CONFIG: &str = r#"
[backends]
default_backend = "local"

[[backends.bindings]]
bucket = "shop.Media"
backend = "cdn"

[logging]
level = "debug"
"#;

struct Setup {
    registry: BucketRegistry,
    resolver: BackendResolver,
    local: Arc<MemoryBackend>,
    cdn: Arc<MemoryBackend>,
}

async fn setup() -> Setup {
    let config = AppConfig::from_toml_str(CONFIG).unwrap();

    let registry = BucketRegistry::new();
    let media = registry
        .register(BucketDeclaration::new("shop", "Media").abstract_bucket())
        .unwrap();
    registry
        .register(
            BucketDeclaration::new("shop", "ProductImages")
                .with_id("77777777-7777-7777-7777-777777777777")
                .extends(&media),
        )
        .unwrap();
    registry
        .register(
            BucketDeclaration::new("shop", "Invoices")
                .with_id("88888888-8888-8888-8888-888888888888"),
        )
        .unwrap();
    registry.seal();

    let local = MemoryBackend::new("local", "file://");
    let cdn = MemoryBackend::new("cdn", "https://cdn.example.com");
    let resolver = BackendResolver::from_config(&config.backends);
    resolver.register_backend("local", local.clone()).await;
    resolver.register_backend("cdn", cdn.clone()).await;

    Setup {
        registry,
        resolver,
        local,
        cdn,
    }
}

#[tokio::test]
async fn test_family_binding_routes_to_cdn() {
    let s = setup().await;
    let images = s.registry.lookup("shop.ProductImages").unwrap();
    let object_id = ObjectId::new();

    let body = futures::stream::iter([
        Ok::<_, std::io::Error>(Bytes::from_static(b"\x89PNG")),
        Ok(Bytes::from_static(b"rest")),
    ]);
    let file = IncomingFile::new("front view!.png", Box::pin(body)).with_content_type("image/png");

    let receipt = images
        .store_from_stream(&s.resolver, object_id, file)
        .await
        .unwrap();

    assert_eq!(receipt.bucket, "shop.ProductImages");
    assert_eq!(receipt.filename, "front_view_.png");
    assert_eq!(receipt.size_bytes, 8);
    assert_eq!(
        s.cdn.get(&receipt.path).unwrap(),
        Bytes::from_static(b"\x89PNGrest")
    );
    assert_eq!(s.local.len(), 0);

    let url = images
        .public_url(&s.resolver, object_id, "front view!.png")
        .await
        .unwrap();
    assert_eq!(url, format!("https://cdn.example.com/{}", receipt.path));
}

#[tokio::test]
async fn test_unbound_descriptor_uses_default_backend() {
    let s = setup().await;
    let invoices = s
        .registry
        .lookup("88888888-8888-8888-8888-888888888888")
        .unwrap();
    let object_id = ObjectId::new();

    let source = std::env::temp_dir().join(format!("bucketry-{object_id}.pdf"));
    tokio::fs::write(&source, b"%PDF-1.7").await.unwrap();

    let receipt = invoices
        .store_from_path(&s.resolver, object_id, &source, Some("invoice 2024-01.pdf"))
        .await
        .unwrap();
    tokio::fs::remove_file(&source).await.unwrap();

    assert_eq!(receipt.filename, "invoice_2024-01.pdf");
    assert_eq!(receipt.size_bytes, 8);
    assert_eq!(s.local.len(), 1);
    assert_eq!(s.cdn.len(), 0);

    let path = invoices
        .storage_path(&s.resolver, object_id, "invoice 2024-01.pdf")
        .await
        .unwrap();
    assert_eq!(path, receipt.path);
}

#[tokio::test]
async fn test_abstract_descriptor_rejected_even_when_bound() {
    let s = setup().await;
    let media = s.registry.lookup("shop.Media").unwrap();

    let err = media
        .public_url(&s.resolver, ObjectId::new(), "x.png")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::AbstractBucket);
    assert_eq!(s.cdn.len(), 0);
}

#[tokio::test]
async fn test_missing_default_is_no_backend() {
    let registry = BucketRegistry::new();
    let orphan = registry
        .register(
            BucketDeclaration::new("misc", "Orphan")
                .with_id("99999999-9999-9999-9999-999999999999"),
        )
        .unwrap();
    let resolver = BackendResolver::from_config(&AppConfig::default().backends);

    let err = orphan
        .storage_path(&resolver, ObjectId::new(), "a.txt")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NoBackendConfigured);
}
