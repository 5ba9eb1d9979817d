//! Filename normalization for storage keys.

use bucketry_core::types::ObjectId;

use crate::descriptor::BucketDescriptor;

/// Normalize an arbitrary filename into a key that is safe on filesystems
/// and in URLs.
///
/// Every character other than a (Unicode) alphanumeric, `_`, `-` or `.` is
/// replaced with `_`, then leading and trailing hyphens are stripped.
pub fn sanitize_filename(filename: &str) -> String {
    let escaped: String = filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    escaped.trim_matches('-').to_string()
}

/// Canonical storage key for a file of `object_id` in `bucket`:
/// `{qualified_name}/{object_id}/{sanitized filename}`.
///
/// Backends serving several descriptors use this to keep their namespaces
/// apart.
pub fn object_key(bucket: &BucketDescriptor, object_id: ObjectId, filename: &str) -> String {
    format!(
        "{}/{}/{}",
        bucket.qualified_name(),
        object_id,
        sanitize_filename(filename)
    )
}
