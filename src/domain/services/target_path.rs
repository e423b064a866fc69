//! Target path resolution.

use std::path::Path;

/// Separator used in repository-relative paths
pub const TARGET_SEPARATOR: char = '/';

/// Resolve the repository-relative destination for `source`.
///
/// An unset or empty target, or one ending in `/`, gets the source's file
/// name appended. Anything else is returned unchanged. The result is never
/// empty as long as the source has a file name.
pub fn resolve_target_path(target: Option<&str>, source: &Path) -> String {
    let mut resolved = target.unwrap_or_default().to_string();
    if resolved.is_empty() || resolved.ends_with(TARGET_SEPARATOR) {
        resolved.push_str(&base_name(source));
    }
    resolved
}

/// Final path component of `source`, falling back to the whole path
fn base_name(source: &Path) -> String {
    source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string_lossy().into_owned())
}
