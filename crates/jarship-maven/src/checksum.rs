//! Checksum sidecar files (`.md5`, `.sha1`, `.sha256`) uploaded next to
//! every published file.

use jarship_util::hash::{md5_bytes, sha1_bytes, sha256_bytes};

/// Sidecar extensions in upload order.
pub const CHECKSUM_EXTENSIONS: [&str; 3] = ["md5", "sha1", "sha256"];

/// Build the checksum sidecars for a file at `path`.
///
/// Returns `(sidecar_path, contents)` pairs; contents are the bare lowercase
/// hex digest, the form Maven repositories expect.
pub fn sidecars(path: &str, data: &[u8]) -> Vec<(String, Vec<u8>)> {
    CHECKSUM_EXTENSIONS
        .iter()
        .map(|ext| {
            let digest = match *ext {
                "md5" => md5_bytes(data),
                "sha1" => sha1_bytes(data),
                _ => sha256_bytes(data),
            };
            (format!("{path}.{ext}"), digest.into_bytes())
        })
        .collect()
}

/// Whether `path` is a checksum sidecar.
pub fn is_sidecar(path: &str) -> bool {
    CHECKSUM_EXTENSIONS
        .iter()
        .any(|ext| path.strip_suffix(ext).is_some_and(|p| p.ends_with('.')))
}
