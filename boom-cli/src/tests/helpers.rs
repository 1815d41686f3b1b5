//! Filesystem helpers for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// Write `contents` to `path`, creating parent directories as needed.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directories");
    }
    std::fs::write(path, contents).expect("write test file");
}

/// Temporary directory with its UTF-8 root path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Serialise `rows` as a feed export at `path`.
pub(super) fn write_feed(path: &Utf8Path, rows: &Value) {
    let payload = serde_json::to_vec_pretty(rows).expect("serialise feed rows");
    write_utf8(path, &payload);
}
