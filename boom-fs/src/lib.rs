//! Capability-based UTF-8 filesystem helpers shared across the workspace.
//!
//! Paths are [`camino`] UTF-8 paths; every operation resolves an ambient
//! directory handle with `cap-std` and works relative to it.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Write};
use std::path::Component;

/// Suffix of the staging file written next to a file being replaced.
const STAGING_SUFFIX: &str = ".partial";

/// Open a UTF-8 file path for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory containing `path` and return it with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let file_name = file_name(path)?.to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent_or_current(path), ambient_authority())?;
    Ok((dir, file_name))
}

fn parent_or_current(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

fn file_name(path: &Utf8Path) -> io::Result<&str> {
    path.file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))
}

/// Read a whole file into a string, returning `None` when it does not exist.
///
/// A missing parent directory also counts as a missing file.
pub fn read_optional_to_string(path: &Utf8Path) -> io::Result<Option<String>> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(name.as_str()) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Replace the contents of `path`, creating parent directories as needed.
///
/// The bytes go to a uniquely named sibling staging file, are synced to
/// disk, and the staging file is then renamed over the target. Readers see
/// either the old or the new contents, even after a crash. The staging file
/// is removed when any step fails.
pub fn write_replacing(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let prefix = format!(".{}.", file_name(path)?);
    let mut staging = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(STAGING_SUFFIX)
        .tempfile_in(parent_or_current(path))?;
    staging.write_all(contents)?;
    staging.as_file().sync_all()?;
    staging.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Ensure the parent directory for `path` exists.
///
/// Absolute paths are resolved from their root so `cap-std` never sees an
/// absolute path relative to a directory handle.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Return whether `path` exists and is a regular file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Split a directory path into an ambient base directory and a relative
/// remainder.
pub fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        // Windows drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative_utf8 = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;

    Ok((dir, relative_utf8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn entry_names(dir: &Utf8Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("list directory")
            .map(|entry| {
                entry
                    .expect("directory entry")
                    .file_name()
                    .into_string()
                    .expect("utf-8 entry name")
            })
            .collect();
        names.sort();
        names
    }

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 tempdir");
        (tmp, root)
    }

    #[rstest]
    fn write_replacing_creates_parents_and_overwrites(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let target = root.join("profiles/session.json");

        write_replacing(&target, b"first").expect("first write");
        write_replacing(&target, b"second").expect("second write");

        let contents = read_optional_to_string(&target).expect("read back");
        assert_eq!(contents.as_deref(), Some("second"));
        assert!(file_is_file(&target).expect("inspect target"));
        assert_eq!(entry_names(&root.join("profiles")), vec!["session.json"]);
    }

    #[rstest]
    fn failed_replacements_leave_no_staging_file(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let target = root.join("session.json");
        std::fs::create_dir_all(target.join("occupied")).expect("block target with a directory");

        write_replacing(&target, b"snapshot").expect_err("cannot replace a directory");

        assert_eq!(entry_names(&root), vec!["session.json"]);
        assert!(!file_is_file(&target).expect("inspect target"));
    }

    #[rstest]
    fn missing_files_read_as_none(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let missing = root.join("absent/dir/file.json");
        assert!(read_optional_to_string(&missing).expect("read missing").is_none());
    }

    #[rstest]
    fn directories_are_not_files(workspace: (TempDir, Utf8PathBuf)) {
        let (_tmp, root) = workspace;
        let dir = root.join("feeds");
        ensure_parent_dir(&dir.join("feed.json")).expect("create feeds dir");
        assert!(!file_is_file(&dir).expect("inspect dir"));
    }
}
