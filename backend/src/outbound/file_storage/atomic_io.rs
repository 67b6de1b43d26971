//! Crash-safe replacement of the store file.
//!
//! The new contents go to a hidden sibling file which is synced and then
//! renamed over the target, so readers only ever see the old or the new
//! document.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` inside `dir` with `contents`.
///
/// `file_name` must be a single normal path component.
pub(super) fn replace_file(dir: &Dir, file_name: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let mut components = file_name.components();
    let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{file_name} is not a plain file name"),
        ));
    };
    let tmp_name = format!(
        ".{name}.{}.{}.tmp",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );

    if let Err(err) = write_synced(dir, &tmp_name, contents) {
        let _ = dir.remove_file(&tmp_name);
        return Err(err);
    }
    if let Err(err) = rename_over(dir, &tmp_name, name) {
        let _ = dir.remove_file(&tmp_name);
        return Err(err);
    }
    // Persisting the rename itself is best effort.
    let _ = dir.open(".").and_then(|handle| handle.sync_all());
    Ok(())
}

fn write_synced(dir: &Dir, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;
    use rstest::rstest;

    fn open(tmp: &tempfile::TempDir) -> Dir {
        Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open temp dir")
    }

    #[rstest]
    fn replaces_existing_contents() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let dir = open(&tmp);
        replace_file(&dir, Utf8Path::new("file.json"), b"{}").expect("first write");
        replace_file(&dir, Utf8Path::new("file.json"), b"{\"a\":1}").expect("second write");
        assert_eq!(dir.read_to_string("file.json").expect("read back"), "{\"a\":1}");
        let leftovers = dir
            .entries()
            .expect("list dir")
            .filter_map(Result::ok)
            .count();
        assert_eq!(leftovers, 1);
    }

    #[rstest]
    #[case("nested/file.json")]
    #[case("../file.json")]
    fn rejects_paths_with_directories(#[case] name: &str) {
        let tmp = tempfile::tempdir().expect("temp dir");
        let dir = open(&tmp);
        let err = replace_file(&dir, Utf8Path::new(name), b"{}").expect_err("path rejected");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
