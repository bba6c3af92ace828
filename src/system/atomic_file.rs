// src/system/atomic_file.rs

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;

/// Writes `content` to `path` through a temporary file in the same directory that is
/// renamed over the target once fully written and synced.
///
/// Readers see either the previous file or the new one, never a partial write. If any
/// step before the rename fails the temporary file is removed and `path` is untouched.
///
/// A replaced file keeps its permissions. A new file gets the permissions of any
/// freshly created file (`0666` minus the umask on Unix).
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut temp_file = builder.tempfile_in(parent)?;

    match fs::metadata(path) {
        Ok(existing) => temp_file.as_file().set_permissions(existing.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    log::debug!("Atomically wrote {} bytes to '{}'", content.len(), path.display());
    Ok(())
}

/// Checks that new files can be created in `dir` by creating an anonymous one.
pub fn probe_writable(dir: &Path) -> io::Result<()> {
    tempfile::tempfile_in(dir).map(drop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("abc.site.yml");

        write_atomic(&path, "first\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");

        write_atomic(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");

        // No temporary files are left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_permissions_of_replaced_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("abc.site.yml");
        write_atomic(&path, "first\n").unwrap();

        for mode in [0o644, 0o640] {
            fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
            write_atomic(&path, "again\n").unwrap();
            let actual = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(actual, mode);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_new_file_is_not_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let reference = dir.path().join("reference");
        fs::write(&reference, "").unwrap();
        let path = dir.path().join("abc.site.yml");
        write_atomic(&path, "first\n").unwrap();

        // Same mode as a file created the ordinary way under the current umask.
        let expected = fs::metadata(&reference).unwrap().permissions().mode() & 0o777;
        let actual = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_write_atomic_fails_in_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("abc.site.yml");

        assert!(write_atomic(&path, "content").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_probe_writable() {
        let dir = tempdir().unwrap();
        assert!(probe_writable(dir.path()).is_ok());
        assert!(probe_writable(&dir.path().join("missing")).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
