//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use pbxpatch_core::{
    application::{ApplicationError, ports::ManifestStore},
    error::{PatchError, PatchResult},
};
use tracing::debug;

/// Production manifest store backed by `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestStore for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> PatchResult<String> {
        let text = std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read"))?;
        debug!(path = %path.display(), bytes = text.len(), "Read manifest");
        Ok(text)
    }

    fn write(&self, path: &Path, content: &str) -> PatchResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write"))?;
        debug!(path = %path.display(), bytes = content.len(), "Wrote manifest");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PatchError {
    if e.kind() == io::ErrorKind::NotFound {
        return ApplicationError::ManifestNotFound {
            path: path.to_path_buf(),
        }
        .into();
    }
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.pbxproj");
        let fs = LocalFilesystem::new();

        assert!(!fs.exists(&path));
        fs.write(&path, "// !$*UTF8*$!\n").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "// !$*UTF8*$!\n");
    }

    #[test]
    fn directory_is_not_a_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!LocalFilesystem::new().exists(dir.path()));
    }

    #[test]
    fn missing_file_maps_to_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("nope.pbxproj"))
            .unwrap_err();
        assert!(matches!(
            err,
            PatchError::Application(ApplicationError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.pbxproj");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = LocalFilesystem::new().read_to_string(&path).unwrap_err();
        assert!(matches!(
            err,
            PatchError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
