//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use hexgen_core::application::ports::Filesystem;

/// Production filesystem implementation using `std::fs`.
///
/// Relative paths are resolved against `root`; absolute paths are used as is.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Filesystem rooted at the current directory.
    pub fn new() -> Self {
        Self::rooted(".")
    }

    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(self.resolve(path), content)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(self.resolve(path))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn relative_paths_resolve_against_root() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::rooted(temp.path());

        fs.create_dir_all(Path::new("config")).unwrap();
        fs.write_file(Path::new("config/routes.yaml"), "routes: []\n").unwrap();

        assert!(temp.path().join("config/routes.yaml").exists());
        assert!(fs.exists(Path::new("config/routes.yaml")));
        assert_eq!(
            fs.read_to_string(Path::new("config/routes.yaml")).unwrap(),
            "routes: []\n"
        );

        fs.remove_file(Path::new("config/routes.yaml")).unwrap();
        assert!(!fs.exists(Path::new("config/routes.yaml")));
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::rooted(temp.path());
        let err = fs.read_to_string(Path::new("nope.yaml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
