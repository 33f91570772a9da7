//! PortalPaths - data directory layout
//!
//! Centralizes every path under the portal data directory.
//!
//! ```text
//! {data-dir}/
//! └── data/
//!     └── portal.redb      # local cache (all collections + session)
//! ```

use std::path::{Path, PathBuf};

/// Portal data directory layout
#[derive(Debug, Clone)]
pub struct PortalPaths {
    /// Data directory root
    base: PathBuf,
}

impl PortalPaths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Database directory: `{base}/data/`
    pub fn data_dir(&self) -> PathBuf {
        self.base.join("data")
    }

    /// Local cache database: `{base}/data/portal.redb`
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("portal.redb")
    }

    /// Create the directory tree if it does not exist yet.
    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = PortalPaths::new("/srv/jiscare");
        assert_eq!(paths.data_dir(), PathBuf::from("/srv/jiscare/data"));
        assert_eq!(
            paths.database_file(),
            PathBuf::from("/srv/jiscare/data/portal.redb")
        );
    }
}
