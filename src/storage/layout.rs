use std::fs;
use std::path::{Path, PathBuf};
use crate::core::error::{Error, ErrorKind, Result};

/// Directory structure of an opened database:
///
/// ```text
/// <database_path>/        -- must pre-exist, be a directory
///   .notmuch/             -- created with mode 0755
///     xapian/             -- index files, created on first open
/// ```
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub database_path: PathBuf,  // The user-supplied root
    pub notmuch_dir: PathBuf,    // <root>/.notmuch
    pub index_dir: PathBuf,      // <root>/.notmuch/xapian
}

impl StorageLayout {
    /// Initialize the `.notmuch` directory under an existing database
    /// root, then open it.
    pub fn create(database_path: &Path) -> Result<Self> {
        match fs::metadata(database_path) {
            Err(err) => {
                return Err(Error::new(
                    ErrorKind::PathMissing,
                    format!("cannot create database at {}: {}", database_path.display(), err),
                ));
            }
            Ok(meta) if !meta.is_dir() => {
                return Err(Error::new(
                    ErrorKind::NotDirectory,
                    format!("cannot create database at {}: not a directory", database_path.display()),
                ));
            }
            Ok(_) => {}
        }

        let notmuch_dir = database_path.join(".notmuch");
        Self::make_notmuch_dir(&notmuch_dir).map_err(|err| {
            Error::new(
                ErrorKind::CreateFailed,
                format!("cannot create directory {}: {}", notmuch_dir.display(), err),
            )
        })?;

        Self::open(database_path)
    }

    /// Open the layout of an existing database. The `.notmuch`
    /// directory must already exist; the index directory is created
    /// lazily by the backend.
    pub fn open(database_path: &Path) -> Result<Self> {
        let notmuch_dir = database_path.join(".notmuch");

        if let Err(err) = fs::metadata(&notmuch_dir) {
            return Err(Error::new(
                ErrorKind::PathMissing,
                format!("cannot stat {}: {}", notmuch_dir.display(), err),
            ));
        }

        let index_dir = notmuch_dir.join("xapian");

        Ok(StorageLayout {
            database_path: database_path.to_path_buf(),
            notmuch_dir,
            index_dir,
        })
    }

    #[cfg(unix)]
    fn make_notmuch_dir(path: &Path) -> std::io::Result<()> {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new().mode(0o755).create(path)
    }

    #[cfg(not(unix))]
    fn make_notmuch_dir(path: &Path) -> std::io::Result<()> {
        fs::DirBuilder::new().create(path)
    }
}
