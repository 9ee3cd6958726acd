use std::io;
use std::path::PathBuf;

use gopherkv_store::StoreError;

/// A failure that aborts the whole compilation.
///
/// Nothing is rolled back: keys written before the failure stay written.
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error("failed to list directory {}: {source}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to inspect {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to store key '{key}': {source}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn display_names_the_path() {
        let e = CompileError::ListDirectory {
            path: PathBuf::from("/srv/gopher/01-Posts"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = e.to_string();
        assert!(display.contains("/srv/gopher/01-Posts"));
        assert!(display.contains("denied"));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn store_error_keeps_key() {
        let e = CompileError::Store {
            key: "/About.html".to_string(),
            source: StoreError::NotSupported,
        };
        assert_eq!(
            e.to_string(),
            "failed to store key '/About.html': operation not supported"
        );
    }
}
