use std::path::PathBuf;
use thiserror::Error;

/// The category of a failure, as reported to whatever client sits on top of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Duplicate,
    NotFound,
    Validation,
    Io,
    Config,
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("{0} does not exist")]
    NotFound(String),

    #[error("Invalid record: {0}")]
    Validation(String),

    #[error("Refusing to delete {}: directory contains unmanaged files", .0.display())]
    AssetDirNotEmpty(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::Format(_) => ErrorKind::Format,
            RosterError::Duplicate(_) => ErrorKind::Duplicate,
            RosterError::NotFound(_) => ErrorKind::NotFound,
            RosterError::Validation(_) => ErrorKind::Validation,
            RosterError::AssetDirNotEmpty(_) | RosterError::Io(_) | RosterError::Store(_) => {
                ErrorKind::Io
            }
            RosterError::Serialization(_) | RosterError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_the_record() {
        let err = RosterError::Duplicate("Student with id S1".into());
        assert_eq!(err.to_string(), "Student with id S1 already exists");
        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[test]
    fn asset_dir_error_is_reported_as_io() {
        let err = RosterError::AssetDirNotEmpty(PathBuf::from("/data/storage/42"));
        assert!(err.to_string().contains("/data/storage/42"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "photo missing");
        let err: RosterError = io_err.into();
        assert!(matches!(err, RosterError::Io(_)));
        assert!(err.to_string().contains("photo missing"));
    }
}
