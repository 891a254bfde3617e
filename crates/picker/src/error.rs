use thiserror::Error;
use vellum_types::{AuthError, BackendError};
use vellum_util::ValidationError;

/// Failure of a picker operation.
///
/// Every variant has already been logged and shown to the user by the time it
/// is returned; callers only need it for control flow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PickerError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("could not list {path}: {source}")]
    List { path: String, source: BackendError },

    #[error("could not read {path}: {source}")]
    Read { path: String, source: BackendError },

    #[error("could not write {path}: {source}")]
    Write { path: String, source: BackendError },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown backend: {id}")]
    UnknownBackend { id: String },
}

impl PickerError {
    pub fn list(path: impl Into<String>, source: BackendError) -> Self {
        Self::List { path: path.into(), source }
    }

    pub fn read(path: impl Into<String>, source: BackendError) -> Self {
        Self::Read { path: path.into(), source }
    }

    pub fn write(path: impl Into<String>, source: BackendError) -> Self {
        Self::Write { path: path.into(), source }
    }

    pub fn unknown_backend(id: impl Into<String>) -> Self {
        Self::UnknownBackend { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_path_and_cause() {
        let err = PickerError::list("/dicts", BackendError::not_found("/dicts"));
        assert_eq!(err.to_string(), "could not list /dicts: /dicts was not found");

        let err: PickerError = ValidationError::Empty.into();
        assert_eq!(err.to_string(), "file name must not be empty");

        let err: PickerError = AuthError::cancelled("gist").into();
        assert!(matches!(err, PickerError::Auth(AuthError::Cancelled { .. })));
    }
}
