//! Option helper extensions for request validation.

use salvo::prelude::StatusError;

pub(crate) trait OptionExt<T> {
    /// Reject a missing value with a 400 carrying `brief`.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.ok_or_else(|| StatusError::bad_request().brief(brief))
    }
}
