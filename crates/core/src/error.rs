//! Shared error types for the core crate.

use thiserror::Error;

use crate::model::content::MediaValidationError;
use crate::model::QuizError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    MediaValidation(#[from] MediaValidationError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
