//! Crate-level error type

use thiserror::Error;

use crate::template::TemplateError;
use crate::validation::{SeriesReadError, ValidationError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    SeriesRead(#[from] SeriesReadError),
}

pub type Result<T> = std::result::Result<T, Error>;
