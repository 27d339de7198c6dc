use thiserror::Error;

use crate::{EntityKind, RideshareError};

/// outcome of a failed entity store call
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("database operation failed: {0}")]
    OperationFailed(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NotFound,
            _ => Self::OperationFailed(e),
        }
    }
}

impl StoreError {
    /// map a store outcome for `entity` `id` onto the API taxonomy;
    /// every service goes through here so the same failure always yields the same status
    pub fn translate(self, entity: EntityKind, id: i32, action: &str) -> RideshareError {
        match self {
            StoreError::NotFound => RideshareError::NotFound { entity, id },
            e => RideshareError::internal(action, e),
        }
    }
}
