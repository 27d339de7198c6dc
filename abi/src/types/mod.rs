mod booking;
mod ride;
mod user;

pub use booking::*;
pub use ride::*;
pub use user::*;

use crate::{EntityKind, RideshareError};

/// shape checks run before any store call
pub trait Validator {
    fn validate(&self) -> Result<(), RideshareError>;
}

pub fn validate_id(id: i32, entity: EntityKind) -> Result<(), RideshareError> {
    if id <= 0 {
        return Err(RideshareError::InvalidId(entity));
    }

    Ok(())
}

pub(crate) fn validate_not_empty(value: &str, field: &'static str) -> Result<(), RideshareError> {
    if value.trim().is_empty() {
        return Err(RideshareError::EmptyField(field));
    }

    Ok(())
}
