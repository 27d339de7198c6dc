use crate::{
    validate_id, CreateUserRequest, DeleteUserRequest, EntityKind, GetUserRequest,
    RideshareError, Validator,
};

use super::validate_not_empty;

/// a stored identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
}

impl Validator for CreateUserRequest {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_not_empty(&self.name, "name")
    }
}

impl Validator for GetUserRequest {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_id(self.user_id, EntityKind::User)
    }
}

impl Validator for DeleteUserRequest {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_id(self.user_id, EntityKind::User)
    }
}
