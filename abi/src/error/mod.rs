mod store;

use std::fmt;

use thiserror::Error;

pub use store::*;

/// the aggregate an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Ride,
    Booking,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Ride => write!(f, "ride"),
            EntityKind::Booking => write!(f, "booking"),
        }
    }
}

/// the whole status vocabulary exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    InvalidArgument,
    NotFound,
    Internal,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::InvalidArgument => "InvalidArgument",
            StatusKind::NotFound => "NotFound",
            StatusKind::Internal => "Internal",
        }
    }
}

#[derive(Error, Debug)]
pub enum RideshareError {
    #[error("invalid {0}_id: must be a positive integer")]
    InvalidId(EntityKind),

    #[error("{0} details must be provided")]
    MissingDetails(EntityKind),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("{0} must not be negative")]
    NegativeField(&'static str),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: EntityKind, id: i32 },

    #[error("failed to {action}: {source}")]
    Internal { action: String, source: StoreError },
}

impl RideshareError {
    pub fn internal(action: impl Into<String>, source: StoreError) -> Self {
        Self::Internal {
            action: action.into(),
            source,
        }
    }

    pub fn kind(&self) -> StatusKind {
        match self {
            Self::InvalidId(_)
            | Self::MissingDetails(_)
            | Self::EmptyField(_)
            | Self::NegativeField(_) => StatusKind::InvalidArgument,
            Self::NotFound { .. } => StatusKind::NotFound,
            Self::Internal { .. } => StatusKind::Internal,
        }
    }
}

impl From<RideshareError> for tonic::Status {
    fn from(e: RideshareError) -> Self {
        let message = e.to_string();
        match e.kind() {
            StatusKind::InvalidArgument => tonic::Status::invalid_argument(message),
            StatusKind::NotFound => tonic::Status::not_found(message),
            StatusKind::Internal => tonic::Status::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_errors_should_map_to_invalid_argument() {
        let errors = [
            RideshareError::InvalidId(EntityKind::Booking),
            RideshareError::MissingDetails(EntityKind::Ride),
            RideshareError::EmptyField("name"),
            RideshareError::NegativeField("cost"),
        ];
        for e in errors {
            let status: tonic::Status = e.into();
            assert_eq!(status.code(), tonic::Code::InvalidArgument);
        }
    }

    #[test]
    fn not_found_should_name_entity_and_id() {
        let status: tonic::Status = RideshareError::NotFound {
            entity: EntityKind::Booking,
            id: 999,
        }
        .into();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "booking with id 999 not found");
    }

    #[test]
    fn internal_should_keep_cause_in_message_only() {
        let e = RideshareError::internal(
            "create ride",
            StoreError::OperationFailed(sqlx::Error::PoolTimedOut),
        );
        assert_eq!(e.kind(), StatusKind::Internal);

        let status: tonic::Status = e.into();
        assert_eq!(status.code(), tonic::Code::Internal);
        assert!(status.message().starts_with("failed to create ride: "));
        assert!(status.message().contains("pool timed out"));
    }

    #[test]
    fn invalid_id_message_should_name_field() {
        let e = RideshareError::InvalidId(EntityKind::User);
        assert_eq!(e.to_string(), "invalid user_id: must be a positive integer");
    }
}
