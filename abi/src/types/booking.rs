use chrono::{DateTime, Utc};

use crate::{
    format_timestamp, validate_id, validate_ride, Booking, CreateBookingRequest, EntityKind,
    GetBookingRequest, GetBookingResponse, Ride, RideshareError, Validator,
};

/// a booking joined with the identity and ride it references
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub booking_id: i32,
    pub user_id: i32,
    pub ride_id: i32,
    pub booked_at: DateTime<Utc>,
    pub name: String,
    pub ride: Ride,
}

impl Booking {
    pub fn new(booking_id: i32, user_id: i32, ride_id: i32, booked_at: DateTime<Utc>) -> Self {
        Self {
            booking_id,
            user_id,
            ride_id,
            time: format_timestamp(booked_at),
        }
    }
}

impl From<BookingDetails> for GetBookingResponse {
    fn from(details: BookingDetails) -> Self {
        Self {
            name: details.name,
            source: details.ride.source,
            destination: details.ride.destination,
            distance: details.ride.distance,
            cost: details.ride.cost,
            time: format_timestamp(details.booked_at),
        }
    }
}

impl Validator for CreateBookingRequest {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_id(self.user_id, EntityKind::User)?;
        validate_ride(self.ride.as_ref())?;
        Ok(())
    }
}

impl Validator for GetBookingRequest {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_id(self.booking_id, EntityKind::Booking)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn details_should_flatten_into_response() {
        let details = BookingDetails {
            booking_id: 1,
            user_id: 10,
            ride_id: 20,
            booked_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            name: "John Doe".to_string(),
            ride: Ride::new("Downtown", "Airport", 20, 500),
        };

        let resp: GetBookingResponse = details.into();
        assert_eq!(
            resp,
            GetBookingResponse {
                name: "John Doe".to_string(),
                source: "Downtown".to_string(),
                destination: "Airport".to_string(),
                distance: 20,
                cost: 500,
                time: "2024-05-01T08:00:00Z".to_string(),
            }
        );
    }

    #[test]
    fn create_request_should_validate_user_then_ride() {
        let req = CreateBookingRequest {
            user_id: 0,
            ride: Some(Ride::new("Downtown", "Airport", 20, 500)),
        };
        assert!(matches!(
            req.validate(),
            Err(RideshareError::InvalidId(EntityKind::User))
        ));

        let req = CreateBookingRequest {
            user_id: 1,
            ride: None,
        };
        assert!(matches!(
            req.validate(),
            Err(RideshareError::MissingDetails(EntityKind::Ride))
        ));
    }

    #[test]
    fn get_request_should_reject_non_positive_id() {
        assert!(GetBookingRequest { booking_id: -1 }.validate().is_err());
        assert!(GetBookingRequest { booking_id: 1 }.validate().is_ok());
    }
}
