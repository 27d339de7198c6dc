use crate::{
    validate_id, CreateRideRequest, EntityKind, GetRideRequest, Ride, RideshareError,
    UpdateRideRequest, Validator,
};

use super::validate_not_empty;

impl Ride {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        distance: i32,
        cost: i32,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            distance,
            cost,
        }
    }
}

impl Validator for Ride {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_not_empty(&self.source, "source")?;
        validate_not_empty(&self.destination, "destination")?;

        if self.distance < 0 {
            return Err(RideshareError::NegativeField("distance"));
        }
        if self.cost < 0 {
            return Err(RideshareError::NegativeField("cost"));
        }

        Ok(())
    }
}

/// a present, well-formed ride payload
pub fn validate_ride(ride: Option<&Ride>) -> Result<&Ride, RideshareError> {
    let ride = ride.ok_or(RideshareError::MissingDetails(EntityKind::Ride))?;
    ride.validate()?;
    Ok(ride)
}

impl Validator for CreateRideRequest {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_ride(self.ride.as_ref())?;
        Ok(())
    }
}

impl Validator for GetRideRequest {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_id(self.ride_id, EntityKind::Ride)
    }
}

impl Validator for UpdateRideRequest {
    fn validate(&self) -> Result<(), RideshareError> {
        validate_id(self.ride_id, EntityKind::Ride)?;
        validate_ride(self.ride.as_ref())?;
        Ok(())
    }
}
