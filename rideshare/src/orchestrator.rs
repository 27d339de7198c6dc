use std::sync::Arc;

use abi::{
    validate_id, validate_ride, Booking, BookingDetails, CreateBookingRequest, EntityKind,
    RideshareError,
};
use chrono::{SubsecRound, Utc};
use tracing::{error, info, warn};

use crate::{BookingStore, RideStore};

/// Provisions a ride and then a booking that references it, and serves joined booking reads.
///
/// The two inserts are independent statements. When the booking insert fails the ride
/// it was meant to reference stays persisted with no booking pointing at it, and the
/// caller still receives `Internal`. The same holds if the caller goes away between
/// the two steps. Nothing is rolled back or compensated.
pub struct BookingOrchestrator {
    rides: Arc<dyn RideStore>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingOrchestrator {
    pub fn new(rides: Arc<dyn RideStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { rides, bookings }
    }

    /// create a ride, then a booking for `user_id` on it
    pub async fn create_booking(&self, req: CreateBookingRequest) -> Result<Booking, RideshareError> {
        let user_id = req.user_id;
        validate_id(user_id, EntityKind::User).inspect_err(|e| warn!(user_id, "{}", e))?;
        let ride = validate_ride(req.ride.as_ref()).inspect_err(|e| warn!(user_id, "{}", e))?;

        let ride_id = self.rides.create(ride).await.map_err(|e| {
            error!(user_id, source = %ride.source, destination = %ride.destination, error = %e, "failed to create ride");
            RideshareError::internal("create ride", e)
        })?;

        let booked_at = Utc::now().trunc_subsecs(0);
        let booking_id = self
            .bookings
            .create(user_id, ride_id, booked_at)
            .await
            .map_err(|e| {
                error!(user_id, ride_id, error = %e, "failed to create booking, ride {} left without a booking", ride_id);
                RideshareError::internal("create booking", e)
            })?;

        info!(booking_id, user_id, ride_id, "booking created");
        Ok(Booking::new(booking_id, user_id, ride_id, booked_at))
    }

    /// get a booking together with its identity name and ride details
    pub async fn get_booking(&self, booking_id: i32) -> Result<BookingDetails, RideshareError> {
        validate_id(booking_id, EntityKind::Booking).inspect_err(|e| warn!(booking_id, "{}", e))?;

        let details = self
            .bookings
            .get_details(booking_id)
            .await
            .map_err(|e| {
                warn!(booking_id, error = %e, "failed to fetch booking");
                e.translate(EntityKind::Booking, booking_id, "fetch booking")
            })?;

        info!(booking_id, user_id = details.user_id, ride_id = details.ride_id, "booking fetched");
        Ok(details)
    }
}
