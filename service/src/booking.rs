use abi::{
    booking_service_server::BookingService, CreateBookingRequest, CreateBookingResponse,
    GetBookingRequest, GetBookingResponse,
};
use tonic::{Request, Response, Status};

use crate::BookingSvc;

#[tonic::async_trait]
impl BookingService for BookingSvc {
    /// create a ride and a booking that references it
    async fn create_booking(
        &self,
        request: Request<CreateBookingRequest>,
    ) -> Result<Response<CreateBookingResponse>, Status> {
        let req = request.into_inner();
        self.telemetry.request("CreateBooking", &req);
        let result = self
            .orchestrator
            .create_booking(req)
            .await
            .map(|booking| CreateBookingResponse {
                booking: Some(booking),
            });
        self.telemetry.observe("CreateBooking", result)
    }

    /// get a booking joined with its identity and ride
    async fn get_booking(
        &self,
        request: Request<GetBookingRequest>,
    ) -> Result<Response<GetBookingResponse>, Status> {
        let req = request.into_inner();
        self.telemetry.request("GetBooking", &req);
        let result = self
            .orchestrator
            .get_booking(req.booking_id)
            .await
            .map(GetBookingResponse::from);
        self.telemetry.observe("GetBooking", result)
    }
}
