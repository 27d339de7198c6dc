use abi::{
    ride_service_server::RideService, validate_id, validate_ride, CreateRideRequest,
    CreateRideResponse, EntityKind, GetRideRequest, GetRideResponse, RideshareError,
    UpdateRideRequest, UpdateRideResponse, Validator,
};
use tonic::{Request, Response, Status};

use crate::RideSvc;

#[tonic::async_trait]
impl RideService for RideSvc {
    /// create a standalone ride
    async fn create_ride(
        &self,
        request: Request<CreateRideRequest>,
    ) -> Result<Response<CreateRideResponse>, Status> {
        let req = request.into_inner();
        self.telemetry.request("CreateRide", &req);
        let result = self.create(req).await;
        self.telemetry.observe("CreateRide", result)
    }

    /// get ride details by id
    async fn get_ride(
        &self,
        request: Request<GetRideRequest>,
    ) -> Result<Response<GetRideResponse>, Status> {
        let req = request.into_inner();
        self.telemetry.request("GetRide", &req);
        let result = self.get(req).await;
        self.telemetry.observe("GetRide", result)
    }

    /// replace all descriptive fields of a ride
    async fn update_ride(
        &self,
        request: Request<UpdateRideRequest>,
    ) -> Result<Response<UpdateRideResponse>, Status> {
        let req = request.into_inner();
        self.telemetry.request("UpdateRide", &req);
        let result = self.update(req).await;
        self.telemetry.observe("UpdateRide", result)
    }
}

impl RideSvc {
    async fn create(&self, req: CreateRideRequest) -> Result<CreateRideResponse, RideshareError> {
        let ride = validate_ride(req.ride.as_ref())?;

        let ride_id = self
            .store
            .create(ride)
            .await
            .map_err(|e| RideshareError::internal("create ride", e))?;

        Ok(CreateRideResponse { ride_id })
    }

    async fn get(&self, req: GetRideRequest) -> Result<GetRideResponse, RideshareError> {
        req.validate()?;

        let ride = self
            .store
            .get(req.ride_id)
            .await
            .map_err(|e| e.translate(EntityKind::Ride, req.ride_id, "get ride"))?;

        Ok(GetRideResponse { ride: Some(ride) })
    }

    async fn update(&self, req: UpdateRideRequest) -> Result<UpdateRideResponse, RideshareError> {
        validate_id(req.ride_id, EntityKind::Ride)?;
        let ride = validate_ride(req.ride.as_ref())?;

        self.store
            .update(req.ride_id, ride)
            .await
            .map_err(|e| e.translate(EntityKind::Ride, req.ride_id, "update ride"))?;

        Ok(UpdateRideResponse {
            message: format!("ride with id {} successfully updated", req.ride_id),
        })
    }
}
