use abi::{
    user_service_server::UserService, CreateUserRequest, CreateUserResponse, DeleteUserRequest,
    DeleteUserResponse, EntityKind, GetUserRequest, GetUserResponse, RideshareError, Validator,
};
use tonic::{Request, Response, Status};

use crate::UserSvc;

#[tonic::async_trait]
impl UserService for UserSvc {
    /// register a new identity
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();
        self.telemetry.request("CreateUser", &req);
        let result = self.create(req).await;
        self.telemetry.observe("CreateUser", result)
    }

    /// get the name of an identity
    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let req = request.into_inner();
        self.telemetry.request("GetUser", &req);
        let result = self.get(req).await;
        self.telemetry.observe("GetUser", result)
    }

    /// delete an identity
    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let req = request.into_inner();
        self.telemetry.request("DeleteUser", &req);
        let result = self.delete(req).await;
        self.telemetry.observe("DeleteUser", result)
    }
}

impl UserSvc {
    async fn create(&self, req: CreateUserRequest) -> Result<CreateUserResponse, RideshareError> {
        req.validate()?;

        let user_id = self
            .store
            .create(&req.name)
            .await
            .map_err(|e| RideshareError::internal("create user", e))?;

        Ok(CreateUserResponse { user_id })
    }

    async fn get(&self, req: GetUserRequest) -> Result<GetUserResponse, RideshareError> {
        req.validate()?;

        let user = self
            .store
            .get(req.user_id)
            .await
            .map_err(|e| e.translate(EntityKind::User, req.user_id, "get user"))?;

        Ok(GetUserResponse { name: user.name })
    }

    async fn delete(&self, req: DeleteUserRequest) -> Result<DeleteUserResponse, RideshareError> {
        req.validate()?;

        self.store
            .delete(req.user_id)
            .await
            .map_err(|e| e.translate(EntityKind::User, req.user_id, "delete user"))?;

        Ok(DeleteUserResponse {
            message: format!("user with id {} successfully deleted", req.user_id),
        })
    }
}
