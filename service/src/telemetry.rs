use std::fmt::Debug;

use abi::{RideshareError, StatusKind};
use metrics::{counter, describe_counter};
use tonic::{Response, Status};
use tracing::{error, info, warn};

pub const REQUESTS_TOTAL: &str = "grpc_requests_total";

/// Per-service request logging and metrics.
///
/// Handed to each service at construction; every rpc reports through it exactly once.
#[derive(Debug, Clone)]
pub struct Telemetry {
    service: &'static str,
}

impl Telemetry {
    pub fn new(service: &'static str) -> Self {
        Self { service }
    }

    pub fn request<T: Debug>(&self, method: &'static str, request: &T) {
        info!(service = self.service, method, request = ?request, "rpc request");
    }

    /// count the finished rpc, log its outcome and turn it into a tonic reply
    pub fn observe<T: Debug>(
        &self,
        method: &'static str,
        result: Result<T, RideshareError>,
    ) -> Result<Response<T>, Status> {
        counter!(
            REQUESTS_TOTAL,
            "service" => self.service,
            "method" => method,
            "status" => status_label(&result)
        )
        .increment(1);

        match result {
            Ok(response) => {
                info!(service = self.service, method, response = ?response, "rpc response");
                Ok(Response::new(response))
            }
            Err(e) => {
                match e.kind() {
                    StatusKind::Internal => {
                        error!(service = self.service, method, error = %e, "rpc failed")
                    }
                    _ => warn!(service = self.service, method, error = %e, "rpc rejected"),
                }
                Err(e.into())
            }
        }
    }
}

pub fn status_label<T>(result: &Result<T, RideshareError>) -> &'static str {
    match result {
        Ok(_) => "OK",
        Err(e) => e.kind().as_str(),
    }
}

pub fn describe_metrics() {
    describe_counter!(REQUESTS_TOTAL, "Total number of gRPC requests");
}

#[cfg(test)]
mod tests {
    use abi::{EntityKind, StoreError};

    use super::*;

    #[test]
    fn status_label_should_follow_kind() {
        assert_eq!(status_label(&Ok::<_, RideshareError>(())), "OK");
        assert_eq!(
            status_label(&Err::<(), _>(RideshareError::InvalidId(EntityKind::Ride))),
            "InvalidArgument"
        );
        assert_eq!(
            status_label(&Err::<(), _>(RideshareError::NotFound {
                entity: EntityKind::Ride,
                id: 1
            })),
            "NotFound"
        );
        assert_eq!(
            status_label(&Err::<(), _>(RideshareError::internal(
                "update ride",
                StoreError::OperationFailed(sqlx::Error::PoolClosed)
            ))),
            "Internal"
        );
    }

    #[test]
    fn observe_should_wrap_ok_and_convert_errors() {
        let telemetry = Telemetry::new("TestService");
        let resp = telemetry.observe("Ping", Ok::<_, RideshareError>(7)).unwrap();
        assert_eq!(resp.into_inner(), 7);

        let status = telemetry
            .observe::<i32>(
                "Ping",
                Err(RideshareError::NotFound {
                    entity: EntityKind::User,
                    id: 3,
                }),
            )
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "user with id 3 not found");
    }
}
