mod booking;
mod ride;
mod telemetry;
mod user;

use std::sync::Arc;

use abi::{
    booking_service_server::BookingServiceServer, ride_service_server::RideServiceServer,
    user_service_server::UserServiceServer, Config,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use rideshare::{
    BookingManager, BookingOrchestrator, RideManager, RideStore, UserManager, UserStore,
};
use tonic::transport::Server;
use tracing::info;

pub use telemetry::*;

pub struct UserSvc {
    store: Arc<dyn UserStore>,
    telemetry: Telemetry,
}

pub struct RideSvc {
    store: Arc<dyn RideStore>,
    telemetry: Telemetry,
}

pub struct BookingSvc {
    orchestrator: BookingOrchestrator,
    telemetry: Telemetry,
}

impl UserSvc {
    pub fn new(store: Arc<dyn UserStore>, telemetry: Telemetry) -> Self {
        Self { store, telemetry }
    }
}

impl RideSvc {
    pub fn new(store: Arc<dyn RideStore>, telemetry: Telemetry) -> Self {
        Self { store, telemetry }
    }
}

impl BookingSvc {
    pub fn new(orchestrator: BookingOrchestrator, telemetry: Telemetry) -> Self {
        Self {
            orchestrator,
            telemetry,
        }
    }
}

/// serve the user, ride and booking services on one listener until the process is stopped
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    if let Some(addr) = config.server.metrics_addr()? {
        PrometheusBuilder::new().with_http_listener(addr).install()?;
        describe_metrics();
        info!(%addr, "metrics exporter listening");
    }

    let pool = rideshare::connect(&config.db).await?;
    rideshare::migrate(&pool).await?;

    let rides = Arc::new(RideManager::new(pool.clone()));
    let users = UserSvc::new(
        Arc::new(UserManager::new(pool.clone())),
        Telemetry::new("UserService"),
    );
    let bookings = BookingSvc::new(
        BookingOrchestrator::new(rides.clone(), Arc::new(BookingManager::new(pool))),
        Telemetry::new("BookingService"),
    );
    let rides = RideSvc::new(rides, Telemetry::new("RideService"));

    let addr = config.server.listen_addr()?;
    info!(%addr, "rideshare services listening");

    Server::builder()
        .add_service(UserServiceServer::new(users))
        .add_service(RideServiceServer::new(rides))
        .add_service(BookingServiceServer::new(bookings))
        .serve(addr)
        .await?;

    Ok(())
}
