use abi::{BookingDetails, DbConfig, Ride, StoreError, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

mod booking;
mod memory;
mod orchestrator;
mod ride;
mod user;

pub use memory::{MemoryStore, Op};
pub use orchestrator::BookingOrchestrator;

#[derive(Debug, Clone)]
pub struct UserManager {
    pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct RideManager {
    pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct BookingManager {
    pool: PgPool,
}

/// build the shared connection pool; each store call checks out a connection and returns it right away
pub async fn connect(config: &DbConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.to_url())
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("../migrations")
        .run(pool)
        .await
        .map_err(sqlx::Error::from)?;
    Ok(())
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// insert an identity, returning its id
    async fn create(&self, name: &str) -> Result<i32, StoreError>;
    /// get an identity by id
    async fn get(&self, id: i32) -> Result<User, StoreError>;
    /// delete an identity by id
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

#[async_trait]
pub trait RideStore: Send + Sync {
    /// insert a ride, returning the id the store assigned
    async fn create(&self, ride: &Ride) -> Result<i32, StoreError>;
    /// get ride details by id
    async fn get(&self, id: i32) -> Result<Ride, StoreError>;
    /// replace all descriptive fields of a ride
    async fn update(&self, id: i32, ride: &Ride) -> Result<(), StoreError>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// insert a booking referencing an existing identity and ride
    async fn create(
        &self,
        user_id: i32,
        ride_id: i32,
        booked_at: DateTime<Utc>,
    ) -> Result<i32, StoreError>;
    /// get a booking joined with its identity and ride
    async fn get_details(&self, id: i32) -> Result<BookingDetails, StoreError>;
}
