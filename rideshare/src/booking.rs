use abi::{BookingDetails, Ride, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use crate::{BookingManager, BookingStore};

#[derive(Debug, FromRow)]
struct BookingRow {
    booking_id: i32,
    user_id: i32,
    ride_id: i32,
    booked_at: DateTime<Utc>,
    name: String,
    source: String,
    destination: String,
    distance: i32,
    cost: i32,
}

impl From<BookingRow> for BookingDetails {
    fn from(row: BookingRow) -> Self {
        Self {
            booking_id: row.booking_id,
            user_id: row.user_id,
            ride_id: row.ride_id,
            booked_at: row.booked_at,
            name: row.name,
            ride: Ride::new(row.source, row.destination, row.distance, row.cost),
        }
    }
}

#[async_trait]
impl BookingStore for BookingManager {
    async fn create(
        &self,
        user_id: i32,
        ride_id: i32,
        booked_at: DateTime<Utc>,
    ) -> Result<i32, StoreError> {
        // the foreign keys on user_id and ride_id are what reject dangling references
        let id: i32 = sqlx::query(
            "INSERT INTO bookings (user_id, ride_id, booked_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(ride_id)
        .bind(booked_at)
        .fetch_one(&self.pool)
        .await?
        .get(0);

        Ok(id)
    }

    async fn get_details(&self, id: i32) -> Result<BookingDetails, StoreError> {
        let row: BookingRow = sqlx::query_as(
            r#"
            SELECT b.id AS booking_id, b.user_id, b.ride_id, b.booked_at,
                   i.name,
                   r.source, r.destination, r.distance, r.cost
            FROM bookings b
            JOIN identities i ON b.user_id = i.id
            JOIN rides r ON b.ride_id = r.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row.into())
    }
}

impl BookingManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
