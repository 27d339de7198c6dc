use abi::{Ride, StoreError};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::{RideManager, RideStore};

#[async_trait]
impl RideStore for RideManager {
    async fn create(&self, ride: &Ride) -> Result<i32, StoreError> {
        let id: i32 = sqlx::query(
            "INSERT INTO rides (source, destination, distance, cost) VALUES ($1, $2, $3, $4) RETURNING id")
            .bind(ride.source.as_str())
            .bind(ride.destination.as_str())
            .bind(ride.distance)
            .bind(ride.cost)
            .fetch_one(&self.pool)
            .await?
            .get(0);

        Ok(id)
    }

    async fn get(&self, id: i32) -> Result<Ride, StoreError> {
        let (source, destination, distance, cost): (String, String, i32, i32) =
            sqlx::query_as("SELECT source, destination, distance, cost FROM rides WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound)?;

        Ok(Ride::new(source, destination, distance, cost))
    }

    async fn update(&self, id: i32, ride: &Ride) -> Result<(), StoreError> {
        // zero affected rows is the only not-found signal, postgres does not raise one
        let result = sqlx::query(
            "UPDATE rides SET source = $1, destination = $2, distance = $3, cost = $4 WHERE id = $5")
            .bind(ride.source.as_str())
            .bind(ride.destination.as_str())
            .bind(ride.distance)
            .bind(ride.cost)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

impl RideManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "needs DATABASE_URL pointing at a postgres server"]
    async fn create_then_update_should_work(pool: PgPool) {
        let manager = RideManager::new(pool);
        let id = manager
            .create(&Ride::new("Downtown", "Airport", 20, 500))
            .await
            .unwrap();
        assert!(id > 0);

        let updated = Ride::new("Airport", "Harbour", 35, 800);
        manager.update(id, &updated).await.unwrap();
        assert_eq!(manager.get(id).await.unwrap(), updated);
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "needs DATABASE_URL pointing at a postgres server"]
    async fn update_missing_ride_should_be_not_found(pool: PgPool) {
        let manager = RideManager::new(pool);
        let err = manager
            .update(404, &Ride::new("Downtown", "Airport", 20, 500))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "needs DATABASE_URL pointing at a postgres server"]
    async fn negative_distance_should_fail_the_insert(pool: PgPool) {
        let manager = RideManager::new(pool);
        let err = manager
            .create(&Ride::new("Downtown", "Airport", -1, 500))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OperationFailed(_)));
    }
}
