use abi::{StoreError, User};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::{UserManager, UserStore};

#[async_trait]
impl UserStore for UserManager {
    async fn create(&self, name: &str) -> Result<i32, StoreError> {
        let id: i32 = sqlx::query("INSERT INTO identities (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await?
            .get(0);

        Ok(id)
    }

    async fn get(&self, id: i32) -> Result<User, StoreError> {
        let (id, name): (i32, String) =
            sqlx::query_as("SELECT id, name FROM identities WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(StoreError::NotFound)?;

        Ok(User { id, name })
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM identities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

impl UserManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "needs DATABASE_URL pointing at a postgres server"]
    async fn create_then_get_should_work(pool: PgPool) {
        let manager = UserManager::new(pool);
        let id = manager.create("John Doe").await.unwrap();
        assert!(id > 0);

        let user = manager.get(id).await.unwrap();
        assert_eq!(
            user,
            User {
                id,
                name: "John Doe".to_string()
            }
        );
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "needs DATABASE_URL pointing at a postgres server"]
    async fn get_missing_user_should_be_not_found(pool: PgPool) {
        let manager = UserManager::new(pool);
        let err = manager.get(12345).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore = "needs DATABASE_URL pointing at a postgres server"]
    async fn delete_should_detect_zero_rows(pool: PgPool) {
        let manager = UserManager::new(pool);
        let id = manager.create("Jane Doe").await.unwrap();

        manager.delete(id).await.unwrap();
        let err = manager.delete(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
