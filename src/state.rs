//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The SQLite pool is the only shared resource: sessions, accounts, and the
//! course/scholarship catalog all live in the database, so handlers stay
//! stateless between requests.

use sqlx::SqlitePool;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — the pool is internally reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Create a test `AppState` backed by a fresh in-memory SQLite database
    /// with migrations applied. A single connection keeps the database alive
    /// for the lifetime of the pool.
    pub async fn test_app_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should connect");
        sqlx::migrate!("src/db/migrations")
            .run(&pool)
            .await
            .expect("migrations should apply");
        AppState::new(pool)
    }

    /// Test state with the sample catalog seeded.
    pub async fn seeded_app_state() -> AppState {
        let state = test_app_state().await;
        crate::services::catalog::seed_if_empty(&state.pool)
            .await
            .expect("catalog seed should succeed");
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_state_runs_migrations() {
        let state = test_helpers::test_app_state().await;
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&state.pool)
            .await
            .unwrap();
        assert_eq!(users, 0);
    }

    #[tokio::test]
    async fn seeded_app_state_has_catalog_rows() {
        let state = test_helpers::seeded_app_state().await;
        let courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&state.pool)
            .await
            .unwrap();
        assert_eq!(courses, 3);
    }
}
