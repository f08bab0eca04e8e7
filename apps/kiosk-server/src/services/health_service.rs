//! Health check service.
//!
//! Backs `GET /health` for load balancers and the kiosk's keepalive.

use tracing::{debug, warn};

use kiosk_db::Database;

/// Result of one health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingStatus {
    Serving,
    NotServing,
}

#[derive(Debug, Clone)]
pub struct HealthService {
    db: Database,
}

impl HealthService {
    pub fn new(db: Database) -> Self {
        HealthService { db }
    }

    /// Overall status. Only the database can take the server down.
    pub async fn check(&self) -> ServingStatus {
        if !self.db.health_check().await {
            warn!("Database health check failed");
            return ServingStatus::NotServing;
        }

        match self.db.migration_status().await {
            Ok((applied, total)) => debug!(applied, total, "Migration status"),
            Err(e) => debug!(error = %e, "Could not read migration status"),
        }

        ServingStatus::Serving
    }
}
