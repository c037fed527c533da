use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::ServiceConfig;

pub type DatabaseClient = DatabaseConnection;

pub trait DatabaseClientExt: Sized {
    fn build_from_config(
        config: &ServiceConfig,
    ) -> impl std::future::Future<Output = Result<DatabaseConnection, String>>;
}

impl DatabaseClientExt for DatabaseClient {
    async fn build_from_config(config: &ServiceConfig) -> Result<DatabaseConnection, String> {
        let mut opt = ConnectOptions::new(config.db.get_url());
        opt.max_connections(config.db.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .map_err(|e| format!("Error in connecting to database: {}", e))?;
        Ok(db)
    }
}
