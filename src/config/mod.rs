pub mod app;
pub mod db;
pub mod jwt;
pub mod rewards;
pub mod server;
pub mod tracing;
use dotenv::dotenv;

#[derive(Clone, Default, Debug)]
pub struct ServiceConfig {
    pub db: db::DatabaseConfig,
    pub server: server::ServerConfig,
    pub jwt: jwt::JWTConfig,
    pub app: app::AppConfig,
    pub rewards: rewards::RewardsConfig,
}
impl ServiceConfig {
    pub fn init_from_env(&mut self) -> Result<(), String> {
        dotenv().ok();
        self.db.init_from_env()?;
        self.server.init_from_env()?;
        self.jwt.init_from_env()?;
        self.app.init_from_env()?;
        self.rewards = rewards::RewardsConfig::default();
        Ok(())
    }
}
