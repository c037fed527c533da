use std::env;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the web client, used to build shareable referral links.
    pub frontend_url: String,
    pub password_hash_cost: u32,
    pub seed_courses: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            password_hash_cost: bcrypt::DEFAULT_COST,
            seed_courses: false,
        }
    }
}

impl AppConfig {
    pub fn init_from_env(&mut self) -> Result<(), String> {
        if let Ok(url) = env::var("FRONTEND_URL") {
            self.frontend_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(cost) = env::var("PASSWORD_HASH_COST") {
            self.password_hash_cost = cost
                .parse::<u32>()
                .map_err(|_| "PASSWORD_HASH_COST is not a valid u32".to_string())?;
        }

        if let Ok(seed) = env::var("SEED_COURSES") {
            self.seed_courses = seed
                .parse::<bool>()
                .map_err(|_| "SEED_COURSES must be `true` or `false`".to_string())?;
        }

        Ok(())
    }

    pub fn referral_link(&self, referral_code: &str) -> String {
        format!("{}/register?r={}", self.frontend_url, referral_code)
    }
}
