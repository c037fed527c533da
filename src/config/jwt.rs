use std::env;

/// Seven days, the lifetime of a login token unless configured otherwise.
const DEFAULT_ACCESS_TOKEN_EXPIRED_DATE: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Default)]
pub struct JWTConfig {
    pub secret: String,
    pub access_token_expired_date: u64,
}

impl JWTConfig {
    pub fn init_from_env(&mut self) -> Result<(), String> {
        self.secret =
            env::var("JWT_SECRET").map_err(|_| "JWT_SECRET not set in environment".to_string())?;

        // Lifetime of issued tokens in seconds
        self.access_token_expired_date = match env::var("JWT_ACCESS_TOKEN_EXPIRED_DATE") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| "JWT_ACCESS_TOKEN_EXPIRED_DATE is not a valid u64".to_string())?,
            Err(_) => DEFAULT_ACCESS_TOKEN_EXPIRED_DATE,
        };

        Ok(())
    }
}
