use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub webhook_api_key: String,
    /// "dev" unlocks the destructive /admin/reset endpoint.
    pub platform: String,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            webhook_api_key: required("WEBHOOK_API_KEY")?,
            platform: env::var("PLATFORM").unwrap_or_else(|_| "production".into()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./static".into()),
        })
    }

    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}
