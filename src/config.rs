use std::env;

use anyhow::Context;

const DEFAULT_IMAGE_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Without it the server keeps everything in memory.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,

    pub auth_rate_limit_max: u32,
    pub auth_rate_limit_window_secs: u64,

    pub rag_chat_url: String,
    pub huggingface_api_key: String,
    pub image_model_url: String,
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "5000")
                .parse()
                .context("PORT must be a number")?,
            frontend_url: var_or("FRONTEND_URL", "http://localhost:5173"),
            cors_extra_origins: lookup("CORS_EXTRA_ORIGINS")
                .map(|extra| {
                    extra
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            jwt_secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .context("JWT_SECRET must be set")?,
            jwt_ttl_secs: var_or("JWT_TTL_SECS", "3600")
                .parse()
                .context("JWT_TTL_SECS must be a number")?,

            auth_rate_limit_max: var_or("AUTH_RATE_LIMIT_MAX", "5")
                .parse()
                .context("AUTH_RATE_LIMIT_MAX must be a number")?,
            auth_rate_limit_window_secs: var_or("AUTH_RATE_LIMIT_WINDOW_SECS", "60")
                .parse()
                .context("AUTH_RATE_LIMIT_WINDOW_SECS must be a number")?,

            rag_chat_url: var_or("RAG_CHAT_URL", "http://127.0.0.1:5001/rag_chat"),
            huggingface_api_key: lookup("HUGGINGFACE_API_KEY").unwrap_or_default(),
            image_model_url: var_or("IMAGE_MODEL_URL", DEFAULT_IMAGE_MODEL_URL),
            upstream_timeout_secs: var_or("UPSTREAM_TIMEOUT_SECS", "30")
                .parse()
                .context("UPSTREAM_TIMEOUT_SECS must be a number")?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
        assert_eq!(config.jwt_ttl_secs, 3600);
        assert_eq!(config.auth_rate_limit_max, 5);
        assert_eq!(config.auth_rate_limit_window_secs, 60);
        assert_eq!(config.rag_chat_url, "http://127.0.0.1:5001/rag_chat");
        assert_eq!(config.image_model_url, DEFAULT_IMAGE_MODEL_URL);
        assert!(config.cors_extra_origins.is_empty());
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_bad_port_fails() {
        let result = Config::from_lookup(lookup_from(&[("JWT_SECRET", "x"), ("PORT", "http")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_origins_split() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("CORS_EXTRA_ORIGINS", "http://a.local, ,http://b.local"),
            ("DATABASE_URL", ""),
        ]))
        .unwrap();
        assert_eq!(
            config.cors_extra_origins,
            vec!["http://a.local".to_string(), "http://b.local".to_string()]
        );
        assert_eq!(config.database_url, None);
    }
}
