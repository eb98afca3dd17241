use std::sync::Arc;
use std::time::Duration;

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use auth::rate_limit::RateLimiter;
use config::Config;
use services::clock::DateProvider;
use services::mood::MoodService;
use services::stress_map::StressMap;
use services::upstream::UpstreamClient;
use store::Store;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn Store>,
    pub moods: MoodService,
    pub upstream: UpstreamClient,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn Store>,
        dates: Arc<dyn DateProvider>,
    ) -> anyhow::Result<Self> {
        let moods = MoodService::new(store.clone(), StressMap::default(), dates);
        let upstream = UpstreamClient::new(&config)?;
        let rate_limiter = RateLimiter::new(
            config.auth_rate_limit_max,
            Duration::from_secs(config.auth_rate_limit_window_secs),
        );

        Ok(Self {
            config,
            store,
            moods,
            upstream,
            rate_limiter,
        })
    }
}
