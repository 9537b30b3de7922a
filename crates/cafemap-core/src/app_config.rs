use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub google_api_key: String,
    pub database_url: Option<String>,
    pub log_level: String,
    pub regions_path: PathBuf,
    pub language: String,
    pub search_keyword: String,
    pub search_radius_m: u32,
    pub grid_step_m: f64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("google_api_key", &"[redacted]")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("regions_path", &self.regions_path)
            .field("language", &self.language)
            .field("search_keyword", &self.search_keyword)
            .field("search_radius_m", &self.search_radius_m)
            .field("grid_step_m", &self.grid_step_m)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
