#[derive(Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub service_role_key: String,
    pub bucket: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub upload_delay_ms: u64,
    pub user_agent: String,
    pub warm_concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("supabase_url", &self.supabase_url)
            .field("service_role_key", &"[redacted]")
            .field("bucket", &self.bucket)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("upload_delay_ms", &self.upload_delay_ms)
            .field("user_agent", &self.user_agent)
            .field("warm_concurrency", &self.warm_concurrency)
            .finish()
    }
}
