/// Environment variable holding the REST base URL.
pub const API_URL_ENV: &str = "BOXCRAFT_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(baseUrl: impl Into<String>) -> Self {
        let baseUrl: String = baseUrl.into();
        Self {
            base_url: baseUrl.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Runtime environment first, then the value baked in at build time (the
    /// wasm client has no process environment), then the local default.
    pub fn from_env() -> Self {
        let baseUrl = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| option_env!("BOXCRAFT_API_URL").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(baseUrl)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
