use serde::Deserialize;

/// Main configuration structure for chemharvest
///
/// Every table and key is optional; omitted values fall back to defaults, so
/// running without a config file is equivalent to an empty TOML document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub harvest: HarvestConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Overall request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Disables TLS certificate validation
    ///
    /// The target catalog's certificate chain does not validate; the shipped
    /// config enables this for that host. Off unless explicitly requested.
    #[serde(rename = "accept-invalid-certs", default)]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

/// Harvest pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestConfig {
    /// Concurrency bound for both fan-out phases; 0 means twice the number
    /// of available CPU cores
    #[serde(default)]
    pub concurrency: usize,

    /// Whether to extract the safety-data-sheet and image links
    #[serde(rename = "include-media", default = "default_true")]
    pub include_media: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            concurrency: 0,
            include_media: true,
        }
    }
}

fn default_user_agent() -> String {
    format!("chemharvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}
