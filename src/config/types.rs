use serde::Deserialize;

/// Main configuration structure for Shop-Sweep
///
/// Every section falls back to the built-in defaults, so an empty file is a
/// valid configuration that crawls the stock category list.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default = "default_categories", rename = "category")]
    pub categories: Vec<CategoryEntry>,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub fetcher: FetcherConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            categories: default_categories(),
            schedule: ScheduleConfig::default(),
            fetcher: FetcherConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Target shop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Origin that relative product and image links are resolved against
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// A category listing to crawl
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    /// URL of the first listing page
    pub url: String,
}

/// Recurring run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Days between the start of consecutive runs
    #[serde(rename = "interval-days", default = "default_interval_days")]
    pub interval_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_days: default_interval_days(),
        }
    }
}

/// Page fetching configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Client identity sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixed pause before every request (milliseconds)
    #[serde(rename = "request-pause-ms", default)]
    pub request_pause_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            request_pause_ms: 0,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON catalog document
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when no verbosity flag is given
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional file that mirrors console output
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.zveromir.ru/".to_string()
}

fn default_categories() -> Vec<CategoryEntry> {
    [
        "https://www.zveromir.ru/shop/perenoski_dlya_sobak/",
        "https://www.zveromir.ru/shop/suhoy_korm_dlya_koshek/",
        "https://www.zveromir.ru/shop/furminatori/",
    ]
    .into_iter()
    .map(|url| CategoryEntry {
        url: url.to_string(),
    })
    .collect()
}

fn default_interval_days() -> u32 {
    3
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_path() -> String {
    "shop_data.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> Option<String> {
    Some("parser.log".to_string())
}
