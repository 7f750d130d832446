use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shift convention for EMA/RSI delta computation.
///
/// The original pipeline computed EMA and RSI against the *next*
/// observation (a forward shift) instead of the conventional backward
/// recursion. `Forward` reproduces that behaviour exactly; `Backward`
/// selects the textbook definition. Changing the convention changes
/// every downstream feature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftConvention {
    /// Deltas and smoothing reference the next observation (legacy parity).
    Forward,
    /// Deltas and smoothing reference the previous observation.
    Backward,
}

impl Default for ShiftConvention {
    fn default() -> Self {
        ShiftConvention::Forward
    }
}

/// Object-store connection settings.
///
/// `endpoint`, `access_key` and `secret_key` belong to remote
/// deployments; the bundled filesystem store only uses `root` and
/// `bucket`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreConfig {
    /// Store endpoint, e.g. `http://localhost:9000`.
    #[serde(default)]
    pub endpoint: String,
    /// Access key for remote stores.
    #[serde(default)]
    pub access_key: String,
    /// Secret key for remote stores.
    #[serde(default)]
    pub secret_key: String,
    /// Bucket holding raw and processed partitions.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Local root directory for the filesystem store.
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            bucket: default_bucket(),
            root: default_store_root(),
        }
    }
}

/// Pipeline configuration.
///
/// Every constant the original pipeline hard-coded (host, credentials,
/// bucket, symbol, interval, feature window) is an explicit named field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Object-store connection settings.
    #[serde(default)]
    pub object_store: ObjectStoreConfig,
    /// Trading symbol, e.g. `BTCUSDT`.
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Candle interval, e.g. `1h`.
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Optional exchange API key (klines are public; kept for parity).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Rolling window size for the indicator set.
    #[serde(default = "default_feature_window")]
    pub feature_window: usize,
    /// Shift convention for EMA/RSI.
    #[serde(default)]
    pub shift: ShiftConvention,
    /// Standard-deviation multiplier for the Bollinger bands.
    #[serde(default = "default_bollinger_std_factor")]
    pub bollinger_std_factor: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            object_store: ObjectStoreConfig::default(),
            symbol: default_symbol(),
            interval: default_interval(),
            api_key: None,
            feature_window: default_feature_window(),
            shift: ShiftConvention::default(),
            bollinger_std_factor: default_bollinger_std_factor(),
        }
    }
}

impl PipelineConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    /// - [`ConfigError::Io`] when the file cannot be read.
    /// - [`ConfigError::Json`] when the file is not valid JSON.
    /// - [`ConfigError::Invalid`] when a field fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field constraints.
    ///
    /// # Errors
    /// - [`ConfigError::Invalid`] when a field is out of range or empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feature_window < 2 {
            return Err(ConfigError::Invalid(format!(
                "feature_window must be at least 2, got {}",
                self.feature_window
            )));
        }
        if self.symbol.is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.interval.is_empty() {
            return Err(ConfigError::Invalid("interval must not be empty".into()));
        }
        if self.object_store.bucket.is_empty() {
            return Err(ConfigError::Invalid("bucket must not be empty".into()));
        }
        if !self.bollinger_std_factor.is_finite() || self.bollinger_std_factor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bollinger_std_factor must be positive, got {}",
                self.bollinger_std_factor
            )));
        }
        Ok(())
    }
}

fn default_bucket() -> String {
    "btc-prediction".to_string()
}

fn default_store_root() -> PathBuf {
    PathBuf::from("data/object_store")
}

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_interval() -> String {
    "1h".to_string()
}

fn default_feature_window() -> usize {
    4
}

fn default_bollinger_std_factor() -> f64 {
    2.0
}
