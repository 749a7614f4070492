use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// GreenPoints earning and redemption rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointsRules {
    pub welcome_bonus: i64,
    pub charging_base: i64,
    pub points_per_kwh: i64,
    pub service_visit: i64,
    pub referral: i64,
    pub booking: i64,
    /// Points needed for 1.00 of charging discount.
    pub discount_points_per_unit: i64,
    /// Points needed for 1.00 of service partner voucher.
    pub voucher_points_per_unit: i64,
}

impl Default for PointsRules {
    fn default() -> Self {
        Self {
            welcome_bonus: 200,
            charging_base: 10,
            points_per_kwh: 2,
            service_visit: 25,
            referral: 100,
            booking: 10,
            discount_points_per_unit: 10,
            voucher_points_per_unit: 5,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_booking_duration")]
    pub default_duration_minutes: u16,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default)]
    pub points: PointsRules,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_booking_duration() -> u16 {
    30
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_duration_minutes: default_booking_duration(),
            separator_char: default_separator_char(),
            points: PointsRules::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("greenpoint")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".greenpoint")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("greenpoint.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("greenpoint.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration directory, config file and database file.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("greenpoint.sqlite"),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // test mode never touches the user's config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config.database)
    }
}
