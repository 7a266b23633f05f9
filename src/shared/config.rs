use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shared::errors::PoolError;

/// Denominator for fee arithmetic in basis points
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Default trading fee: 30 bps = 0.3%
pub const DEFAULT_FEE_BPS: u32 = 30;

/// Pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Trading fee in basis points, retained by the pool as extra reserve
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u32,
}

fn default_fee_bps() -> u32 {
    DEFAULT_FEE_BPS
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS,
        }
    }
}

impl PoolConfig {
    /// Reject fees that would consume the whole input
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.fee_bps >= BPS_DENOMINATOR {
            return Err(PoolError::InvalidConfig(format!(
                "fee_bps must be below {}, got {}",
                BPS_DENOMINATOR, self.fee_bps
            )));
        }
        Ok(())
    }
}

/// Loader for the pool configuration file
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from Pool.toml in the working directory
    pub fn load_config() -> Result<PoolConfig, PoolError> {
        Self::load_from("Pool.toml")
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: impl AsRef<Path>) -> Result<PoolConfig, PoolError> {
        let config_content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PoolError::InvalidConfig(format!("failed to read config file: {}", e))
        })?;

        let config: PoolConfig = toml::from_str(&config_content).map_err(|e| {
            PoolError::InvalidConfig(format!("failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PoolConfig::default();
        assert_eq!(config.fee_bps, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fee_consuming_the_whole_input_is_rejected() {
        let config = PoolConfig { fee_bps: 10_000 };
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfig(_))
        ));
    }

    #[test]
    fn parses_fee_from_toml() {
        let config: PoolConfig = toml::from_str("fee_bps = 25").unwrap();
        assert_eq!(config.fee_bps, 25);
    }

    #[test]
    fn missing_fee_falls_back_to_default() {
        let config: PoolConfig = toml::from_str("").unwrap();
        assert_eq!(config.fee_bps, DEFAULT_FEE_BPS);
    }

    #[test]
    fn loads_the_checked_in_pool_toml() {
        let config = ConfigLoader::load_config().unwrap();
        assert_eq!(config.fee_bps, DEFAULT_FEE_BPS);
    }

    #[test]
    fn missing_config_file_is_reported() {
        assert!(matches!(
            ConfigLoader::load_from("no-such-file.toml"),
            Err(PoolError::InvalidConfig(_))
        ));
    }
}
