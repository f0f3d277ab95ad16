use std::{path::Path, sync::OnceLock};

use tracing::debug;

use crate::errors::ConfigError;

const CONFIG_TARGET: &str = "algoscope::config";

/// Default `strftime` pattern for transaction timestamps.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%d %B %Y %H:%M:%S";
/// Average seconds between blocks, used for upgrade estimates only.
pub const DEFAULT_BLOCK_TIME_SECS: f64 = 4.5;

const BETANET_DISPENSERS: [&str; 2] = [
    "https://betanet.algoexplorer.io/dispenser",
    "https://bank.betanet.algodev.network/",
];
const TESTNET_DISPENSERS: [&str; 2] = [
    "https://testnet.algoexplorer.io/dispenser",
    "https://bank.testnet.algorand.network",
];

fn parse_links(links: &[&str]) -> Vec<url::Url> {
    links.iter().filter_map(|link| link.parse().ok()).collect()
}

/// Values that identify a network from its `/versions` response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GenesisConstants {
    pub mainnet_hash: String,
    pub testnet_hash: String,
    pub betanet_hash: String,
    /// Sandboxes are recognised by genesis id, their hash differs per install.
    pub sandbox_genesis_id: String,
}

impl Default for GenesisConstants {
    fn default() -> Self {
        Self {
            mainnet_hash: "wGHE2Pwdvd7S12BL5FaOP20EGYesN73ktiC1qzkkit8=".to_string(),
            testnet_hash: "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=".to_string(),
            betanet_hash: "mFgazF8ZSwGmM8Q8L45NbfBiKQk0ctVOBYIm1zPO4i8=".to_string(),
            sandbox_genesis_id: "sandnet-v1".to_string(),
        }
    }
}

/// Consensus versions a sandbox node is expected to run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ConsensusVersions {
    pub stable: String,
    pub beta: String,
    pub master: String,
    pub nightly: String,
}

impl Default for ConsensusVersions {
    fn default() -> Self {
        Self {
            stable: "https://github.com/algorandfoundation/specs/tree/abd3d4823c6f77349fc04c3af7b1e99fe4df699f".to_string(),
            beta: "https://github.com/algorandfoundation/specs/tree/236dcc18c9c507d794813ab768e467ea42d1b4d9".to_string(),
            master: "https://github.com/algorandfoundation/specs/tree/925a46433742afb0b51bb939354bd907fa88bf95".to_string(),
            nightly: "https://github.com/algorandfoundation/specs/tree/5615adc36bad610c7f165fa2967f4ecfa75125f0".to_string(),
        }
    }
}

/// Community faucets for public test networks.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DispenserLinks {
    pub betanet: Vec<url::Url>,
    pub testnet: Vec<url::Url>,
}

impl Default for DispenserLinks {
    fn default() -> Self {
        Self {
            betanet: parse_links(&BETANET_DISPENSERS),
            testnet: parse_links(&TESTNET_DISPENSERS),
        }
    }
}

/// Settings the explorer core needs to classify networks and format values.
///
/// [`ExplorerConfig::default`] carries the public network values. A TOML file
/// may override any subset of them:
///
/// ```toml
/// block_time_secs = 3.3
///
/// [genesis]
/// sandbox_genesis_id = "dockernet-v1"
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub genesis: GenesisConstants,
    pub consensus: ConsensusVersions,
    pub block_time_secs: f64,
    pub timestamp_format: String,
    pub dispenser_links: DispenserLinks,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            genesis: GenesisConstants::default(),
            consensus: ConsensusVersions::default(),
            block_time_secs: DEFAULT_BLOCK_TIME_SECS,
            timestamp_format: TIMESTAMP_DISPLAY_FORMAT.to_string(),
            dispenser_links: DispenserLinks::default(),
        }
    }
}

impl ExplorerConfig {
    /// The built-in configuration, shared by views created without one.
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<ExplorerConfig> = OnceLock::new();
        SHARED.get_or_init(Self::default)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(source)?;
        debug!(target: CONFIG_TARGET, "Explorer config parsed");
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        debug!(target: CONFIG_TARGET, path = %path.display(), "Explorer config loaded");
        Self::from_toml_str(&source)
    }

    pub fn with_sandbox_genesis_id(mut self, genesis_id: impl Into<String>) -> Self {
        self.genesis.sandbox_genesis_id = genesis_id.into();
        self
    }

    pub fn with_consensus_versions(mut self, consensus: ConsensusVersions) -> Self {
        self.consensus = consensus;
        self
    }

    /// Set the average block time. Default is 4.5 seconds.
    pub fn with_block_time_secs(mut self, block_time_secs: f64) -> Self {
        self.block_time_secs = block_time_secs;
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn with_dispenser_links(mut self, dispenser_links: DispenserLinks) -> Self {
        self.dispenser_links = dispenser_links;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_dispensers_for_test_networks() {
        let config = ExplorerConfig::default();
        assert_eq!(config.dispenser_links.betanet.len(), 2);
        assert_eq!(config.dispenser_links.testnet.len(), 2);
        assert_eq!(config.block_time_secs, DEFAULT_BLOCK_TIME_SECS);
    }

    #[test]
    fn toml_overrides_only_given_fields() {
        let config = ExplorerConfig::from_toml_str(
            r#"
            block_time_secs = 3.3

            [genesis]
            sandbox_genesis_id = "dockernet-v1"
            "#,
        )
        .unwrap();

        assert_eq!(config.block_time_secs, 3.3);
        assert_eq!(config.genesis.sandbox_genesis_id, "dockernet-v1");
        assert_eq!(
            config.genesis.mainnet_hash,
            GenesisConstants::default().mainnet_hash
        );
        assert_eq!(config.timestamp_format, TIMESTAMP_DISPLAY_FORMAT);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            ExplorerConfig::from_toml_str("block_time_secs = \"fast\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            ExplorerConfig::from_toml_file("/definitely/not/here.toml"),
            Err(ConfigError::ReadError(_))
        ));
    }
}
