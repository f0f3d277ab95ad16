use std::time::Duration;

use algoscope_types::{Genesis, Health, NetworkName, NodeStatus, NodeStatusBundle, VersionsCheck};
use tracing::trace;

use crate::{common::utils::humanize_duration, config::ExplorerConfig};

const NODE_TARGET: &str = "algoscope::node";

/// Indexer rounds the indexer may trail the node by and still count as synced.
pub const INDEXER_LAG_TOLERANCE: i64 = 50;
/// Remaining blocks above which a scheduled protocol upgrade is worth showing.
pub const PROTOCOL_UPGRADE_THRESHOLD: i64 = 100;
/// Consensus version reported by nodes running unreleased protocol rules.
pub const FUTURE_CONSENSUS_VERSION: &str = "future";

const OUTDATED_CONSENSUS_MESSAGE: &str = "Node has outdated consensus";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusValidation {
    pub valid: bool,
    pub message: &'static str,
}

/// Network identity and sync posture derived from the node's status payloads.
///
/// Nothing here validates its input: incomplete payloads yield meaningless but
/// harmless values (zero rounds, negative lag), never errors.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a> {
    status: &'a NodeStatus,
    versions: &'a VersionsCheck,
    genesis: &'a Genesis,
    health: &'a Health,
    config: &'a ExplorerConfig,
}

impl<'a> NodeView<'a> {
    pub fn new(
        status: &'a NodeStatus,
        versions: &'a VersionsCheck,
        genesis: &'a Genesis,
        health: &'a Health,
    ) -> Self {
        Self {
            status,
            versions,
            genesis,
            health,
            config: ExplorerConfig::shared(),
        }
    }

    pub fn from_bundle(bundle: &'a NodeStatusBundle) -> Self {
        Self::new(
            &bundle.status,
            &bundle.versions,
            &bundle.genesis,
            &bundle.health,
        )
    }

    /// Use network constants other than the built-in ones.
    pub const fn with_config(mut self, config: &'a ExplorerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn genesis_id(&self) -> &'a str {
        &self.versions.genesis_id
    }

    pub fn genesis_hash(&self) -> &'a str {
        &self.versions.genesis_hash_b64
    }

    pub fn is_sandbox(&self) -> bool {
        self.genesis_id() == self.config.genesis.sandbox_genesis_id
    }

    pub fn is_betanet(&self) -> bool {
        self.genesis_hash() == self.config.genesis.betanet_hash
    }

    pub fn is_testnet(&self) -> bool {
        self.genesis_hash() == self.config.genesis.testnet_hash
    }

    pub fn is_mainnet(&self) -> bool {
        self.genesis_hash() == self.config.genesis.mainnet_hash
    }

    pub fn network(&self) -> Option<NetworkName> {
        if self.is_sandbox() {
            Some(NetworkName::Sandbox)
        } else if self.is_mainnet() {
            Some(NetworkName::Mainnet)
        } else if self.is_testnet() {
            Some(NetworkName::Testnet)
        } else if self.is_betanet() {
            Some(NetworkName::Betanet)
        } else {
            None
        }
    }

    /// Community faucets. Mainnet has none and sandboxes use their own.
    pub fn dispenser_links(&self) -> &'a [url::Url] {
        let links = &self.config.dispenser_links;
        if self.is_betanet() {
            &links.betanet
        } else if self.is_testnet() {
            &links.testnet
        } else {
            &[]
        }
    }

    pub fn fee_sink_address(&self) -> &'a str {
        &self.genesis.fees
    }

    pub fn rewards_pool_address(&self) -> &'a str {
        &self.genesis.rwd
    }

    pub fn build_version(&self) -> String {
        let build = &self.versions.build;
        format!(
            "{}.{}.{} [Branch: {}] [Channel: {}]",
            build.major, build.minor, build.build_number, build.branch, build.channel
        )
    }

    pub fn consensus_version(&self) -> &'a str {
        &self.status.last_version
    }

    pub fn has_future_consensus(&self) -> bool {
        self.consensus_version() == FUTURE_CONSENSUS_VERSION
    }

    /// A sandbox is its own reference; other networks advertise the next version.
    pub fn latest_consensus_version(&self) -> &'a str {
        if self.is_sandbox() {
            self.consensus_version()
        } else {
            &self.status.next_version
        }
    }

    pub fn has_latest_consensus_version(&self) -> bool {
        self.consensus_version() == self.latest_consensus_version()
    }

    /// Checks a sandbox's consensus version against the known release channels.
    ///
    /// Only meaningful on a sandbox: every other network reports the outdated
    /// message, so gate display on [`NodeView::is_sandbox`].
    pub fn consensus_freshness(&self) -> ConsensusValidation {
        let outdated = ConsensusValidation {
            valid: false,
            message: OUTDATED_CONSENSUS_MESSAGE,
        };
        if !self.is_sandbox() {
            return outdated;
        }

        let versions = &self.config.consensus;
        let version = self.consensus_version();
        let message = if version == versions.stable {
            "Node has latest stable version"
        } else if version == versions.beta {
            "Node has latest beta version"
        } else if version == versions.master || version == versions.nightly {
            "Node has master/nightly consensus version"
        } else if self.has_future_consensus() {
            "Node has unreleased(future) consensus version"
        } else {
            trace!(target: NODE_TARGET, version, "Sandbox consensus version is not a known release");
            return outdated;
        };

        ConsensusValidation {
            valid: true,
            message,
        }
    }

    pub fn has_caught_up(&self) -> bool {
        self.status.catchup_time == 0
    }

    /// Catch-up time so far, e.g. `"3 minutes, 12 seconds"`.
    pub fn catchup_duration_display(&self) -> String {
        humanize_duration(Duration::from_nanos(self.status.catchup_time), 2)
    }

    /// Blocks the indexer trails the node by. Negative if the indexer reports
    /// a later round than the node.
    pub fn indexer_lag_blocks(&self) -> i64 {
        self.status.last_round as i64 - self.health.round as i64
    }

    pub fn indexer_has_caught_up(&self) -> bool {
        self.indexer_lag_blocks() <= INDEXER_LAG_TOLERANCE
    }

    pub fn protocol_upgrade_round(&self) -> u64 {
        self.status.next_version_round
    }

    pub fn protocol_upgrade_remaining_blocks(&self) -> i64 {
        self.protocol_upgrade_round() as i64 - self.status.last_round as i64
    }

    pub fn protocol_upgrade_pending(&self) -> bool {
        self.protocol_upgrade_remaining_blocks() > PROTOCOL_UPGRADE_THRESHOLD
    }

    /// Estimated milliseconds until the upgrade, assuming a steady block time.
    pub fn protocol_upgrade_eta_millis(&self) -> f64 {
        self.protocol_upgrade_remaining_blocks() as f64 * self.config.block_time_secs * 1000.0
    }
}
