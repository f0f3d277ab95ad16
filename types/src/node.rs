use serde::{Deserialize, Serialize};

/// `GET /v2/status` of the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NodeStatus {
    pub last_round: u64,
    pub last_version: String,
    pub next_version: String,
    pub next_version_round: u64,
    pub next_version_supported: bool,
    /// Nanoseconds spent catching up; zero once the node is synced.
    pub catchup_time: u64,
    pub time_since_last_round: u64,
    pub stopped_at_unsupported_round: bool,
    pub catchpoint: Option<String>,
    pub catchpoint_total_blocks: Option<u64>,
    pub catchpoint_acquired_blocks: Option<u64>,
    pub catchpoint_total_accounts: Option<u64>,
    pub catchpoint_processed_accounts: Option<u64>,
    pub catchpoint_verified_accounts: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildVersion {
    pub major: u64,
    pub minor: u64,
    pub build_number: u64,
    pub branch: String,
    pub channel: String,
    pub commit_hash: String,
}

/// `GET /versions` of the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsCheck {
    pub genesis_id: String,
    pub genesis_hash_b64: String,
    pub build: BuildVersion,
    pub versions: Vec<String>,
}

/// `GET /genesis` of the node, reduced to what the explorer shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genesis {
    pub id: String,
    pub network: String,
    pub proto: String,
    /// Fee sink address.
    pub fees: String,
    /// Rewards pool address.
    pub rwd: String,
    pub timestamp: Option<i64>,
}

/// `GET /health` of the indexer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Health {
    pub round: u64,
    pub db_available: bool,
    pub is_migrating: bool,
    pub message: String,
    pub version: String,
}

/// The four status payloads fetched together. They are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatusBundle {
    pub status: NodeStatus,
    pub versions: VersionsCheck,
    pub genesis: Genesis,
    pub health: Health,
}
