use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PaymentPayload {
    pub receiver: String,
    pub amount: u64,
    pub close_remainder_to: Option<String>,
    pub close_amount: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AssetTransferPayload {
    pub asset_id: u64,
    pub amount: u64,
    pub receiver: String,
    pub close_to: Option<String>,
    pub close_amount: Option<u64>,
    /// Clawback source, set only when the transfer is a revocation.
    pub sender: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AssetFreezePayload {
    pub address: String,
    pub asset_id: u64,
    pub new_freeze_status: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AssetParams {
    pub creator: String,
    pub decimals: u64,
    pub total: u64,
    pub default_frozen: Option<bool>,
    pub name: Option<String>,
    pub unit_name: Option<String>,
    pub url: Option<String>,
    pub metadata_hash: Option<String>,
    pub manager: Option<String>,
    pub reserve: Option<String>,
    pub freeze: Option<String>,
    pub clawback: Option<String>,
}

/// Payload of an asset configuration. A creation carries `asset-id` of zero or
/// none at all; the created index lives on the record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AssetConfigPayload {
    pub asset_id: Option<u64>,
    pub params: Option<AssetParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct KeyRegPayload {
    pub vote_participation_key: Option<String>,
    pub selection_participation_key: Option<String>,
    pub state_proof_key: Option<String>,
    pub vote_first_valid: Option<u64>,
    pub vote_last_valid: Option<u64>,
    pub vote_key_dilution: Option<u64>,
    pub non_participation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StateSchema {
    pub num_uint: u64,
    pub num_byte_slice: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AppCallPayload {
    pub application_id: u64,
    pub on_completion: String,
    pub application_args: Vec<String>,
    pub accounts: Vec<String>,
    pub foreign_apps: Vec<u64>,
    pub foreign_assets: Vec<u64>,
    pub approval_program: Option<String>,
    pub clear_state_program: Option<String>,
    pub global_state_schema: Option<StateSchema>,
    pub local_state_schema: Option<StateSchema>,
    pub extra_program_pages: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StateProofPayload {
    pub state_proof_type: Option<u64>,
    pub state_proof: Option<serde_json::Value>,
    pub message: Option<serde_json::Value>,
}
