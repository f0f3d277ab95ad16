use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::errors::NetworkNameError;

/// Networks the explorer knows by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkName {
    Mainnet,
    Testnet,
    Betanet,
    Sandbox,
}

impl NetworkName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Betanet => "betanet",
            Self::Sandbox => "sandbox",
        }
    }
}

impl Display for NetworkName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkName {
    type Err = NetworkNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "betanet" => Ok(Self::Betanet),
            "sandbox" => Ok(Self::Sandbox),
            unknown => Err(NetworkNameError::UnknownNetwork(unknown.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_only() {
        assert_eq!("betanet".parse::<NetworkName>(), Ok(NetworkName::Betanet));
        assert_eq!(NetworkName::Sandbox.to_string(), "sandbox");
        assert_eq!(
            "localnet".parse::<NetworkName>(),
            Err(NetworkNameError::UnknownNetwork("localnet".to_string()))
        );
    }
}
