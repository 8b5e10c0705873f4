use crate::errors::config::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(thiserror::Error, PartialEq, Eq, Debug, Clone)]
pub enum NetworkKindError {
    #[error("Invalid network kind: {0}")]
    InvalidNetworkKind(String),
}

/// The networks a node can run on. Every consensus and policy constant in
/// this crate is keyed by one of these kinds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Main,
    Test,
    RegTest,
    UnitTest,
}

impl NetworkKind {
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Maps the classic `--testnet` / `--regtest` startup flags to a kind.
    /// Passing both flags at once is a configuration error.
    pub fn from_flags(testnet: bool, regtest: bool) -> ConfigResult<Self> {
        match (testnet, regtest) {
            (true, true) => Err(ConfigError::MixedTestnetAndRegtest),
            (true, false) => Ok(NetworkKind::Test),
            (false, true) => Ok(NetworkKind::RegTest),
            (false, false) => Ok(NetworkKind::Main),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        static NETWORK_KINDS: [NetworkKind; 4] =
            [NetworkKind::Main, NetworkKind::Test, NetworkKind::RegTest, NetworkKind::UnitTest];
        NETWORK_KINDS.iter().copied()
    }
}

impl TryFrom<&str> for NetworkKind {
    type Error = NetworkKindError;
    fn try_from(network_kind: &str) -> Result<Self, Self::Error> {
        match network_kind {
            "main" => Ok(NetworkKind::Main),
            "test" => Ok(NetworkKind::Test),
            "regtest" => Ok(NetworkKind::RegTest),
            "unittest" => Ok(NetworkKind::UnitTest),
            _ => Err(NetworkKindError::InvalidNetworkKind(network_kind.to_string())),
        }
    }
}

impl FromStr for NetworkKind {
    type Err = NetworkKindError;
    fn from_str(network_kind: &str) -> Result<Self, Self::Err> {
        NetworkKind::try_from(network_kind.to_lowercase().as_str())
    }
}

impl Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NetworkKind::Main => "main",
            NetworkKind::Test => "test",
            NetworkKind::RegTest => "regtest",
            NetworkKind::UnitTest => "unittest",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_kind_parse_roundtrip() {
        for kind in NetworkKind::iter() {
            assert_eq!(kind, kind.to_string().parse().unwrap());
        }
    }

    #[test]
    fn test_network_kind_parse() {
        struct Test {
            name: &'static str,
            expr: &'static str,
            expected: Result<NetworkKind, NetworkKindError>,
        }

        let tests = vec![
            Test { name: "main", expr: "main", expected: Ok(NetworkKind::Main) },
            Test { name: "regtest", expr: "regtest", expected: Ok(NetworkKind::RegTest) },
            Test { name: "mixed case is accepted", expr: "RegTest", expected: Ok(NetworkKind::RegTest) },
            Test { name: "unittest", expr: "unittest", expected: Ok(NetworkKind::UnitTest) },
            Test {
                name: "garbage input",
                expr: "mainnet",
                expected: Err(NetworkKindError::InvalidNetworkKind("mainnet".to_string())),
            },
            Test {
                name: "empty input",
                expr: "",
                expected: Err(NetworkKindError::InvalidNetworkKind("".to_string())),
            },
        ];

        for test in tests {
            assert_eq!(NetworkKind::from_str(test.expr), test.expected, "{}: unexpected result", test.name);
        }
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(NetworkKind::from_flags(false, false), Ok(NetworkKind::Main));
        assert_eq!(NetworkKind::from_flags(true, false), Ok(NetworkKind::Test));
        assert_eq!(NetworkKind::from_flags(false, true), Ok(NetworkKind::RegTest));
        assert_eq!(NetworkKind::from_flags(true, true), Err(ConfigError::MixedTestnetAndRegtest));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&NetworkKind::UnitTest).unwrap();
        assert_eq!(json, "\"unittest\"");
        let back: NetworkKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NetworkKind::UnitTest);
    }
}
