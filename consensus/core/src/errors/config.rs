use crate::network::NetworkKind;
use bagcoin_hashes::Hash;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration: --testnet and --regtest cannot be used together")]
    MixedTestnetAndRegtest,

    #[error("no network has been selected yet")]
    NoNetworkSelected,

    #[error("consensus parameters may only be modified on the unittest network, but {0} is active")]
    WrongNetworkForMutation(NetworkKind),

    #[error("{0} genesis block hash is {2} while the recorded hash is {1}")]
    GenesisMismatch(NetworkKind, Hash, Hash),

    #[error("{0} genesis merkle root is {2} while the recorded root is {1}")]
    MerkleRootMismatch(NetworkKind, Hash, Hash),

    #[error("{0} checkpoint at height 0 is {2} while the genesis block hash is {1}")]
    GenesisCheckpointMismatch(NetworkKind, Hash, Hash),

    #[error("checkpoint heights must be strictly increasing, but the entry at height {0} is out of order")]
    UnsortedCheckpoints(u64),

    #[error("{0} upgrade majorities are not ordered (enforce {1} <= reject {2} <= window {3} violated)")]
    InvalidMajorities(NetworkKind, u32, u32, u32),

    #[error("{0} retarget timespan of {1}s is not a positive multiple of the {2}s block spacing")]
    InvalidRetargetSchedule(NetworkKind, u64, u64),

    #[error("{0} address prefix bytes collide across address classes")]
    PrefixCollision(NetworkKind),

    #[error("{0} {1} is not a hex-encoded public key")]
    MalformedKey(NetworkKind, &'static str),

    #[error("{0} pool dummy address failed base58check decoding")]
    MalformedPoolAddress(NetworkKind),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
