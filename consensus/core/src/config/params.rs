use crate::config::checkpoints::CheckpointList;
use crate::config::constants::consensus::{POW_LIMIT, REGTEST_POW_LIMIT};
use crate::config::genesis::{GENESIS, GenesisParams, REGTEST_GENESIS, TESTNET_GENESIS};
use crate::config::prefixes::{AddressPrefixes, MAINNET_PREFIXES, TESTNET_PREFIXES};
use crate::errors::config::{ConfigError, ConfigResult};
use crate::network::NetworkKind;
use bagcoin_hashes::Hash;
use bagcoin_math::Uint256;
use bagcoin_utils::networking::SeedAddress;
use hex_literal::hex;

/// The chain launched with a single controller key serving as alert, spork
/// and masternode payments key alike.
const LAUNCH_KEY: &str = "0467180d30cce4738f65395f5d9e679e08fb14d717ec47d9465db8f9baa743dccddfb07463b49764b3596a5b428bb0b1d2d506d2ac26d968d04b3c6ee48aad080e";

const MAINNET_CHECKPOINT_2: Hash = Hash::from_bytes(hex!("a9db06e7a01b897fdd3b17311168ed1324219f00799ac0c4f3653da181070000"));

/// Consensus and policy parameters of one network. Changing a consensus
/// field on a network node would exclude it from reaching consensus with its
/// unmodified peers; only the unittest registry handle exposes mutation.
#[derive(Clone, Debug)]
pub struct Params {
    pub network: NetworkKind,

    /// The four magic bytes every p2p message on this network starts with
    pub message_start: [u8; 4],
    pub default_port: u16,

    /// Hex-encoded public key that signs network alerts
    pub alert_key: &'static str,

    /// Defines the highest allowed proof of work target as a [`Uint256`]
    pub max_difficulty_target: Uint256,

    /// Number of blocks between subsidy halvings
    pub subsidy_halving_interval: u64,

    /// Blocks in the last `majority_window` that must carry an upgraded
    /// version before the upgrade is enforced
    pub enforce_upgrade_majority: u32,
    /// Blocks in the last `majority_window` that must carry an upgraded
    /// version before outdated blocks are rejected
    pub reject_outdated_majority: u32,
    pub majority_window: u32,

    /// Difficulty retarget period in seconds
    pub target_timespan: u64,
    /// Desired seconds between consecutive blocks
    pub target_spacing: u64,

    /// Threads the built-in miner starts by default
    pub miner_threads: u32,

    pub genesis: GenesisParams,

    pub dns_seeders: &'static [&'static str],
    pub fixed_seeds: &'static [SeedAddress],

    pub prefixes: AddressPrefixes,

    pub require_rpc_password: bool,
    pub mining_requires_peers: bool,
    /// Accept min-difficulty blocks after a long gap without blocks
    pub allow_min_difficulty_blocks: bool,
    pub default_consistency_checks: bool,
    /// Reject non-standard transactions from mempool and relay
    pub require_standard: bool,
    /// Blocks are produced on RPC request rather than by a miner loop
    pub mine_blocks_on_demand: bool,
    pub skip_proof_of_work_check: bool,
    pub testnet_deprecated_rpc: bool,

    /// Hex-encoded public key that signs spork messages
    pub spork_key: &'static str,
    pub masternode_payments_key: &'static str,
    /// Collateral return address used while mixing
    pub pool_dummy_address: &'static str,
    /// Unix timestamp at which masternode payments begin
    pub masternode_payments_start: u64,
    pub pool_max_transactions: u32,

    pub checkpoints: CheckpointList,
}

impl Params {
    /// Number of blocks between difficulty retargets.
    #[inline]
    #[must_use]
    pub fn retarget_interval(&self) -> u64 {
        self.target_timespan / self.target_spacing
    }

    /// The proof of work limit in compact bits form.
    #[inline]
    #[must_use]
    pub fn pow_limit_bits(&self) -> u32 {
        self.max_difficulty_target.compact_target_bits()
    }

    pub fn network_name(&self) -> String {
        self.network.to_string()
    }

    /// Structural validation covering everything that can be checked without
    /// rebuilding the genesis block: majority ordering, the retarget
    /// schedule, prefix distinctness, key material, the pool address, and
    /// checkpoint anchoring.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.enforce_upgrade_majority <= self.reject_outdated_majority && self.reject_outdated_majority <= self.majority_window)
        {
            return Err(ConfigError::InvalidMajorities(
                self.network,
                self.enforce_upgrade_majority,
                self.reject_outdated_majority,
                self.majority_window,
            ));
        }

        if self.target_spacing == 0 || self.target_timespan == 0 || self.target_timespan % self.target_spacing != 0 {
            return Err(ConfigError::InvalidRetargetSchedule(self.network, self.target_timespan, self.target_spacing));
        }

        if !self.prefixes.is_internally_distinct() {
            return Err(ConfigError::PrefixCollision(self.network));
        }

        validate_key(self.network, "alert key", self.alert_key)?;
        validate_key(self.network, "spork key", self.spork_key)?;
        validate_key(self.network, "masternode payments key", self.masternode_payments_key)?;
        validate_pool_address(self.network, self.pool_dummy_address)?;

        if let Some(anchor) = self.checkpoints.hash_at(0) {
            if anchor != self.genesis.expected_hash {
                return Err(ConfigError::GenesisCheckpointMismatch(self.network, self.genesis.expected_hash, anchor));
            }
        }

        Ok(())
    }
}

impl TryFrom<NetworkKind> for Params {
    type Error = ConfigError;

    fn try_from(kind: NetworkKind) -> ConfigResult<Self> {
        match kind {
            NetworkKind::Main => build_main(),
            NetworkKind::Test => apply_test_overrides(build_main()?),
            NetworkKind::RegTest => apply_regtest_overrides(apply_test_overrides(build_main()?)?),
            NetworkKind::UnitTest => Ok(apply_unittest_overrides(build_main()?)),
        }
    }
}

/// Builds the main network parameters, the root every other network's
/// parameters derive from.
pub fn build_main() -> ConfigResult<Params> {
    let checkpoints = CheckpointList::new(vec![(0, GENESIS.expected_hash), (2, MAINNET_CHECKPOINT_2)], 0, 0, 0)?;
    Ok(Params {
        network: NetworkKind::Main,
        message_start: [0x08, 0x66, 0x66, 0x67],
        default_port: 8887,
        alert_key: LAUNCH_KEY,
        max_difficulty_target: POW_LIMIT,
        subsidy_halving_interval: 100_000,
        enforce_upgrade_majority: 750,
        reject_outdated_majority: 950,
        majority_window: 1000,
        target_timespan: 60,
        target_spacing: 60,
        miner_threads: 0,
        genesis: GENESIS,
        dns_seeders: &[
            "seed.bagcoin.org",
            "seed1.bagcoin.org",
            "seed2.bagcoin.org",
            "seed3.bagcoin.org",
            "seed4.bagcoin.org",
            "seed5.bagcoin.org",
        ],
        fixed_seeds: &[],
        prefixes: MAINNET_PREFIXES,
        require_rpc_password: true,
        mining_requires_peers: true,
        allow_min_difficulty_blocks: false,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
        skip_proof_of_work_check: false,
        testnet_deprecated_rpc: false,
        spork_key: LAUNCH_KEY,
        masternode_payments_key: LAUNCH_KEY,
        pool_dummy_address: "8XxRWJEgPyFL8GTc2uDRbV27528KAZHVy1",
        masternode_payments_start: 1403728576,
        pool_max_transactions: 3,
        checkpoints,
    })
}

/// Derives the test network's parameters from the main network's.
pub fn apply_test_overrides(mut params: Params) -> ConfigResult<Params> {
    params.network = NetworkKind::Test;
    params.message_start = [0x70, 0x7c, 0x7f, 0x73];
    params.default_port = 18887;
    params.enforce_upgrade_majority = 51;
    params.reject_outdated_majority = 75;
    params.majority_window = 100;
    params.genesis = TESTNET_GENESIS;
    params.dns_seeders = &[];
    params.fixed_seeds = &[];
    params.prefixes = TESTNET_PREFIXES;
    params.allow_min_difficulty_blocks = true;
    params.require_standard = false;
    params.testnet_deprecated_rpc = true;
    params.pool_dummy_address = "uYhuceXHnst99Wvh6hxjgcvSMcNYb2nYdZ";
    params.masternode_payments_start = 1420837558;
    params.pool_max_transactions = 2;
    params.checkpoints = CheckpointList::new(vec![(0, TESTNET_GENESIS.expected_hash)], 0, 0, 0)?;
    Ok(params)
}

/// Derives the regression test network's parameters from the test
/// network's. Address prefixes and the masternode fields carry over.
pub fn apply_regtest_overrides(mut params: Params) -> ConfigResult<Params> {
    params.network = NetworkKind::RegTest;
    params.message_start = [0x51, 0x4c, 0x4f, 0x44];
    params.default_port = 28887;
    params.subsidy_halving_interval = 150;
    params.enforce_upgrade_majority = 750;
    params.reject_outdated_majority = 950;
    params.majority_window = 1000;
    params.miner_threads = 1;
    params.max_difficulty_target = REGTEST_POW_LIMIT;
    params.genesis = REGTEST_GENESIS;
    params.require_rpc_password = false;
    params.mining_requires_peers = false;
    params.default_consistency_checks = true;
    params.mine_blocks_on_demand = true;
    params.testnet_deprecated_rpc = false;
    params.checkpoints = CheckpointList::new(vec![(0, REGTEST_GENESIS.expected_hash)], 0, 0, 0)?;
    Ok(params)
}

/// Derives the unittest network's parameters from the main network's. The
/// genesis block and checkpoint table stay the main network's; the genesis
/// is not re-verified for this network.
pub fn apply_unittest_overrides(mut params: Params) -> Params {
    params.network = NetworkKind::UnitTest;
    params.default_port = 38887;
    params.dns_seeders = &[];
    params.fixed_seeds = &[];
    params.require_rpc_password = false;
    params.mining_requires_peers = false;
    params.default_consistency_checks = true;
    params.allow_min_difficulty_blocks = false;
    params.mine_blocks_on_demand = true;
    params
}

fn validate_key(network: NetworkKind, field: &'static str, key: &str) -> ConfigResult<()> {
    if key.len() % 2 != 0 {
        return Err(ConfigError::MalformedKey(network, field));
    }
    let mut bytes = vec![0u8; key.len() / 2];
    if faster_hex::hex_decode(key.as_bytes(), &mut bytes).is_err() {
        return Err(ConfigError::MalformedKey(network, field));
    }
    // Uncompressed or compressed secp256k1 point encodings
    match bytes.first() {
        Some(0x04) if bytes.len() == 65 => Ok(()),
        Some(0x02 | 0x03) if bytes.len() == 33 => Ok(()),
        _ => Err(ConfigError::MalformedKey(network, field)),
    }
}

fn validate_pool_address(network: NetworkKind, address: &str) -> ConfigResult<()> {
    let payload =
        bs58::decode(address).with_check(None).into_vec().map_err(|_| ConfigError::MalformedPoolAddress(network))?;
    // A version byte followed by a 20-byte key hash
    if payload.len() != 21 {
        return Err(ConfigError::MalformedPoolAddress(network));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_params() {
        let params = build_main().unwrap();
        params.validate().unwrap();

        assert_eq!(params.network, NetworkKind::Main);
        assert_eq!(params.message_start, [0x08, 0x66, 0x66, 0x67]);
        assert_eq!(params.default_port, 8887);
        assert_eq!(params.subsidy_halving_interval, 100_000);
        assert_eq!(params.target_timespan, 60);
        assert_eq!(params.target_spacing, 60);
        assert_eq!(params.retarget_interval(), 1);
        assert_eq!(params.pow_limit_bits(), 0x1e0fffff);
        assert_eq!(params.miner_threads, 0);
        assert_eq!(params.dns_seeders.len(), 6);
        assert!(params.fixed_seeds.is_empty());
        assert_eq!(params.prefixes, MAINNET_PREFIXES);
        assert_eq!(params.pool_max_transactions, 3);
        assert_eq!(params.masternode_payments_start, 1403728576);
        assert_eq!(params.checkpoints.highest(), Some((2, MAINNET_CHECKPOINT_2)));

        assert!(params.require_rpc_password);
        assert!(params.mining_requires_peers);
        assert!(params.require_standard);
        assert!(!params.allow_min_difficulty_blocks);
        assert!(!params.default_consistency_checks);
        assert!(!params.mine_blocks_on_demand);
        assert!(!params.skip_proof_of_work_check);
        assert!(!params.testnet_deprecated_rpc);
    }

    #[test]
    fn test_testnet_overrides() {
        let main = build_main().unwrap();
        let params = apply_test_overrides(main.clone()).unwrap();
        params.validate().unwrap();

        assert_eq!(params.network, NetworkKind::Test);
        assert_eq!(params.message_start, [0x70, 0x7c, 0x7f, 0x73]);
        assert_eq!(params.default_port, 18887);
        assert_eq!(params.enforce_upgrade_majority, 51);
        assert_eq!(params.reject_outdated_majority, 75);
        assert_eq!(params.majority_window, 100);
        assert_eq!(params.prefixes, TESTNET_PREFIXES);
        assert_eq!(params.pool_max_transactions, 2);
        assert_eq!(params.masternode_payments_start, 1420837558);
        assert!(params.dns_seeders.is_empty());

        // The genesis is re-mined with its own nonce over the shared coinbase
        assert_ne!(params.genesis.nonce, main.genesis.nonce);
        assert_ne!(params.genesis.expected_hash, main.genesis.expected_hash);
        assert_eq!(params.genesis.expected_merkle_root, main.genesis.expected_merkle_root);
        assert_eq!(params.checkpoints.hash_at(0), Some(params.genesis.expected_hash));

        assert!(params.allow_min_difficulty_blocks);
        assert!(!params.require_standard);
        assert!(params.testnet_deprecated_rpc);
        // Inherited from main
        assert!(params.require_rpc_password);
        assert!(params.mining_requires_peers);
        assert_eq!(params.subsidy_halving_interval, 100_000);
    }

    #[test]
    fn test_regtest_overrides() {
        let main = build_main().unwrap();
        let params = apply_regtest_overrides(apply_test_overrides(main.clone()).unwrap()).unwrap();
        params.validate().unwrap();

        assert_eq!(params.network, NetworkKind::RegTest);
        assert_eq!(params.message_start, [0x51, 0x4c, 0x4f, 0x44]);
        assert_eq!(params.default_port, 28887);
        assert_eq!(params.subsidy_halving_interval, 150);
        assert_eq!(params.enforce_upgrade_majority, 750);
        assert_eq!(params.reject_outdated_majority, 950);
        assert_eq!(params.majority_window, 1000);
        assert_eq!(params.miner_threads, 1);
        assert_eq!(params.genesis.bits, 0x207fffff);
        assert_eq!(params.pow_limit_bits(), 0x207fffff);
        assert!(params.max_difficulty_target > main.max_difficulty_target);

        assert!(params.dns_seeders.is_empty());
        assert!(params.fixed_seeds.is_empty());
        assert!(!params.require_rpc_password);
        assert!(!params.mining_requires_peers);
        assert!(params.default_consistency_checks);
        assert!(params.mine_blocks_on_demand);
        assert!(!params.testnet_deprecated_rpc);

        // Carried over from the test network, not from main
        assert_eq!(params.prefixes, TESTNET_PREFIXES);
        assert_eq!(params.pool_max_transactions, 2);
        assert!(params.allow_min_difficulty_blocks);
        assert!(!params.require_standard);
    }

    #[test]
    fn test_unittest_overrides() {
        let main = build_main().unwrap();
        let params = apply_unittest_overrides(main.clone());
        params.validate().unwrap();

        assert_eq!(params.network, NetworkKind::UnitTest);
        assert_eq!(params.default_port, 38887);
        assert!(params.dns_seeders.is_empty());
        assert!(!params.require_rpc_password);
        assert!(!params.mining_requires_peers);
        assert!(params.default_consistency_checks);
        assert!(!params.allow_min_difficulty_blocks);
        assert!(params.mine_blocks_on_demand);

        // Everything consensus-critical stays main's
        assert_eq!(params.message_start, main.message_start);
        assert_eq!(params.genesis.expected_hash, main.genesis.expected_hash);
        assert_eq!(params.checkpoints, main.checkpoints);
        assert_eq!(params.prefixes, MAINNET_PREFIXES);
    }

    #[test]
    fn test_try_from_builds_every_network() {
        for kind in NetworkKind::iter() {
            let params = Params::try_from(kind).unwrap();
            assert_eq!(params.network, kind);
            params.validate().unwrap();
        }
    }

    #[test]
    fn test_ports_are_distinct() {
        let mut ports: Vec<u16> = NetworkKind::iter().map(|kind| Params::try_from(kind).unwrap().default_port).collect();
        ports.sort_unstable();
        ports.dedup();
        assert_eq!(ports.len(), 4);
    }

    #[test]
    fn test_validation_rejects_unordered_majorities() {
        let mut params = build_main().unwrap();
        params.enforce_upgrade_majority = params.majority_window + 1;
        assert!(matches!(params.validate(), Err(ConfigError::InvalidMajorities(NetworkKind::Main, _, _, _))));

        let mut params = build_main().unwrap();
        params.reject_outdated_majority = params.enforce_upgrade_majority - 1;
        assert!(matches!(params.validate(), Err(ConfigError::InvalidMajorities(..))));
    }

    #[test]
    fn test_validation_rejects_bad_retarget_schedule() {
        let mut params = build_main().unwrap();
        params.target_timespan = 90;
        assert_eq!(params.validate(), Err(ConfigError::InvalidRetargetSchedule(NetworkKind::Main, 90, 60)));

        let mut params = build_main().unwrap();
        params.target_spacing = 0;
        assert!(matches!(params.validate(), Err(ConfigError::InvalidRetargetSchedule(..))));
    }

    #[test]
    fn test_validation_rejects_prefix_collision() {
        let mut params = build_main().unwrap();
        params.prefixes.script_address = params.prefixes.pubkey_address;
        assert_eq!(params.validate(), Err(ConfigError::PrefixCollision(NetworkKind::Main)));
    }

    #[test]
    fn test_validation_rejects_malformed_keys() {
        let mut params = build_main().unwrap();
        params.spork_key = "zz180d30cce4738f65395f5d9e679e08";
        assert_eq!(params.validate(), Err(ConfigError::MalformedKey(NetworkKind::Main, "spork key")));

        let mut params = build_main().unwrap();
        params.alert_key = "04deadbeef";
        assert_eq!(params.validate(), Err(ConfigError::MalformedKey(NetworkKind::Main, "alert key")));
    }

    #[test]
    fn test_validation_rejects_bad_pool_address() {
        let mut params = build_main().unwrap();
        params.pool_dummy_address = "not-base58-0OIl";
        assert_eq!(params.validate(), Err(ConfigError::MalformedPoolAddress(NetworkKind::Main)));

        // Valid base58 but the checksum cannot match after editing a character
        let mut params = build_main().unwrap();
        params.pool_dummy_address = "8XxRWJEgPyFL8GTc2uDRbV27528KAZHVy2";
        assert_eq!(params.validate(), Err(ConfigError::MalformedPoolAddress(NetworkKind::Main)));
    }

    #[test]
    fn test_validation_rejects_unanchored_checkpoints() {
        let mut params = build_main().unwrap();
        params.checkpoints = CheckpointList::new(vec![(0, MAINNET_CHECKPOINT_2)], 0, 0, 0).unwrap();
        assert!(matches!(params.validate(), Err(ConfigError::GenesisCheckpointMismatch(NetworkKind::Main, _, _))));
    }

    #[test]
    fn test_launch_key_matches_genesis_output_key() {
        let mut bytes = [0u8; 65];
        faster_hex::hex_decode(LAUNCH_KEY.as_bytes(), &mut bytes).unwrap();
        assert_eq!(&bytes, GENESIS.output_key);
    }
}
