pub mod checkpoints;
pub mod constants;
pub mod genesis;
pub mod params;
pub mod prefixes;

use crate::errors::config::{ConfigError, ConfigResult};
use crate::network::NetworkKind;
use params::{Params, apply_regtest_overrides, apply_test_overrides, apply_unittest_overrides, build_main};

/// All four parameter sets, built and verified up front, plus the one-shot
/// network selection a process makes at startup. Reads of the active
/// parameters fail until [`Registry::select`] has been called.
#[derive(Clone, Debug)]
pub struct Registry {
    main: Params,
    test: Params,
    regtest: Params,
    unittest: Params,
    active: Option<NetworkKind>,
}

impl Registry {
    /// Builds every network's parameters, validates them structurally, and
    /// rebuilds each genesis block to check it against its recorded hash.
    /// The unittest network shares main's genesis and is not re-checked.
    pub fn new() -> ConfigResult<Self> {
        let main = build_main()?;
        let test = apply_test_overrides(main.clone())?;
        let regtest = apply_regtest_overrides(test.clone())?;
        let unittest = apply_unittest_overrides(main.clone());

        for params in [&main, &test, &regtest, &unittest] {
            params.validate()?;
        }
        for params in [&main, &test, &regtest] {
            genesis::verify(params.network, &params.genesis)?;
        }

        Ok(Self { main, test, regtest, unittest, active: None })
    }

    /// Read-only access to any network's parameters, selected or not.
    pub fn get(&self, kind: NetworkKind) -> &Params {
        match kind {
            NetworkKind::Main => &self.main,
            NetworkKind::Test => &self.test,
            NetworkKind::RegTest => &self.regtest,
            NetworkKind::UnitTest => &self.unittest,
        }
    }

    /// Marks `kind` as the process-wide network and returns its parameters.
    ///
    /// # Panics
    ///
    /// Panics if a network has already been selected. Selection happens once
    /// at startup; a second call is a programming error.
    pub fn select(&mut self, kind: NetworkKind) -> &Params {
        if let Some(active) = self.active {
            panic!("network already selected: {}", active);
        }
        self.active = Some(kind);
        self.get(kind)
    }

    /// Maps the classic `--testnet` / `--regtest` command line flags to a
    /// selection. A conflicting flag pair is an error and leaves the
    /// registry unselected.
    pub fn select_from_flags(&mut self, testnet: bool, regtest: bool) -> ConfigResult<&Params> {
        let kind = NetworkKind::from_flags(testnet, regtest)?;
        Ok(self.select(kind))
    }

    /// The selected network's parameters.
    pub fn active(&self) -> ConfigResult<&Params> {
        match self.active {
            Some(kind) => Ok(self.get(kind)),
            None => Err(ConfigError::NoNetworkSelected),
        }
    }

    pub fn active_network(&self) -> Option<NetworkKind> {
        self.active
    }

    /// The mutation handle tests use to reshape consensus parameters. Only
    /// available while the unittest network is selected; every other network
    /// is immutable for the life of the process.
    pub fn overrides(&mut self) -> ConfigResult<ConsensusOverrides<'_>> {
        match self.active {
            None => Err(ConfigError::NoNetworkSelected),
            Some(NetworkKind::UnitTest) => Ok(ConsensusOverrides { params: &mut self.unittest }),
            Some(active) => Err(ConfigError::WrongNetworkForMutation(active)),
        }
    }
}

/// Scoped write access to the unittest parameter set. Setters chain.
#[derive(Debug)]
pub struct ConsensusOverrides<'a> {
    params: &'a mut Params,
}

impl ConsensusOverrides<'_> {
    pub fn set_subsidy_halving_interval(&mut self, interval: u64) -> &mut Self {
        self.params.subsidy_halving_interval = interval;
        self
    }

    pub fn set_enforce_upgrade_majority(&mut self, blocks: u32) -> &mut Self {
        self.params.enforce_upgrade_majority = blocks;
        self
    }

    pub fn set_reject_outdated_majority(&mut self, blocks: u32) -> &mut Self {
        self.params.reject_outdated_majority = blocks;
        self
    }

    pub fn set_majority_window(&mut self, blocks: u32) -> &mut Self {
        self.params.majority_window = blocks;
        self
    }

    pub fn set_default_consistency_checks(&mut self, enabled: bool) -> &mut Self {
        self.params.default_consistency_checks = enabled;
        self
    }

    pub fn set_allow_min_difficulty_blocks(&mut self, allowed: bool) -> &mut Self {
        self.params.allow_min_difficulty_blocks = allowed;
        self
    }

    pub fn set_skip_proof_of_work_check(&mut self, skip: bool) -> &mut Self {
        self.params.skip_proof_of_work_check = skip;
        self
    }
}
