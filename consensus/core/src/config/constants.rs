pub mod consensus {
    //!
    //! A module for constants which directly impact consensus.
    //!

    use bagcoin_math::Uint256;

    /// Number of base currency units in one coin
    pub const COIN: u64 = 100_000_000;

    /// Subsidy paid out by the genesis coinbase of every network
    pub const GENESIS_REWARD: u64 = 50 * COIN;

    /// Header version of every genesis block
    pub const GENESIS_BLOCK_VERSION: i32 = 1;

    /// Version of every genesis coinbase transaction
    pub const GENESIS_TX_VERSION: i32 = 1;

    /// Difficulty bits pushed into the genesis signature script
    pub const GENESIS_SCRIPT_SIG_BITS: u32 = 486_604_799; // 0x1d00ffff

    /// Highest allowed proof of work target on the main and test networks.
    ///
    /// Computed value: `!Uint256::ZERO >> 20`
    pub const POW_LIMIT: Uint256 = Uint256([u64::MAX, u64::MAX, u64::MAX, u64::MAX >> 20]);

    /// Highest allowed proof of work target on the regression test network.
    ///
    /// Computed value: `!Uint256::ZERO >> 1`
    pub const REGTEST_POW_LIMIT: Uint256 = Uint256([u64::MAX, u64::MAX, u64::MAX, u64::MAX >> 1]);
}
