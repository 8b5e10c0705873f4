use serde::{Deserialize, Serialize};

/// Version bytes prepended to payloads before base58check encoding, plus the
/// BIP44 coin type. Distinct tables keep keys and addresses from one network
/// from decoding as valid on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPrefixes {
    pub pubkey_address: u8,
    pub script_address: u8,
    pub secret_key: u8,
    pub ext_public_key: [u8; 4],
    pub ext_secret_key: [u8; 4],
    pub bip44_coin_type: u32,
}

impl AddressPrefixes {
    /// True when no two address classes of this table share a version byte
    /// and the extended-key prefixes differ.
    pub fn is_internally_distinct(&self) -> bool {
        self.pubkey_address != self.script_address
            && self.pubkey_address != self.secret_key
            && self.script_address != self.secret_key
            && self.ext_public_key != self.ext_secret_key
    }
}

pub const MAINNET_PREFIXES: AddressPrefixes = AddressPrefixes {
    pubkey_address: 18,
    script_address: 5,
    secret_key: 128,
    ext_public_key: [0x04, 0x88, 0xB2, 0x1E],
    ext_secret_key: [0x04, 0x88, 0xAD, 0xE4],
    bip44_coin_type: 0x8000_0005,
};

/// Shared by the test and regression test networks.
pub const TESTNET_PREFIXES: AddressPrefixes = AddressPrefixes {
    pubkey_address: 85,
    script_address: 19,
    secret_key: 239,
    ext_public_key: [0x3A, 0x80, 0x61, 0xA0],
    ext_secret_key: [0x3A, 0x80, 0x58, 0x37],
    bip44_coin_type: 0x8000_0001,
};
