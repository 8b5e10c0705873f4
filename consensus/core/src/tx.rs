use bagcoin_hashes::ZERO_HASH;
use serde::{Deserialize, Serialize};

/// Represents the ID of a Bagcoin transaction
pub type TransactionId = bagcoin_hashes::Hash;

/// Sequence value marking a transaction input as final
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Represents a Bagcoin transaction outpoint
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }

    /// The outpoint only a coinbase input may reference.
    pub const fn null() -> Self {
        Self { transaction_id: ZERO_HASH, index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::null()
    }
}

/// Represents a Bagcoin transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub signature_script: Vec<u8>,
    pub sequence: u32,
}

/// Represents a Bagcoin transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: Vec<u8>,
}

/// Represents a Bagcoin transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: i32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    /// The double SHA-256 of the serialized transaction.
    pub fn id(&self) -> TransactionId {
        crate::hashing::tx::id(self)
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_outpoint.is_null()
    }
}
