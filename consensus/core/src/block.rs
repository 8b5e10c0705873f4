use crate::header::Header;
use crate::tx::Transaction;
use bagcoin_hashes::Hash;
use bagcoin_merkle::calc_merkle_root;
use serde::{Deserialize, Serialize};

/// Represents a Bagcoin block: a header and the transactions it commits to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Recomputes the merkle root over the block's transaction ids. Equals
    /// `header.merkle_root` only if the header commits to these transactions.
    pub fn merkle_root(&self) -> Hash {
        calc_merkle_root(self.transactions.iter().map(|tx| tx.id()))
    }
}
