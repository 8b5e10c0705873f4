use crate::block::Block;
use crate::config::constants::consensus::{GENESIS_BLOCK_VERSION, GENESIS_REWARD, GENESIS_SCRIPT_SIG_BITS, GENESIS_TX_VERSION};
use crate::errors::config::{ConfigError, ConfigResult};
use crate::header::Header;
use crate::network::NetworkKind;
use crate::tx::{SEQUENCE_FINAL, Transaction, TransactionInput, TransactionOutpoint, TransactionOutput};
use bagcoin_hashes::{Hash, ZERO_HASH};
use bagcoin_merkle::calc_merkle_root;
use hex_literal::hex;

/// OP_CHECKSIG, the only opcode the genesis output script needs.
const OP_CHECKSIG: u8 = 0xac;

/// The timestamp message every genesis coinbase embeds, proving the chain
/// did not start earlier than the quoted date.
const GENESIS_COINBASE_MESSAGE: &[u8] = b"1 Mar 2016 8Baobi ATMs come to CN";

/// Uncompressed key the genesis reward is paid to. The same point serves as
/// the network alert key.
const GENESIS_OUTPUT_KEY: [u8; 65] = hex!(
    "0467180d30cce4738f65395f5d9e679e08fb14d717ec47d9465db8f9baa743dccddfb07463b49764b3596a5b428bb0b1d2d506d2ac26d968d04b3c6ee48aad080e"
);

/// Merkle root shared by all networks, since they embed the same coinbase.
const GENESIS_MERKLE_ROOT: Hash = Hash::from_bytes(hex!("af13b0e01436d2dc404a81a310ae4f929191a2674c3162047c580dfa4b7e6742"));

/// Everything needed to rebuild and verify a network's genesis block.
#[derive(Clone, Debug)]
pub struct GenesisParams {
    pub version: i32,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
    pub coinbase_message: &'static [u8],
    pub output_key: &'static [u8; 65],
    pub reward: u64,
    pub expected_hash: Hash,
    pub expected_merkle_root: Hash,
}

/// The main network genesis block.
pub const GENESIS: GenesisParams = GenesisParams {
    version: GENESIS_BLOCK_VERSION,
    timestamp: 1455170132,
    bits: 0x1e0ffff0,
    nonce: 919409,
    coinbase_message: GENESIS_COINBASE_MESSAGE,
    output_key: &GENESIS_OUTPUT_KEY,
    reward: GENESIS_REWARD,
    expected_hash: Hash::from_bytes(hex!("6253a1ccebabf971bce49422ce586b32f7b56da490535268ad30f38ba9040000")),
    expected_merkle_root: GENESIS_MERKLE_ROOT,
};

/// The test network genesis block. Same pre-nonce header as the main
/// network's, re-mined with its own nonce.
pub const TESTNET_GENESIS: GenesisParams = GenesisParams {
    version: GENESIS_BLOCK_VERSION,
    timestamp: 1455170132,
    bits: 0x1e0ffff0,
    nonce: 1948083,
    coinbase_message: GENESIS_COINBASE_MESSAGE,
    output_key: &GENESIS_OUTPUT_KEY,
    reward: GENESIS_REWARD,
    expected_hash: Hash::from_bytes(hex!("a131f36ef2ec51ce36cb172da08bfd0e4249efbc600f4236cddb76a023050000")),
    expected_merkle_root: GENESIS_MERKLE_ROOT,
};

/// The regression test network genesis block, minable in microseconds under
/// its permissive difficulty target.
pub const REGTEST_GENESIS: GenesisParams = GenesisParams {
    version: GENESIS_BLOCK_VERSION,
    timestamp: 1417713337,
    bits: 0x207fffff,
    nonce: 7,
    coinbase_message: GENESIS_COINBASE_MESSAGE,
    output_key: &GENESIS_OUTPUT_KEY,
    reward: GENESIS_REWARD,
    expected_hash: Hash::from_bytes(hex!("0e8207e2f3d775e61efd313c2693a23225558f4d361f334dff42915a3c0a5672")),
    expected_merkle_root: GENESIS_MERKLE_ROOT,
};

impl From<&GenesisParams> for Transaction {
    fn from(genesis: &GenesisParams) -> Self {
        let input = TransactionInput {
            previous_outpoint: TransactionOutpoint::null(),
            signature_script: coinbase_signature_script(genesis.coinbase_message),
            sequence: SEQUENCE_FINAL,
        };
        let output = TransactionOutput { value: genesis.reward, script_public_key: pay_to_pubkey_script(genesis.output_key) };
        Transaction::new(GENESIS_TX_VERSION, vec![input], vec![output], 0)
    }
}

impl From<&GenesisParams> for Header {
    fn from(genesis: &GenesisParams) -> Self {
        let merkle_root = calc_merkle_root(std::iter::once(Transaction::from(genesis).id()));
        Header::new(genesis.version, ZERO_HASH, merkle_root, genesis.timestamp, genesis.bits, genesis.nonce)
    }
}

impl From<&GenesisParams> for Block {
    fn from(genesis: &GenesisParams) -> Self {
        let coinbase = Transaction::from(genesis);
        let merkle_root = calc_merkle_root(std::iter::once(coinbase.id()));
        let header = Header::new(genesis.version, ZERO_HASH, merkle_root, genesis.timestamp, genesis.bits, genesis.nonce);
        Block::new(header, vec![coinbase])
    }
}

/// Rebuilds the genesis block described by `genesis` and compares it against
/// the recorded merkle root and block hash.
pub fn verify(network: NetworkKind, genesis: &GenesisParams) -> ConfigResult<()> {
    let block = Block::from(genesis);
    if block.header.merkle_root != genesis.expected_merkle_root {
        return Err(ConfigError::MerkleRootMismatch(network, genesis.expected_merkle_root, block.header.merkle_root));
    }
    let hash = block.hash();
    if hash != genesis.expected_hash {
        return Err(ConfigError::GenesisMismatch(network, genesis.expected_hash, hash));
    }
    Ok(())
}

/// The classic coinbase preamble: a push of the original difficulty bits and
/// a script number 4, followed by the dated message.
fn coinbase_signature_script(message: &[u8]) -> Vec<u8> {
    // Messages longer than 75 bytes would need a multi-byte push
    debug_assert!(message.len() <= 75);
    let mut script = Vec::with_capacity(7 + message.len());
    script.push(4);
    script.extend_from_slice(&GENESIS_SCRIPT_SIG_BITS.to_le_bytes());
    script.push(1);
    script.push(4);
    script.push(message.len() as u8);
    script.extend_from_slice(message);
    script
}

fn pay_to_pubkey_script(key: &[u8; 65]) -> Vec<u8> {
    let mut script = Vec::with_capacity(2 + key.len());
    script.push(key.len() as u8);
    script.extend_from_slice(key);
    script.push(OP_CHECKSIG);
    script
}
