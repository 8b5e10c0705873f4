pub mod block;
pub mod config;
pub mod errors;
pub mod hashing;
pub mod header;
pub mod network;
pub mod tx;
