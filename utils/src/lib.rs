pub mod log;
pub mod networking;
