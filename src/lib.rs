pub mod config;
pub mod constants;
pub mod convert;
pub mod data;
pub mod decode;
pub mod derive;
pub mod ledger;
pub mod resolve;
pub mod server;
