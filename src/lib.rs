#[cfg(feature = "bin")]
pub mod bench;
pub mod catalog;
#[cfg(feature = "bin")]
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod search;
pub mod table;
pub mod term;
pub mod transform;
pub mod worker;
