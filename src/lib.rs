//! rcookie - capture and restore site cookies as portable text
//!
//! This crate converts between cookie records and the `name=value; ...`
//! text form, and applies parsed records to a cookie store with a
//! full-then-minimal attribute fallback per record.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod i18n;
pub mod inserter;
pub mod logging;
pub mod output;
pub mod session;
pub mod store;
pub mod utils;

pub use codec::CookieRecord;
pub use error::{RcookieError, Result};
pub use inserter::{BatchResult, CookieInserter};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
