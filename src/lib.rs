// Money Manager - Core Library
// Exposes the ledger, form model, and ambient setup for the terminal shell and tests

pub mod amount;
pub mod config;
pub mod error;
pub mod form;
pub mod ledger;
pub mod logging;
pub mod theme;

// Re-export commonly used types
pub use amount::{format_money, parse_amount, parse_income};
pub use crate::config::{AppConfig, Args};
pub use error::LedgerError;
pub use form::{EntryForm, Field, FormState, IncomeForm};
pub use ledger::{Category, Entry, EntryId, LedgerState, LedgerSummary};
pub use logging::init_tracing;
pub use theme::{parse_hex, ThemeConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
