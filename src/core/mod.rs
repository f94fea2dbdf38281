//! Core infrastructure shared by the model, the parser and the binary.
//!
//! Error types, configuration and data directories, console output, the
//! observable list primitive and JSON persistence.

pub mod config;
pub mod dirs;
pub mod error;
pub mod observable;
pub mod output;
pub mod storage;
pub mod unique_list;

// === Error handling ===
pub use error::{
    AdapterError, CommandError, ParseError, Result, SerenityError, StorageError, ValidationError,
};

// === Configuration ===
pub use config::AppConfig;

// === Observable collections ===
pub use observable::{ListChange, Listener, Notifier, SubscriptionId};
pub use unique_list::{UniqueItem, UniqueList};

// === Persistence ===
pub use storage::{JsonStorage, StoredData};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success};
