//! Turn loosely-structured spreadsheet rows into validated SMS messages.
//!
//! Rows arrive as query parameters or a header-plus-one-line delimited blob,
//! get their keys normalized, and are then validated, formatted, and handed to
//! a [`dispatch::Dispatcher`] once per recipient.
pub mod compose;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod message;
pub mod normalize;
pub mod parse;
pub mod phone;
pub mod resolve;
pub mod row;
pub mod store;
pub mod util;
pub mod validate;

pub use compose::{compose, ComposedSms};
pub use config::{load_config, Config};
pub use dispatch::{dispatch_all, DispatchReceipt, Dispatcher, OutboxDispatcher};
pub use parse::{row_from_delimited, row_from_query, MalformedInput};
pub use phone::CallingCodePolicy;
pub use row::Row;
pub use store::RowStore;
pub use validate::{validate, ValidationReport};
