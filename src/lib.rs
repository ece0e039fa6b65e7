pub mod catalog;
pub mod cli;
pub mod config;
pub mod date;
pub mod entity;
pub mod error;
pub mod registry;
pub mod session;
pub mod storage;

pub use config::Config;
pub use date::Date;
pub use error::{AulaError, Result};
pub use registry::Registry;
pub use session::Session;
