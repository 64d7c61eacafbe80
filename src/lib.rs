pub mod config;
pub mod errors;
pub mod logging;
pub mod prompt;
pub mod session;
pub mod store;
pub mod ui;

pub use errors::{CmsError, Result};
