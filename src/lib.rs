pub mod api;
pub mod config;
pub mod error;
pub mod logging;

pub use api::client::AmbariClient;
pub use error::{AmbariError, Result};

// Used by exported macros
#[doc(hidden)]
pub use tracing;
