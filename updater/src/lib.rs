//! Trip weather updater
//!
//! Pipeline pieces behind the `trip-weather` binary: configuration,
//! errors, the forecast provider client, and the assembly/publishing
//! services. Exposed as a library so the stages stay testable without a
//! network or a filesystem.

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
