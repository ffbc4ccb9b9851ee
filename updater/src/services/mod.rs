//! Pipeline stages for the trip weather updater

pub mod forecast;
pub mod publisher;

pub use forecast::ForecastService;
