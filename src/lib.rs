// Library Crate Root
// lib.rs

pub mod alpaca;
pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod handler;
pub mod models;

// pub use = re-export at crate root
pub use alpaca::{AlpacaClient, AlpacaSettings, BarSource, BarsRequest};
pub use api::{create_router, AppState, SharedState};
pub use config::AppConfig;
pub use error::ForecastError;
pub use forecast::{ModelSearch, SearchConfig};
pub use handler::{lambda_handler, ForecastEvent, ResponseEnvelope};
pub use models::{Bar, Timeframe};
