pub mod client;
pub mod types;

pub use client::{
    AlpacaClient, AlpacaSettings, BarSource, BarsRequest, DEFAULT_DATA_URL, DEFAULT_SYMBOLS,
};
