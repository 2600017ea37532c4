pub mod models;
pub mod search;

pub use models::{candidate_models, ForecastModel};
pub use search::{FittedSearch, ModelSearch, Prediction, SearchConfig};
