//! Automatic model selection
//!
//! Scores every candidate model (plus their equal-weight ensemble) with
//! sMAPE over backward validation splits, picks the lowest mean score, and
//! refits the winner on the full series with interval bounds derived from
//! the validation residuals.

use tracing::{debug, info};

use crate::error::ForecastError;

use super::models::{candidate_models, ForecastModel};

/// Configuration for the model search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Points held out per validation split
    pub forecast_length: usize,
    /// Number of backward validation splits
    pub num_validations: usize,
    /// Coverage of the forecast interval bounds (0..1)
    pub prediction_interval: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            forecast_length: 30,
            num_validations: 2,
            prediction_interval: 0.95,
        }
    }
}

/// Which candidate won the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Model(usize),
    Ensemble,
}

/// Point forecast with interval bounds
#[derive(Debug, Clone)]
pub struct Prediction {
    pub forecast: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Model search over the candidate set
#[derive(Debug, Clone, Default)]
pub struct ModelSearch {
    config: SearchConfig,
}

/// Search result: fitted candidates plus the winning selection
pub struct FittedSearch {
    models: Vec<Box<dyn ForecastModel>>,
    selection: Selection,
    best_name: String,
    sigma: f64,
    z: f64,
}

impl ModelSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Fit and select over the full series
    pub fn fit(&self, series: &[f64]) -> Result<FittedSearch, ForecastError> {
        if series.len() < 3 {
            return Err(ForecastError::Fit(format!(
                "series too short to validate: {} points",
                series.len()
            )));
        }

        // Short series degrade to smaller holdouts rather than failing
        let holdout = self.config.forecast_length.min(series.len() / 2).max(1);
        let splits = self.validation_splits(series.len(), holdout);

        let names: Vec<&'static str> = candidate_models().iter().map(|m| m.name()).collect();
        let candidates = names.len();

        // scores[i] = per-split sMAPE for candidate i; last slot is the ensemble
        let mut scores: Vec<Vec<f64>> = vec![Vec::new(); candidates + 1];
        let mut residuals: Vec<Vec<f64>> = vec![Vec::new(); candidates + 1];

        for test_start in splits {
            let train = &series[..test_start];
            let test = &series[test_start..test_start + holdout];

            let mut split_forecasts: Vec<Vec<f64>> = Vec::with_capacity(candidates);
            for (i, mut model) in candidate_models().into_iter().enumerate() {
                model.fit(train)?;
                let forecast = model.predict(holdout);
                scores[i].push(smape(test, &forecast));
                for (actual, predicted) in test.iter().zip(&forecast) {
                    residuals[i].push(actual - predicted);
                }
                split_forecasts.push(forecast);
            }

            let ensemble = elementwise_mean(&split_forecasts, holdout);
            scores[candidates].push(smape(test, &ensemble));
            for (actual, predicted) in test.iter().zip(&ensemble) {
                residuals[candidates].push(actual - predicted);
            }
        }

        let mut best_index = 0usize;
        let mut best_score = f64::INFINITY;
        for (i, candidate_scores) in scores.iter().enumerate() {
            let mean = candidate_scores.iter().sum::<f64>() / candidate_scores.len() as f64;
            let label = if i == candidates { "Ensemble" } else { names[i] };
            debug!(model = label, smape = mean, "validation score");
            if mean < best_score {
                best_score = mean;
                best_index = i;
            }
        }

        let (selection, best_name) = if best_index == candidates {
            (Selection::Ensemble, "Ensemble".to_string())
        } else {
            (Selection::Model(best_index), names[best_index].to_string())
        };

        info!(model = %best_name, smape = best_score, "model selected");

        // Refit the full candidate set on the whole series; the ensemble
        // needs every member even when a single model wins
        let mut models = candidate_models();
        for model in models.iter_mut() {
            model.fit(series)?;
        }

        Ok(FittedSearch {
            models,
            selection,
            best_name,
            sigma: std_dev(&residuals[best_index]),
            z: z_score(self.config.prediction_interval),
        })
    }

    /// Backward validation split points; train is everything before each
    fn validation_splits(&self, len: usize, holdout: usize) -> Vec<usize> {
        let mut splits = Vec::new();
        for v in 0..self.config.num_validations.max(1) {
            let test_end = match len.checked_sub(v * holdout) {
                Some(end) if end > holdout => end,
                _ => break,
            };
            let test_start = test_end - holdout;
            // Every model needs at least two training points
            if test_start < 2 {
                break;
            }
            splits.push(test_start);
        }
        // len >= 3 with holdout <= len / 2 always yields the first split
        splits
    }
}

impl FittedSearch {
    /// Name of the winning model
    pub fn best_model(&self) -> &str {
        &self.best_name
    }

    /// Forecast `horizon` steps with interval bounds
    pub fn predict(&self, horizon: usize) -> Prediction {
        let forecast = match self.selection {
            Selection::Model(i) => self.models[i].predict(horizon),
            Selection::Ensemble => {
                let all: Vec<Vec<f64>> =
                    self.models.iter().map(|m| m.predict(horizon)).collect();
                elementwise_mean(&all, horizon)
            }
        };

        let margin = self.z * self.sigma;
        let upper = forecast.iter().map(|f| f + margin).collect();
        let lower = forecast.iter().map(|f| f - margin).collect();

        Prediction {
            forecast,
            upper,
            lower,
        }
    }
}

/// Symmetric mean absolute percentage error
fn smape(actual: &[f64], forecast: &[f64]) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for (a, f) in actual.iter().zip(forecast) {
        let denom = a.abs() + f.abs();
        if denom > 0.0 {
            total += 2.0 * (a - f).abs() / denom;
        }
        count += 1;
    }
    if count == 0 {
        f64::INFINITY
    } else {
        total / count as f64
    }
}

fn elementwise_mean(forecasts: &[Vec<f64>], horizon: usize) -> Vec<f64> {
    (0..horizon)
        .map(|k| forecasts.iter().map(|f| f[k]).sum::<f64>() / forecasts.len() as f64)
        .collect()
}

fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Two-sided normal quantile for a coverage level, linearly interpolated
fn z_score(interval: f64) -> f64 {
    const TABLE: [(f64, f64); 5] = [
        (0.50, 0.6745),
        (0.80, 1.2816),
        (0.90, 1.6449),
        (0.95, 1.9600),
        (0.99, 2.5758),
    ];

    let p = interval.clamp(TABLE[0].0, TABLE[TABLE.len() - 1].0);
    for window in TABLE.windows(2) {
        let (p0, z0) = window[0];
        let (p1, z1) = window[1];
        if p <= p1 {
            return z0 + (z1 - z0) * (p - p0) / (p1 - p0);
        }
    }
    TABLE[TABLE.len() - 1].1
}
