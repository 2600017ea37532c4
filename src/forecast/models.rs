//! Candidate forecasting models
//!
//! Each model fits a univariate close-price series and extrapolates point
//! forecasts. The candidate set mirrors a small naive/statistical family:
//! last-value and average-value baselines, a least-squares trend, and
//! Holt exponential smoothing.

use crate::error::ForecastError;

/// A univariate forecasting model
pub trait ForecastModel: Send + Sync {
    /// Model name used in logs and selection results
    fn name(&self) -> &'static str;

    /// Fit the model to the series
    fn fit(&mut self, series: &[f64]) -> Result<(), ForecastError>;

    /// Forecast `horizon` steps past the end of the fitted series
    ///
    /// Must be called after a successful `fit`.
    fn predict(&self, horizon: usize) -> Vec<f64>;
}

/// The full candidate set, unfitted
pub fn candidate_models() -> Vec<Box<dyn ForecastModel>> {
    vec![
        Box::new(LastValueNaive::default()),
        Box::new(AverageValueNaive::default()),
        Box::new(Gls::default()),
        Box::new(Ets::default()),
    ]
}

fn require_nonempty(series: &[f64], model: &str) -> Result<(), ForecastError> {
    if series.is_empty() {
        Err(ForecastError::Fit(format!(
            "{model} requires a non-empty series"
        )))
    } else {
        Ok(())
    }
}

/// Repeats the final observation
#[derive(Debug, Default)]
pub struct LastValueNaive {
    last: f64,
}

impl ForecastModel for LastValueNaive {
    fn name(&self) -> &'static str {
        "LastValueNaive"
    }

    fn fit(&mut self, series: &[f64]) -> Result<(), ForecastError> {
        require_nonempty(series, self.name())?;
        self.last = *series.last().unwrap();
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Vec<f64> {
        vec![self.last; horizon]
    }
}

/// Repeats the series mean
#[derive(Debug, Default)]
pub struct AverageValueNaive {
    mean: f64,
}

impl ForecastModel for AverageValueNaive {
    fn name(&self) -> &'static str {
        "AverageValueNaive"
    }

    fn fit(&mut self, series: &[f64]) -> Result<(), ForecastError> {
        require_nonempty(series, self.name())?;
        self.mean = series.iter().sum::<f64>() / series.len() as f64;
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Vec<f64> {
        vec![self.mean; horizon]
    }
}

/// Least-squares linear trend on the time index, extrapolated
#[derive(Debug, Default)]
pub struct Gls {
    intercept: f64,
    slope: f64,
    len: usize,
}

impl ForecastModel for Gls {
    fn name(&self) -> &'static str {
        "GLS"
    }

    fn fit(&mut self, series: &[f64]) -> Result<(), ForecastError> {
        require_nonempty(series, self.name())?;
        let n = series.len();
        self.len = n;
        if n == 1 {
            self.intercept = series[0];
            self.slope = 0.0;
            return Ok(());
        }

        let t_mean = (n as f64 - 1.0) / 2.0;
        let y_mean = series.iter().sum::<f64>() / n as f64;

        let mut num = 0.0;
        let mut den = 0.0;
        for (t, y) in series.iter().enumerate() {
            let dt = t as f64 - t_mean;
            num += dt * (y - y_mean);
            den += dt * dt;
        }

        self.slope = if den > 0.0 { num / den } else { 0.0 };
        self.intercept = y_mean - self.slope * t_mean;
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Vec<f64> {
        (0..horizon)
            .map(|k| self.intercept + self.slope * (self.len + k) as f64)
            .collect()
    }
}

/// Holt exponential smoothing (additive trend)
///
/// Smoothing parameters are chosen from a small grid by one-step-ahead
/// squared error on the training series.
#[derive(Debug)]
pub struct Ets {
    level: f64,
    trend: f64,
    alpha: f64,
    beta: f64,
}

impl Default for Ets {
    fn default() -> Self {
        Self {
            level: 0.0,
            trend: 0.0,
            alpha: 0.5,
            beta: 0.1,
        }
    }
}

impl Ets {
    const ALPHA_GRID: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];
    const BETA_GRID: [f64; 3] = [0.0, 0.1, 0.3];

    /// Run the Holt recursion, returning (level, trend, one-step SSE)
    fn smooth(series: &[f64], alpha: f64, beta: f64) -> (f64, f64, f64) {
        let mut level = series[0];
        let mut trend = if series.len() > 1 {
            series[1] - series[0]
        } else {
            0.0
        };
        let mut sse = 0.0;

        for &y in &series[1..] {
            let forecast = level + trend;
            let err = y - forecast;
            sse += err * err;

            let prev_level = level;
            level = alpha * y + (1.0 - alpha) * (level + trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        }

        (level, trend, sse)
    }
}

impl ForecastModel for Ets {
    fn name(&self) -> &'static str {
        "ETS"
    }

    fn fit(&mut self, series: &[f64]) -> Result<(), ForecastError> {
        require_nonempty(series, self.name())?;
        if series.len() == 1 {
            self.level = series[0];
            self.trend = 0.0;
            return Ok(());
        }

        let mut best = f64::INFINITY;
        for alpha in Self::ALPHA_GRID {
            for beta in Self::BETA_GRID {
                let (level, trend, sse) = Self::smooth(series, alpha, beta);
                if sse < best {
                    best = sse;
                    self.level = level;
                    self.trend = trend;
                    self.alpha = alpha;
                    self.beta = beta;
                }
            }
        }
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|k| self.level + self.trend * k as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_last_value_naive_repeats_final_observation() {
        let mut model = LastValueNaive::default();
        model.fit(&[1.0, 2.0, 3.0, 4.5]).unwrap();
        assert_eq!(model.predict(3), vec![4.5, 4.5, 4.5]);
    }

    #[test]
    fn test_average_value_naive_repeats_mean() {
        let mut model = AverageValueNaive::default();
        model.fit(&[2.0, 4.0, 6.0]).unwrap();
        assert_eq!(model.predict(2), vec![4.0, 4.0]);
    }

    #[test]
    fn test_gls_recovers_linear_trend() {
        let series: Vec<f64> = (0..50).map(|t| 10.0 + 0.5 * t as f64).collect();
        let mut model = Gls::default();
        model.fit(&series).unwrap();
        let forecast = model.predict(3);
        assert_close(forecast[0], 10.0 + 0.5 * 50.0);
        assert_close(forecast[2], 10.0 + 0.5 * 52.0);
    }

    #[test]
    fn test_ets_flat_on_constant_series() {
        let series = vec![7.0; 40];
        let mut model = Ets::default();
        model.fit(&series).unwrap();
        for value in model.predict(5) {
            assert_close(value, 7.0);
        }
    }

    #[test]
    fn test_ets_follows_trend() {
        let series: Vec<f64> = (0..60).map(|t| 100.0 + 2.0 * t as f64).collect();
        let mut model = Ets::default();
        model.fit(&series).unwrap();
        let forecast = model.predict(2);
        // Last observation is 218; next points on the line are 220 and 222
        assert!((forecast[0] - 220.0).abs() < 1.0);
        assert!((forecast[1] - 222.0).abs() < 1.5);
    }

    #[test]
    fn test_fit_rejects_empty_series() {
        let mut model = LastValueNaive::default();
        assert!(model.fit(&[]).is_err());
        let mut model = Ets::default();
        assert!(model.fit(&[]).is_err());
    }

    #[test]
    fn test_single_point_series() {
        let mut model = Gls::default();
        model.fit(&[42.0]).unwrap();
        assert_eq!(model.predict(2), vec![42.0, 42.0]);

        let mut model = Ets::default();
        model.fit(&[42.0]).unwrap();
        assert_eq!(model.predict(2), vec![42.0, 42.0]);
    }
}
