// M/M/1 single-server queue.
//
// Poisson arrivals at rate λ, exponential service at rate μ, one server. The
// steady state only exists while λ < μ.

use super::chart::Chart;
use super::model_error::{ModelError, ModelResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueInput {
    pub arrival_rate: f64,
    pub service_rate: f64,
}

impl Default for QueueInput {
    fn default() -> Self {
        Self {
            arrival_rate: 2.0,
            service_rate: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueOutput {
    /// ρ = λ/μ
    pub utilization: f64,
    /// L = ρ/(1−ρ)
    pub mean_in_system: f64,
    /// W = 1/(μ−λ)
    pub mean_time_in_system: f64,
    /// Lq = ρ²/(1−ρ)
    pub mean_in_queue: f64,
    /// Wq = ρ/(μ−λ)
    pub mean_wait_in_queue: f64,
}

impl QueueOutput {
    pub fn chart(&self) -> Chart {
        Chart::bar("M/M/1 Queue Summary")
            .with_bar("Utilization (ρ)", self.utilization)
            .with_bar("L", self.mean_in_system)
            .with_bar("W", self.mean_time_in_system)
    }
}

pub fn mm1(input: &QueueInput) -> ModelResult<QueueOutput> {
    let QueueInput {
        arrival_rate: lambda,
        service_rate: mu,
    } = *input;

    if lambda >= mu || lambda.is_nan() || mu.is_nan() {
        return Err(ModelError::UnstableQueue {
            arrival_rate: lambda,
            service_rate: mu,
        });
    }

    let rho = lambda / mu;
    Ok(QueueOutput {
        utilization: rho,
        mean_in_system: rho / (1.0 - rho),
        mean_time_in_system: 1.0 / (mu - lambda),
        mean_in_queue: rho * rho / (1.0 - rho),
        mean_wait_in_queue: rho / (mu - lambda),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rates() {
        let out = mm1(&QueueInput::default()).unwrap();
        assert_eq!(out.utilization, 0.5);
        assert_eq!(out.mean_in_system, 1.0);
        assert_eq!(out.mean_time_in_system, 0.5);
        assert_eq!(out.mean_in_queue, 0.5);
        assert_eq!(out.mean_wait_in_queue, 0.25);
    }

    #[test]
    fn overloaded_queue_is_invalid() {
        let err = mm1(&QueueInput {
            arrival_rate: 5.0,
            service_rate: 3.0,
        })
        .unwrap_err();
        assert!(matches!(err, ModelError::UnstableQueue { .. }));
    }

    #[test]
    fn saturated_queue_is_invalid() {
        assert!(mm1(&QueueInput {
            arrival_rate: 4.0,
            service_rate: 4.0,
        })
        .is_err());
    }

    #[test]
    fn nan_rate_is_invalid() {
        assert!(mm1(&QueueInput {
            arrival_rate: f64::NAN,
            service_rate: 4.0,
        })
        .is_err());
    }

    #[test]
    fn chart_has_three_bars() {
        let chart = mm1(&QueueInput::default()).unwrap().chart();
        let labels: Vec<_> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Utilization (ρ)", "L", "W"]);
    }
}
