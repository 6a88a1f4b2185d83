// Economic Order Quantity model.
//
// EOQ   = sqrt(2·D·S / H)
// TC(q) = (D/q)·S + (q/2)·H
//
// D is annual demand, S the cost of placing one order and H the cost of holding
// one unit for a year.

use super::chart::{linspace, Chart, Series};
use super::model_error::{ModelError, ModelResult};

/// Number of points on the sampled cost curve
pub const CURVE_SAMPLES: usize = 100;

/// Curve start used whenever the curve extends past it
const CURVE_START: f64 = 1.0;

/// Curve end when EOQ is zero and `2·EOQ` gives no span at all
const ZERO_EOQ_CURVE_END: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryInput {
    pub annual_demand: f64,
    pub ordering_cost: f64,
    pub holding_cost: f64,
}

impl Default for InventoryInput {
    fn default() -> Self {
        Self {
            annual_demand: 1000.0,
            ordering_cost: 50.0,
            holding_cost: 2.0,
        }
    }
}

impl InventoryInput {
    /// Annual ordering plus holding cost when ordering `q` units at a time
    pub fn total_cost(&self, q: f64) -> f64 {
        (self.annual_demand / q) * self.ordering_cost + (q / 2.0) * self.holding_cost
    }

    fn check(&self) -> ModelResult<()> {
        let fields = [
            ("annual demand (D)", self.annual_demand),
            ("ordering cost (S)", self.ordering_cost),
            ("holding cost (H)", self.holding_cost),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::InvalidParameters(format!("{} must be finite", name)));
        }
        if self.holding_cost <= 0.0 {
            return Err(ModelError::InvalidParameters(
                "holding cost (H) must be positive".to_string(),
            ));
        }
        if self.annual_demand < 0.0 || self.ordering_cost < 0.0 {
            return Err(ModelError::InvalidParameters(
                "annual demand (D) and ordering cost (S) must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryOutput {
    pub eoq: f64,
    /// Total cost at the EOQ; `TC(0)` is undefined so this is `None` when EOQ is zero
    pub minimum_cost: Option<f64>,
    pub cost_curve: Series,
}

impl InventoryOutput {
    pub fn chart(&self) -> Chart {
        Chart::line("Total Cost vs Order Quantity")
            .with_axes("Order Quantity", "Total Cost")
            .with_series(self.cost_curve.clone())
            .with_marker("EOQ", self.eoq)
    }
}

/// Economic order quantity and its sampled total-cost curve
pub fn economic_order_quantity(input: &InventoryInput) -> ModelResult<InventoryOutput> {
    input.check()?;

    let eoq = (2.0 * input.annual_demand * input.ordering_cost / input.holding_cost).sqrt();

    let end = 2.0 * eoq;
    let small_start = end / CURVE_SAMPLES as f64;
    let (start, end) = if end > CURVE_START {
        (CURVE_START, end)
    } else if small_start > 0.0 {
        (small_start, end)
    } else {
        (ZERO_EOQ_CURVE_END / CURVE_SAMPLES as f64, ZERO_EOQ_CURVE_END)
    };
    let grid = linspace(start, end, CURVE_SAMPLES);
    let cost_curve = Series::sample("Total Cost", &grid, |q| input.total_cost(q));

    let minimum_cost = (eoq > 0.0).then(|| input.total_cost(eoq));

    Ok(InventoryOutput {
        eoq,
        minimum_cost,
        cost_curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_matches_textbook_value() {
        let out = economic_order_quantity(&InventoryInput::default()).unwrap();
        assert!((out.eoq - 223.6068).abs() < 1e-3);
        assert_eq!(format!("{:.2}", out.eoq), "223.61");
        // TC(EOQ) = sqrt(2DSH) = sqrt(200000)
        assert!((out.minimum_cost.unwrap() - 447.2136).abs() < 1e-3);
    }

    #[test]
    fn curve_spans_one_to_twice_eoq() {
        let out = economic_order_quantity(&InventoryInput::default()).unwrap();
        assert_eq!(out.cost_curve.len(), CURVE_SAMPLES);
        assert_eq!(out.cost_curve.x[0], 1.0);
        assert!((out.cost_curve.x[CURVE_SAMPLES - 1] - 2.0 * out.eoq).abs() < 1e-9);
    }

    #[test]
    fn small_eoq_curve_still_ends_at_twice_eoq() {
        let input = InventoryInput {
            annual_demand: 0.01,
            ordering_cost: 1.0,
            holding_cost: 1.0,
        };
        let out = economic_order_quantity(&input).unwrap();
        let end = 2.0 * out.eoq;
        assert!((out.eoq - 0.02f64.sqrt()).abs() < 1e-12);
        assert_eq!(out.cost_curve.x[CURVE_SAMPLES - 1], end);
        assert!((out.cost_curve.x[0] - end / CURVE_SAMPLES as f64).abs() < 1e-15);
        let (_, lowest) = out.cost_curve.min_point().unwrap();
        assert!(lowest >= out.minimum_cost.unwrap() * (1.0 - 1e-9));
    }

    #[test]
    fn zero_demand_gives_zero_eoq_without_dividing_by_zero() {
        let input = InventoryInput {
            annual_demand: 0.0,
            ..InventoryInput::default()
        };
        let out = economic_order_quantity(&input).unwrap();
        assert_eq!(out.eoq, 0.0);
        assert_eq!(out.minimum_cost, None);
        assert_eq!(out.cost_curve.x[CURVE_SAMPLES - 1], 2.0);
        assert!(out.cost_curve.x.iter().all(|&q| q > 0.0));
        assert!(out.cost_curve.y.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn non_positive_holding_cost_is_rejected() {
        for h in [0.0, -2.0] {
            let input = InventoryInput {
                holding_cost: h,
                ..InventoryInput::default()
            };
            assert!(matches!(
                economic_order_quantity(&input),
                Err(ModelError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn negative_demand_or_nan_is_rejected() {
        let negative = InventoryInput {
            annual_demand: -5.0,
            ..InventoryInput::default()
        };
        assert!(economic_order_quantity(&negative).is_err());

        let nan = InventoryInput {
            ordering_cost: f64::NAN,
            ..InventoryInput::default()
        };
        let err = economic_order_quantity(&nan).unwrap_err();
        assert!(err.to_string().contains("ordering cost (S) must be finite"));
    }

    #[test]
    fn chart_marks_eoq() {
        let out = economic_order_quantity(&InventoryInput::default()).unwrap();
        let chart = out.chart();
        assert_eq!(chart.title, "Total Cost vs Order Quantity");
        assert_eq!(chart.y_label, "Total Cost");
        assert_eq!(chart.markers[0].x, out.eoq);
    }
}
