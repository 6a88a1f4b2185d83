// Break-even analysis: the output level where revenue `P·q` first covers total
// cost `FC + VC·q`.

use super::chart::{linspace, Chart, Series};
use super::model_error::{ModelError, ModelResult};

pub const CURVE_SAMPLES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakEvenInput {
    pub fixed_cost: f64,
    pub variable_cost: f64,
    pub price: f64,
}

impl Default for BreakEvenInput {
    fn default() -> Self {
        Self {
            fixed_cost: 10_000.0,
            variable_cost: 20.0,
            price: 50.0,
        }
    }
}

impl BreakEvenInput {
    pub fn total_cost(&self, q: f64) -> f64 {
        self.fixed_cost + self.variable_cost * q
    }

    pub fn revenue(&self, q: f64) -> f64 {
        self.price * q
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakEvenOutput {
    pub quantity: f64,
    /// P − VC
    pub contribution_margin: f64,
    pub cost_curve: Series,
    pub revenue_curve: Series,
}

impl BreakEvenOutput {
    pub fn chart(&self) -> Chart {
        Chart::line("Break-even Analysis")
            .with_axes("Quantity", "Amount")
            .with_series(self.cost_curve.clone())
            .with_series(self.revenue_curve.clone())
            .with_marker("Break-even Point", self.quantity)
    }
}

pub fn break_even(input: &BreakEvenInput) -> ModelResult<BreakEvenOutput> {
    if input.price <= input.variable_cost
        || input.price.is_nan()
        || input.variable_cost.is_nan()
    {
        return Err(ModelError::UnprofitablePrice {
            price: input.price,
            variable_cost: input.variable_cost,
        });
    }

    let contribution_margin = input.price - input.variable_cost;
    let quantity = input.fixed_cost / contribution_margin;

    let grid = linspace(0.0, 2.0 * quantity, CURVE_SAMPLES);
    Ok(BreakEvenOutput {
        quantity,
        contribution_margin,
        cost_curve: Series::sample("Total Cost", &grid, |q| input.total_cost(q)),
        revenue_curve: Series::sample("Revenue", &grid, |q| input.revenue(q)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario() {
        let input = BreakEvenInput::default();
        let out = break_even(&input).unwrap();
        assert_eq!(out.contribution_margin, 30.0);
        assert_eq!(format!("{:.2}", out.quantity), "333.33");
        assert!((input.total_cost(out.quantity) - input.revenue(out.quantity)).abs() < 1e-6);
    }

    #[test]
    fn curves_cover_zero_to_twice_break_even() {
        let out = break_even(&BreakEvenInput::default()).unwrap();
        assert_eq!(out.cost_curve.len(), CURVE_SAMPLES);
        assert_eq!(out.revenue_curve.x[0], 0.0);
        assert_eq!(out.cost_curve.y[0], 10_000.0);
        assert!((out.revenue_curve.x[CURVE_SAMPLES - 1] - 2.0 * out.quantity).abs() < 1e-9);
    }

    #[test]
    fn price_equal_to_variable_cost_is_invalid() {
        let input = BreakEvenInput {
            price: 20.0,
            variable_cost: 20.0,
            ..BreakEvenInput::default()
        };
        assert!(matches!(
            break_even(&input),
            Err(ModelError::UnprofitablePrice { .. })
        ));
    }

    #[test]
    fn chart_has_cost_revenue_and_marker() {
        let out = break_even(&BreakEvenInput::default()).unwrap();
        let chart = out.chart();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[1].label, "Revenue");
        assert_eq!(chart.markers[0].label, "Break-even Point");
        assert_eq!(chart.markers[0].x, out.quantity);
    }
}
