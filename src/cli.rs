use std::io::Write;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{Dashboard, DashboardDefaults, TabReport};
use crate::domain::{
    BreakEvenInput, Chart, ChartKind, InventoryInput, Product, ProductionInput, QueueInput,
    Resource, SolverBackend, SolverConfig,
};

/// Width of the longest bar in text bar charts
const BAR_WIDTH: usize = 40;

/// Evaluate one dashboard tab and print its report.
#[derive(Debug, Parser)]
#[command(name = "opsdash", about = "Operations-research calculators: LP production mix, EOQ, M/M/1, break-even.")]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Maximize profit of a production mix under resource limits.
    ///
    /// Without `--product` the two-product textbook problem is solved.
    Production {
        /// Product and its unit profit, e.g. `Chairs=30`. Repeatable.
        #[arg(long = "product", value_name = "NAME=PROFIT", value_parser = parse_product)]
        products: Vec<Product>,

        /// Resource limit and per-product usage, e.g. `Labor=100:2,3`. Repeatable.
        #[arg(long = "resource", value_name = "NAME=AVAILABLE:USAGE,...", value_parser = parse_resource)]
        resources: Vec<Resource>,

        /// LP backend (auto, microlp, highs).
        #[arg(long, default_value = "auto")]
        solver: SolverBackend,

        /// Solver time limit in seconds (HiGHS only).
        #[arg(long)]
        time_limit: Option<f64>,
    },

    /// Economic order quantity.
    Eoq {
        /// Annual demand (D).
        #[arg(long, default_value_t = InventoryInput::default().annual_demand, allow_negative_numbers = true)]
        demand: f64,
        /// Cost per order (S).
        #[arg(long, default_value_t = InventoryInput::default().ordering_cost, allow_negative_numbers = true)]
        ordering_cost: f64,
        /// Holding cost per unit per year (H).
        #[arg(long, default_value_t = InventoryInput::default().holding_cost, allow_negative_numbers = true)]
        holding_cost: f64,
    },

    /// M/M/1 queue metrics.
    Queue {
        /// Mean arrival rate (λ).
        #[arg(long, default_value_t = QueueInput::default().arrival_rate, allow_negative_numbers = true)]
        arrival_rate: f64,
        /// Mean service rate (μ).
        #[arg(long, default_value_t = QueueInput::default().service_rate, allow_negative_numbers = true)]
        service_rate: f64,
    },

    /// Break-even quantity.
    BreakEven {
        /// Fixed cost (FC).
        #[arg(long, default_value_t = BreakEvenInput::default().fixed_cost, allow_negative_numbers = true)]
        fixed_cost: f64,
        /// Variable cost per unit (VC).
        #[arg(long, default_value_t = BreakEvenInput::default().variable_cost, allow_negative_numbers = true)]
        variable_cost: f64,
        /// Selling price per unit (P).
        #[arg(long, default_value_t = BreakEvenInput::default().price, allow_negative_numbers = true)]
        price: f64,
    },

    /// Print the default inputs of every tab.
    Defaults,
}

fn parse_product(raw: &str) -> std::result::Result<Product, String> {
    let (name, profit) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PROFIT, got '{}'", raw))?;
    let profit = profit
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid profit '{}': {}", profit, e))?;
    Ok(Product::new(name.trim(), profit))
}

fn parse_resource(raw: &str) -> std::result::Result<Resource, String> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=AVAILABLE:USAGE,..., got '{}'", raw))?;
    let (available, usage) = rest
        .split_once(':')
        .ok_or_else(|| format!("missing ':' before usage list in '{}'", raw))?;
    let available = available
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid availability '{}': {}", available, e))?;
    let usage = usage
        .split(',')
        .map(|u| {
            u.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid usage '{}': {}", u, e))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Resource::new(name.trim(), usage, available))
}

fn production_input(
    products: Vec<Product>,
    resources: Vec<Resource>,
    solver_config: SolverConfig,
) -> Result<ProductionInput> {
    if products.is_empty() {
        if !resources.is_empty() {
            return Err(anyhow!("--resource requires at least one --product"));
        }
        return Ok(ProductionInput {
            solver_config,
            ..ProductionInput::default()
        });
    }
    Ok(ProductionInput {
        products,
        resources,
        solver_config,
    })
}

/// Run the CLI; returns whether the report was a success
pub fn run(args: Args, out: &mut impl Write) -> Result<bool> {
    let dashboard = Dashboard::new();

    let report = match args.command {
        Command::Production {
            products,
            resources,
            solver,
            time_limit,
        } => {
            let config = SolverConfig {
                backend: solver,
                time_limit,
                verbose: false,
            };
            dashboard.production(&production_input(products, resources, config)?)
        }
        Command::Eoq {
            demand,
            ordering_cost,
            holding_cost,
        } => dashboard.inventory(&InventoryInput {
            annual_demand: demand,
            ordering_cost,
            holding_cost,
        }),
        Command::Queue {
            arrival_rate,
            service_rate,
        } => dashboard.queue(&QueueInput {
            arrival_rate,
            service_rate,
        }),
        Command::BreakEven {
            fixed_cost,
            variable_cost,
            price,
        } => dashboard.break_even(&BreakEvenInput {
            fixed_cost,
            variable_cost,
            price,
        }),
        Command::Defaults => {
            write_defaults(&dashboard.defaults(), out).context("failed to write output")?;
            return Ok(true);
        }
    };

    write_report(&report, out).context("failed to write output")?;
    Ok(report.is_success())
}

pub fn write_report(report: &TabReport, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "== {} ==", report.tab)?;
    writeln!(out, "{}", report.message)?;
    if let Some(solve) = &report.solve {
        writeln!(
            out,
            "Solved by {} in {:.3} ms ({} variables, {} constraints)",
            solve.solver,
            solve.statistics.solve_time_ms,
            solve.statistics.num_variables,
            solve.statistics.num_constraints
        )?;
    }
    if let Some(chart) = &report.chart {
        writeln!(out)?;
        write_chart(chart, out)?;
    }
    Ok(())
}

/// Plain-text rendition of a chart description
pub fn write_chart(chart: &Chart, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", chart.title)?;
    match chart.kind {
        ChartKind::Bar => {
            let label_width = chart
                .bars
                .iter()
                .map(|b| b.label.chars().count())
                .max()
                .unwrap_or(0);
            let max = chart
                .bars
                .iter()
                .map(|b| b.value.abs())
                .fold(0.0_f64, f64::max);
            for bar in &chart.bars {
                let len = if max > 0.0 {
                    ((bar.value.abs() / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                writeln!(
                    out,
                    "  {:<width$} | {} {:.2}",
                    bar.label,
                    "#".repeat(len),
                    bar.value,
                    width = label_width
                )?;
            }
        }
        ChartKind::Line => {
            writeln!(out, "  x: {}  y: {}", chart.x_label, chart.y_label)?;
            for series in &chart.series {
                let (Some(first), Some(last)) = (series.x.first(), series.x.last()) else {
                    continue;
                };
                write!(
                    out,
                    "  {}: {} points over [{:.2}, {:.2}]",
                    series.label,
                    series.len(),
                    first,
                    last
                )?;
                if let Some((x, y)) = series.min_point() {
                    write!(out, ", min {:.2} at {:.2}", y, x)?;
                }
                writeln!(out)?;
            }
            for marker in &chart.markers {
                writeln!(out, "  | {} at {:.2}", marker.label, marker.x)?;
            }
        }
    }
    Ok(())
}

fn write_defaults(defaults: &DashboardDefaults, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "production:")?;
    for p in &defaults.production.products {
        writeln!(out, "  product {} profit {}", p.name, p.unit_profit)?;
    }
    for r in &defaults.production.resources {
        writeln!(out, "  resource {} usage {:?} available {}", r.name, r.usage, r.available)?;
    }
    let inv = &defaults.inventory;
    writeln!(
        out,
        "eoq: demand {} ordering_cost {} holding_cost {}",
        inv.annual_demand, inv.ordering_cost, inv.holding_cost
    )?;
    let q = &defaults.queue;
    writeln!(
        out,
        "queue: arrival_rate {} service_rate {}",
        q.arrival_rate, q.service_rate
    )?;
    let be = &defaults.break_even;
    writeln!(
        out,
        "break-even: fixed_cost {} variable_cost {} price {}",
        be.fixed_cost, be.variable_cost, be.price
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_cli(argv: &[&str]) -> (bool, String) {
        let args = Args::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let ok = run(args, &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn eoq_with_defaults() {
        let (ok, text) = run_cli(&["opsdash", "eoq"]);
        assert!(ok);
        assert!(text.contains("Economic Order Quantity (EOQ): 223.61 units"));
        assert!(text.contains("| EOQ at 223.61"));
    }

    #[test]
    fn queue_overload_reports_failure() {
        let (ok, text) = run_cli(&[
            "opsdash",
            "queue",
            "--arrival-rate",
            "5",
            "--service-rate",
            "3",
        ]);
        assert!(!ok);
        assert!(text.contains("Invalid model"));
    }

    #[test]
    fn break_even_accepts_negative_numbers() {
        let (ok, text) = run_cli(&["opsdash", "break-even", "--price", "-1"]);
        assert!(!ok);
        assert!(text.contains("Selling price must be greater than variable cost."));
    }

    #[test]
    fn production_with_custom_mix() {
        let (ok, text) = run_cli(&[
            "opsdash",
            "production",
            "--solver",
            "microlp",
            "--product",
            "Chairs=30",
            "--product",
            "Tables=50",
            "--resource",
            "Labor=100:2,3",
            "--resource",
            "Storage=40:1,1",
        ]);
        assert!(ok);
        // Tables use labour best: 100/3 of them, storage left slack
        assert!(text.contains("Tables = 33.33, Total Profit = 1666.67"));
        assert!(text.contains("(2 variables, 2 constraints)"));
        assert!(text.contains("Tables | "));
    }

    #[test]
    fn resource_parser_rejects_missing_usage() {
        assert!(parse_resource("Labor=100").is_err());
        let r = parse_resource("Labor = 100 : 2, 3").unwrap();
        assert_eq!(r.name, "Labor");
        assert_eq!(r.usage, vec![2.0, 3.0]);
        assert_eq!(r.available, 100.0);
    }

    #[test]
    fn defaults_lists_every_tab() {
        let (_, text) = run_cli(&["opsdash", "defaults"]);
        assert!(text.contains("product Product A profit 40"));
        assert!(text.contains("queue: arrival_rate 2 service_rate 4"));
    }
}
