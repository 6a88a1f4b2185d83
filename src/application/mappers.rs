// Mappers: Convert between gRPC protobuf types and domain models
// Protobuf types stay out of the domain; everything crosses this boundary

use crate::application::{DashboardDefaults, ReportStatus, SolveSummary, TabReport};
use crate::domain::{
    BreakEvenInput, Chart, ChartKind, InventoryInput, Product, ProductionInput, QueueInput,
    Resource, SolverBackend, SolverConfig, SolverError, Tab,
};
use tonic::Status;

pub mod or_dashboard {
    tonic::include_proto!("or_dashboard");
}

use or_dashboard as proto;

fn proto_to_domain_solver_config(cfg: &proto::SolverConfig) -> SolverConfig {
    let backend = match proto::solver_config::SolverBackend::try_from(cfg.solver) {
        Ok(proto::solver_config::SolverBackend::Auto) => SolverBackend::Auto,
        Ok(proto::solver_config::SolverBackend::MicroLp) => SolverBackend::MicroLp,
        Ok(proto::solver_config::SolverBackend::Highs) => SolverBackend::Highs,
        Err(_) => SolverBackend::Auto,
    };

    SolverConfig {
        backend,
        time_limit: (cfg.time_limit > 0.0).then_some(cfg.time_limit),
        verbose: cfg.verbose,
    }
}

/// Convert a production request; an empty product list selects the default problem
pub fn proto_to_domain_production(
    request: proto::ProductionRequest,
) -> std::result::Result<ProductionInput, Box<Status>> {
    let defaults = ProductionInput::default();
    let solver_config = request
        .solver_config
        .as_ref()
        .map(proto_to_domain_solver_config)
        .unwrap_or_default();

    if request.products.is_empty() {
        if !request.resources.is_empty() {
            return Err(Box::new(Status::invalid_argument(
                "Resources were given without any products",
            )));
        }
        return Ok(ProductionInput {
            solver_config,
            ..defaults
        });
    }

    let num_products = request.products.len();
    for (i, r) in request.resources.iter().enumerate() {
        if r.usage.len() != num_products {
            return Err(Box::new(Status::invalid_argument(format!(
                "Resource {} '{}' has {} usage coefficients but there are {} products",
                i,
                r.name,
                r.usage.len(),
                num_products
            ))));
        }
    }

    Ok(ProductionInput {
        products: request
            .products
            .into_iter()
            .map(|p| Product::new(p.name, p.unit_profit))
            .collect(),
        resources: request
            .resources
            .into_iter()
            .map(|r| Resource::new(r.name, r.usage, r.available))
            .collect(),
        solver_config,
    })
}

pub fn proto_to_domain_inventory(request: &proto::InventoryRequest) -> InventoryInput {
    let defaults = InventoryInput::default();
    InventoryInput {
        annual_demand: request.annual_demand.unwrap_or(defaults.annual_demand),
        ordering_cost: request.ordering_cost.unwrap_or(defaults.ordering_cost),
        holding_cost: request.holding_cost.unwrap_or(defaults.holding_cost),
    }
}

pub fn proto_to_domain_queue(request: &proto::QueueRequest) -> QueueInput {
    let defaults = QueueInput::default();
    QueueInput {
        arrival_rate: request.arrival_rate.unwrap_or(defaults.arrival_rate),
        service_rate: request.service_rate.unwrap_or(defaults.service_rate),
    }
}

pub fn proto_to_domain_break_even(request: &proto::BreakEvenRequest) -> BreakEvenInput {
    let defaults = BreakEvenInput::default();
    BreakEvenInput {
        fixed_cost: request.fixed_cost.unwrap_or(defaults.fixed_cost),
        variable_cost: request.variable_cost.unwrap_or(defaults.variable_cost),
        price: request.price.unwrap_or(defaults.price),
    }
}

fn domain_to_proto_chart(chart: Chart) -> proto::Chart {
    let kind = match chart.kind {
        ChartKind::Bar => proto::chart::ChartKind::Bar,
        ChartKind::Line => proto::chart::ChartKind::Line,
    };

    proto::Chart {
        kind: kind as i32,
        title: chart.title,
        x_label: chart.x_label,
        y_label: chart.y_label,
        bars: chart
            .bars
            .into_iter()
            .map(|b| proto::Bar {
                label: b.label,
                value: b.value,
            })
            .collect(),
        series: chart
            .series
            .into_iter()
            .map(|s| proto::Series {
                label: s.label,
                x: s.x,
                y: s.y,
            })
            .collect(),
        markers: chart
            .markers
            .into_iter()
            .map(|m| proto::Marker {
                label: m.label,
                x: m.x,
            })
            .collect(),
    }
}

/// Convert a domain report to protobuf TabReport
pub fn domain_to_proto_report(report: TabReport) -> proto::TabReport {
    let tab = match report.tab {
        Tab::Production => proto::Tab::Production,
        Tab::Inventory => proto::Tab::Inventory,
        Tab::Queue => proto::Tab::Queue,
        Tab::BreakEven => proto::Tab::BreakEven,
    };
    let status = match report.status {
        ReportStatus::Success => proto::ReportStatus::Success,
        ReportStatus::Error => proto::ReportStatus::Error,
    };

    proto::TabReport {
        tab: tab as i32,
        status: status as i32,
        message: report.message,
        chart: report.chart.map(domain_to_proto_chart),
        statistics: report.solve.map(domain_to_proto_statistics),
    }
}

fn domain_to_proto_statistics(solve: SolveSummary) -> proto::SolveStatistics {
    proto::SolveStatistics {
        solver_backend: solve.solver,
        solve_time_ms: solve.statistics.solve_time_ms,
        num_variables: solve.statistics.num_variables,
        num_constraints: solve.statistics.num_constraints,
    }
}

/// A problem the solver refuses is the caller's fault; a crashed backend is ours
pub fn solver_error_to_status(err: SolverError) -> Status {
    match err {
        SolverError::InvalidProblem(_) => Status::invalid_argument(err.to_string()),
        SolverError::ExecutionFailed(_) => Status::internal(err.to_string()),
    }
}

fn domain_to_proto_production(input: &ProductionInput) -> proto::ProductionRequest {
    let solver = match input.solver_config.backend {
        SolverBackend::Auto => proto::solver_config::SolverBackend::Auto,
        SolverBackend::MicroLp => proto::solver_config::SolverBackend::MicroLp,
        SolverBackend::Highs => proto::solver_config::SolverBackend::Highs,
    };

    proto::ProductionRequest {
        products: input
            .products
            .iter()
            .map(|p| proto::Product {
                name: p.name.clone(),
                unit_profit: p.unit_profit,
            })
            .collect(),
        resources: input
            .resources
            .iter()
            .map(|r| proto::Resource {
                name: r.name.clone(),
                usage: r.usage.clone(),
                available: r.available,
            })
            .collect(),
        solver_config: Some(proto::SolverConfig {
            solver: solver as i32,
            time_limit: input.solver_config.time_limit.unwrap_or(0.0),
            verbose: input.solver_config.verbose,
        }),
    }
}

pub fn domain_to_proto_defaults(defaults: &DashboardDefaults) -> proto::DashboardDefaults {
    proto::DashboardDefaults {
        production: Some(domain_to_proto_production(&defaults.production)),
        inventory: Some(proto::InventoryRequest {
            annual_demand: Some(defaults.inventory.annual_demand),
            ordering_cost: Some(defaults.inventory.ordering_cost),
            holding_cost: Some(defaults.inventory.holding_cost),
        }),
        queue: Some(proto::QueueRequest {
            arrival_rate: Some(defaults.queue.arrival_rate),
            service_rate: Some(defaults.queue.service_rate),
        }),
        break_even: Some(proto::BreakEvenRequest {
            fixed_cost: Some(defaults.break_even.fixed_cost),
            variable_cost: Some(defaults.break_even.variable_cost),
            price: Some(defaults.break_even.price),
        }),
    }
}
