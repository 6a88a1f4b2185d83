// Example client exercising every tab of a running opsdash-server
//
// Start the server first:
//   cargo run --features server --bin opsdash-server
// then:
//   cargo run --features server --example dashboard_client

use tonic::Request;

pub mod or_dashboard {
    tonic::include_proto!("or_dashboard");
}

use or_dashboard::{
    operations_dashboard_client::OperationsDashboardClient, BreakEvenRequest, Empty,
    InventoryRequest, Product, ProductionRequest, QueueRequest, Resource, TabReport,
};

fn print_report(report: &TabReport) {
    println!("{}", report.message);
    if let Some(chart) = &report.chart {
        println!(
            "  chart '{}': {} bars, {} series, {} markers",
            chart.title,
            chart.bars.len(),
            chart.series.len(),
            chart.markers.len()
        );
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut client = OperationsDashboardClient::connect("http://127.0.0.1:50051").await?;

    println!("=== Default production mix ===");
    let report = client
        .optimize_production(Request::new(ProductionRequest::default()))
        .await?
        .into_inner();
    print_report(&report);

    // Chairs and tables sharing labour and storage
    println!("=== Chairs and tables ===");
    let request = ProductionRequest {
        products: vec![
            Product {
                name: "Chairs".to_string(),
                unit_profit: 30.0,
            },
            Product {
                name: "Tables".to_string(),
                unit_profit: 50.0,
            },
        ],
        resources: vec![
            Resource {
                name: "Labor hours".to_string(),
                usage: vec![2.0, 3.0],
                available: 100.0,
            },
            Resource {
                name: "Storage".to_string(),
                usage: vec![1.0, 1.0],
                available: 40.0,
            },
        ],
        solver_config: None,
    };
    print_report(&client.optimize_production(Request::new(request)).await?.into_inner());

    println!("=== EOQ ===");
    let report = client
        .compute_eoq(Request::new(InventoryRequest::default()))
        .await?
        .into_inner();
    print_report(&report);

    println!("=== M/M/1 (overloaded) ===");
    let report = client
        .evaluate_queue(Request::new(QueueRequest {
            arrival_rate: Some(5.0),
            service_rate: Some(3.0),
        }))
        .await?
        .into_inner();
    print_report(&report);

    println!("=== Break-even ===");
    let report = client
        .analyze_break_even(Request::new(BreakEvenRequest::default()))
        .await?
        .into_inner();
    print_report(&report);

    let solvers = client.list_solvers(Request::new(Empty {})).await?.into_inner();
    for solver in solvers.solvers {
        println!("{} (available: {})", solver.name, solver.available);
    }

    Ok(())
}
