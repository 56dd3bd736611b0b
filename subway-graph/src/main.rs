use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use subway_graph::config::AppConfig;
use subway_graph::domain::ComplexId;
use subway_graph::graph::GraphHandle;
use subway_graph::sources::NetworkSources;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Fail fast on unreadable or malformed sources
    let sources = NetworkSources::load(&config.sources).expect("Failed to load transit sources");
    let sources = Arc::new(sources);

    let handle = GraphHandle::new();
    let failures = handle
        .rebuild(sources.clone(), config.build.clone())
        .await
        .expect("Graph build failed");
    let graph = handle.snapshot().await.expect("Graph not published");

    println!(
        "Built {} graph: {} complexes, {} edges, {} routes",
        graph.policy(),
        graph.node_count(),
        graph.edge_count(),
        graph.routes().len()
    );
    for failure in &failures {
        warn!(
            route = %failure.route,
            direction = %failure.direction,
            error = %failure.error,
            "Route direction excluded"
        );
    }

    // Optional: directions between two complexes
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [from, to] = args.as_slice() {
        let from = ComplexId::new(from).expect("Invalid origin complex ID");
        let to = ComplexId::new(to).expect("Invalid destination complex ID");

        match graph.directions(&from, &to) {
            Some(directions) => println!("\n{directions}"),
            None => println!("\nNo path from {from} to {to}"),
        }

        let alternatives = graph.all_shortest_paths(&from, &to).len();
        if alternatives > 1 {
            println!("({alternatives} equally short paths)");
        }
    }
}
