//! Algoviz server binary
//!
//! Usage: `algoviz [algorithm] [port]`. Everything else comes from the
//! `ALGOVIZ_*` environment variables.

use algoviz_vis::{Session, VisConfig, VisServer};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algoviz=info,algoviz_vis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = VisConfig::from_env()?;

    // Parse command line args
    let args: Vec<String> = env::args().collect();
    if let Some(algorithm) = args.get(1) {
        config.algorithm = algorithm.parse()?;
    }
    if let Some(port) = args.get(2) {
        config = config.with_port(port.parse()?);
    }

    println!("Algoviz");
    println!("=======");
    println!();
    println!("Algorithm: {}", config.algorithm);
    println!("Speed:     {}", config.speed.get());
    match config.seed {
        Some(seed) => println!("Seed:      {}", seed),
        None => println!("Seed:      random"),
    }
    println!();
    println!("Starting server on http://{}", config.addr);
    println!();

    let addr = config.addr;
    let server = VisServer::new(Session::new(config));
    server.serve(addr).await?;

    Ok(())
}
