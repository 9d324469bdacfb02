//! # For the Cult demo
//!
//! Runs a typical search → product → checkout → categories sequence.
//!
//! ## Usage
//!
//! ```bash
//! # Optional: point at another deployment
//! export CULT_API_BASE_URL=http://localhost:3000/api
//!
//! cult-demo                    # search, details, checkout, categories
//! cult-demo wait <order-id>     # poll until paid, closed or timed out
//! cult-demo track <order-id>    # status, tracking and totals
//! ```

use cult_client::CultClient;
use cult_demo::Demo;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let client = CultClient::from_env()?;
    info!("API: {}", client.config().api_base_url);

    let mut demo = Demo::new(client);
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.as_slice() {
        [] => demo.run().await,
        [cmd, order_id] if cmd == "wait" => demo.wait_for_payment(order_id).await.map(|_| ()),
        [cmd, order_id] if cmd == "track" => demo.track_order(order_id).await.map(|_| ()),
        _ => {
            eprintln!("usage: cult-demo [wait <order-id> | track <order-id>]");
            return Ok(ExitCode::from(2));
        }
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        return Ok(ExitCode::FAILURE);
    }

    println!("\n{}", "=".repeat(50));
    println!("Examples completed!");

    Ok(ExitCode::SUCCESS)
}

fn print_banner() {
    println!(
        r#"
  For the Cult API - Rust Examples
  Version: {}
{}
"#,
        env!("CARGO_PKG_VERSION"),
        "=".repeat(50)
    );
}
