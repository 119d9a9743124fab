//! Blitz-gate standalone binary.

use blitz_gateway::{cli, GatewayArgs};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = GatewayArgs::parse();
    cli::run(args).await
}
