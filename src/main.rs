// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use hippo_alexa::Skill;
use hippo_alexa::config::{Config, LogLevel};
use hippo_alexa::server::Server;

/// Alexa Smart Home adapter for the hippoledd daemon.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file; defaults are used if it does not exist.
    #[arg(short, long, default_value = "hippo-alexa.toml")]
    config: PathBuf,

    /// Port to listen on, overriding the configuration.
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level, overriding the configuration.
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_found = args.config.exists();
    let mut config = Config::from_file_or_default(&args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let level = args.log_level.unwrap_or(config.logging.level);
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(level))
        .init();

    if config_found {
        tracing::info!(path = %args.config.display(), "Loaded configuration");
    } else {
        tracing::info!(path = %args.config.display(), "No configuration file, using defaults");
    }

    let gateway = config.gateway.gateway_config().into_client()?;
    tracing::info!(daemon = gateway.base_url(), "Using device daemon");

    let mut skill = Skill::new(gateway);
    if let Some(thermostat) = config.thermostat.endpoint() {
        tracing::info!(endpoint_id = %thermostat.endpoint_id, "Thermostat enabled");
        skill = skill.with_thermostat(thermostat);
    }

    let server = Server::bind(config.server.socket_addr(), skill).await?;
    server
        .serve(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "Failed to listen for Ctrl-C");
            }
        })
        .await?;

    tracing::info!("Stopped");
    Ok(())
}
