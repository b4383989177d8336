use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{inspect_dataset, serve};

#[derive(Parser)]
#[command(name = "forecast-dashboard")]
#[command(about = "Procurement forecast dashboard web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the forecast file and start the web server
    Serve {
        /// Path to the forecast file
        ///
        /// A delimited file with a header row. Expected columns (matched
        /// case-insensitively, surrounding spaces ignored):
        ///   SUPPLIER, MATERIAL, MATERIAL DESCRIPTION,
        ///   FORECASTED DATE (day first, e.g. 31/01/2025), FORECASTED QUANTITY
        #[arg(short, long, env = "DATA_PATH", default_value = "forecaste_data.csv")]
        data_path: PathBuf,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 127.0.0.1:8050, 0.0.0.0:3000)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "127.0.0.1:8050")]
        bind_address: String,
    },
    /// Load the forecast file and report what was found, without serving
    ///
    /// Fails the same way `serve` would on a missing or malformed file.
    Inspect {
        /// Path to the forecast file
        #[arg(short, long, env = "DATA_PATH", default_value = "forecaste_data.csv")]
        data_path: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { data_path, bind_address } => {
                serve(&data_path, &bind_address).await?;
            }
            Commands::Inspect { data_path } => {
                inspect_dataset(&data_path)?;
            }
        }
        Ok(())
    }
}
