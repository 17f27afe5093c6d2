pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shelfscan")]
#[command(about = "Extract structured product data from retailer pages", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/shelfscan/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use shorter settle delays and wait bounds
    #[arg(long, global = true, conflicts_with = "thorough")]
    pub fast: bool,

    /// Use longer settle delays and wait bounds
    #[arg(long, global = true)]
    pub thorough: bool,

    /// Show the browser window
    #[arg(long, global = true)]
    pub headed: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn preset(&self) -> commands::Preset {
        if self.fast {
            commands::Preset::Fast
        } else if self.thorough {
            commands::Preset::Thorough
        } else {
            commands::Preset::Configured
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a full product record from a product page
    Product {
        /// URL of the product page
        url: String,
    },
    /// Find the first product on a search or listing page
    List {
        /// URL of the search or listing page
        url: String,
    },
    /// Run the HTTP server
    Serve {
        /// Address to listen on (default: from config)
        #[arg(short, long)]
        bind: Option<String>,
    },
}
