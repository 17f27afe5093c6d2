use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shelfscan::app::AppContext;
use shelfscan::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref(), cli.preset(), cli.headed)?;
    let ctx = AppContext::new(config);

    let succeeded = match cli.command {
        Commands::Product { url } => commands::scrape_product(&ctx, &url).await?,
        Commands::List { url } => commands::scrape_listing(&ctx, &url).await?,
        Commands::Serve { bind } => {
            commands::serve(ctx, bind).await?;
            true
        }
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
