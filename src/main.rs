use std::process::ExitCode;

use clap::Parser;

use product_explorer::app::{RunOptions, init_logging, run};
use product_explorer::config;

/// Terminal product catalog browser.
#[derive(Parser, Debug)]
#[command(name = "product-explorer", version, about)]
struct Args {
    /// Open the detail screen for this product id on startup
    #[arg(short, long)]
    product: Option<String>,

    /// Product API root (overrides `api_base` in settings.conf)
    #[arg(long)]
    api_base: Option<String>,

    /// Products per page (overrides `page_size`)
    #[arg(long)]
    page_size: Option<usize>,

    /// Log level for the log file (overrides `log_level`; RUST_LOG still wins)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let mut settings = config::settings();
    if let Some(base) = args.api_base {
        settings.api_base = base.trim_end_matches('/').to_string();
    }
    if let Some(n) = args.page_size {
        settings.page_size = n.clamp(1, config::MAX_PAGE_SIZE);
    }
    if let Some(level) = args.log_level {
        settings.log_level = level;
    }
    init_logging(&settings.log_level);
    tracing::info!(
        api_base = %settings.api_base,
        page_size = settings.page_size,
        "product-explorer starting"
    );

    match run(RunOptions {
        settings,
        start_product: args.product,
    })
    .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "terminal error");
            eprintln!("product-explorer: {e}");
            ExitCode::FAILURE
        }
    }
}
