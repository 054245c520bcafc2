use anyhow::Result;
use shortlink::config::{self, Config};
use shortlink::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber: text or JSON lines filtered by `RUST_LOG`.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
