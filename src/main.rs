use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use remote_ui::config::Config;
use remote_ui::lifecycle::{AdapterRegistry, LifeCycle};
use remote_ui::session::SessionManager;
use remote_ui::{demo, logging, server};

/// Serve the demo application over the remote UI protocol.
#[derive(Debug, Parser)]
#[command(name = "remote-ui", version, about)]
struct Cli {
    /// Config file (default: platform config dir/remote-ui/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Bind address, overrides `server.bind_addr`.
    #[arg(long, value_name = "HOST:PORT")]
    bind: Option<String>,

    /// Emit `setHtmlId` calls for every new widget.
    #[arg(long)]
    ui_tests: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    if cli.ui_tests {
        config.protocol.ui_tests = true;
    }
    config.validate()?;

    let lifecycle = LifeCycle::new(Arc::new(AdapterRegistry::builtin()))
        .with_ui_tests(config.protocol.ui_tests);
    let sessions = Arc::new(SessionManager::new(
        lifecycle,
        config.sessions.max_sessions,
        demo::build,
    ));

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;
    tracing::info!(
        bind_addr = %config.server.bind_addr,
        ui_tests = config.protocol.ui_tests,
        max_sessions = config.sessions.max_sessions,
        "Starting remote UI server"
    );

    server::serve(listener, sessions).await?;
    Ok(())
}
