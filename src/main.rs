use std::sync::Arc;

use ar_devserver::config::ServerConfig;
use ar_devserver::error::ConfigError;
use ar_devserver::handler::RequestHandler;
use ar_devserver::logger::{self, ConsoleLog};
use ar_devserver::server::{self, ShutdownSignal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let program = args
        .next()
        .as_deref()
        .and_then(|p| std::path::Path::new(p).file_name()?.to_str().map(String::from))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let cfg = match ServerConfig::from_args(args) {
        Ok(cfg) => cfg,
        Err(ConfigError::InvalidPort(value)) => {
            println!("Invalid port number: {value}");
            println!("Usage: {program} [port]");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Bind before announcing anything; a busy port ends the process here
    let listener = server::create_listener(cfg.socket_addr())?;
    logger::log_server_start(&cfg);

    let shutdown = Arc::new(ShutdownSignal::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    let handler = Arc::new(RequestHandler::new(&cfg, Arc::new(ConsoleLog)));
    server::run(listener, handler, shutdown).await?;

    logger::log_server_stopped();
    Ok(())
}
