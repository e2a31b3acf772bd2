// Server loop module
// Accepts connections until shutdown is requested, then drains them

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use hyper_util::server::graceful::GracefulShutdown;

use super::connection::serve_connection;
use super::signal::ShutdownSignal;
use crate::handler::RequestHandler;
use crate::logger;

/// Upper bound on waiting for open connections after shutdown
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Run the accept loop until `shutdown` fires.
///
/// Accept errors are logged and the loop continues. On shutdown the listener
/// is closed first, so new connections are refused, then accepted
/// connections get up to `DRAIN_TIMEOUT` to finish their current request.
/// A second trigger of `shutdown` stops waiting immediately.
pub async fn run(
    listener: TcpListener,
    handler: Arc<RequestHandler>,
    shutdown: Arc<ShutdownSignal>,
) -> std::io::Result<()> {
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        serve_connection(stream, peer_addr, &handler, &graceful);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => break,
        }
    }

    drop(listener);
    tokio::select! {
        () = graceful.shutdown() => {}
        () = shutdown.wait_forced() => {
            logger::log_warning("Forced shutdown, open connections dropped");
        }
        () = tokio::time::sleep(DRAIN_TIMEOUT) => {
            logger::log_warning(&format!(
                "Connections still open after {}s, stopping anyway",
                DRAIN_TIMEOUT.as_secs()
            ));
        }
    }
    Ok(())
}
