// Connection handling module
// Serves a single TCP connection with hyper's HTTP/1 implementation

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;

use crate::handler::RequestHandler;
use crate::logger;

/// A client must finish sending request headers within this time
pub const HEADER_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Serve one accepted connection in a spawned task.
///
/// The connection is registered with `graceful` so a shutdown lets its
/// in-flight request finish before the keep-alive connection is closed.
/// Requests hyper cannot parse are answered by hyper itself and recorded in
/// the access log as 400.
pub fn serve_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    handler: &Arc<RequestHandler>,
    graceful: &GracefulShutdown,
) {
    let io = TokioIo::new(stream);
    let service_handler = Arc::clone(handler);
    let handler = Arc::clone(handler);

    let mut builder = http1::Builder::new();
    builder
        .keep_alive(true)
        .timer(TokioTimer::new())
        .header_read_timeout(HEADER_READ_TIMEOUT);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| {
            let handler = Arc::clone(&service_handler);
            async move { Ok::<_, Infallible>(handler.handle(req, peer_addr).await) }
        }),
    );
    let conn = graceful.watch(conn);

    tokio::spawn(async move {
        if let Err(err) = conn.await {
            if err.is_parse() {
                handler.log_rejected(peer_addr, &err);
            } else {
                logger::log_connection_error(&err);
            }
        }
    });
}
