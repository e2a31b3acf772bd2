#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use ar_devserver::config::ServerConfig;
use ar_devserver::handler::RequestHandler;
use ar_devserver::logger::{AccessLog, LogRecord};
use ar_devserver::server::{self, ShutdownSignal};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Collects colorized access lines
#[derive(Default)]
pub struct MemoryLog(pub Mutex<Vec<String>>);

impl AccessLog for MemoryLog {
    fn record(&self, record: &LogRecord) {
        self.0.lock().unwrap().push(record.colorized());
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Arc<ShutdownSignal>,
    pub task: JoinHandle<std::io::Result<()>>,
    pub log: Arc<MemoryLog>,
}

pub async fn start(root: &Path) -> TestServer {
    let listener = server::create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(MemoryLog::default());
    let handler = Arc::new(RequestHandler::new(
        &ServerConfig::new(addr.port(), root),
        Arc::clone(&log) as Arc<dyn AccessLog>,
    ));
    let shutdown = Arc::new(ShutdownSignal::new());
    let task = tokio::spawn(server::run(listener, handler, Arc::clone(&shutdown)));

    TestServer {
        addr,
        shutdown,
        task,
        log,
    }
}

#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Send one request with `Connection: close` and read the whole response
pub async fn send(addr: SocketAddr, method: &str, target: &str) -> RawResponse {
    send_with_headers(addr, method, target, &[]).await
}

pub async fn send_with_headers(
    addr: SocketAddr,
    method: &str,
    target: &str,
    headers: &[(&str, &str)],
) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let mut request = format!("{method} {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n");
    for (name, value) in headers {
        request.push_str(&format!("{name}: {value}\r\n"));
    }
    request.push_str("\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    parse_response(&raw)
}

fn parse_response(raw: &[u8]) -> RawResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header terminator");
    let head = String::from_utf8_lossy(&raw[..split]);
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .unwrap()
        .parse()
        .unwrap();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        .collect();

    RawResponse {
        status,
        headers,
        body,
    }
}
