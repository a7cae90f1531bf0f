use crate::config::AppContext;
use crate::fetcher::ListingFetcher;
use astra::Body;
use http::Method;
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique temp-file path so parallel tests never collide.
pub fn temp_path(prefix: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{prefix}_{}.{ext}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

/// Builds a GET request the way the server will see it.
pub fn get(uri: &str) -> astra::Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::from(String::new()))
        .expect("build test request")
}

/// Reads a response body and parses it as JSON.
pub fn body_json(resp: &mut astra::Response) -> Value {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub fn make_ctx(snapshot_path: PathBuf, upstream_url: &str) -> AppContext {
    AppContext {
        fetcher: ListingFetcher::new(upstream_url).expect("build fetcher"),
        snapshot_path,
    }
}

/// Canned HTTP server standing in for the upstream listings API (or for this
/// service itself in ingestion tests). Serves whatever `respond` returns for
/// the request's `cursor` parameter, over real sockets, so the blocking HTTP
/// paths get exercised end to end.
pub struct StubUpstream {
    pub addr: SocketAddr,
    pub url: String,
    pub requests: Arc<AtomicUsize>,
}

pub fn start_stub_upstream<F>(respond: F) -> StubUpstream
where
    F: Fn(u64) -> (u16, String) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener addr");
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            counter.fetch_add(1, Ordering::SeqCst);

            let cursor = read_cursor(&mut stream);
            let (status, body) = respond(cursor);
            let reason = if status == 200 { "OK" } else { "ERR" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    StubUpstream {
        addr,
        url: format!("http://{addr}/listings"),
        requests,
    }
}

/// One upstream page for a dataset of `total` listings, mirroring the real
/// API's envelope and 100-per-page chunking.
pub fn page_body(total: usize, cursor: u64) -> (u16, String) {
    let start = (cursor as usize).min(total);
    let end = (start + 100).min(total);

    let results: Vec<Value> = (start..end)
        .map(|i| json!({"id": i, "City": format!("City {i}")}))
        .collect();
    let remaining = total - end;

    (
        200,
        json!({"response": {"results": results, "remaining": remaining}}).to_string(),
    )
}

/// An address nothing is listening on, for connection-refused tests.
pub fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    listener.local_addr().expect("probe addr")
}

fn read_cursor(stream: &mut TcpStream) -> u64 {
    let mut buf = [0u8; 4096];
    let mut head = Vec::new();

    loop {
        let n = stream.read(&mut buf).unwrap_or(0);
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let head = String::from_utf8_lossy(&head);
    cursor_of(head.lines().next().unwrap_or(""))
}

fn cursor_of(request_line: &str) -> u64 {
    let Some(path) = request_line.split_whitespace().nth(1) else {
        return 0;
    };
    let Some((_, rest)) = path.split_once("cursor=") else {
        return 0;
    };
    rest.split('&').next().unwrap_or("").parse().unwrap_or(0)
}
