//! Shared utilities for integration testing: a scripted job-status backend.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use job_poller::observability::{EventSink, PollEvent};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Handle to a running mock backend.
#[allow(dead_code)]
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    request_lines: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// First line of every request received, e.g. `GET /status HTTP/1.1`.
    pub fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().unwrap().clone()
    }
}

/// Start a backend that always answers `200` with `body`.
#[allow(dead_code)]
pub async fn start_fixed_backend(body: &'static str) -> MockBackend {
    start_programmable_backend(move |_| async move { (200, body.to_string()) }).await
}

/// Start a backend that plays `script` in order, repeating the last entry.
#[allow(dead_code)]
pub async fn start_scripted_backend(script: Vec<(u16, &'static str)>) -> MockBackend {
    let script = Arc::new(script);
    start_programmable_backend(move |n| {
        let script = script.clone();
        async move {
            let (status, body) = script[n.min(script.len() - 1)];
            (status, body.to_string())
        }
    })
    .await
}

/// Start a programmable backend. `f` gets the zero-based request number.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let request_lines = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let counter = hits.clone();
    let lines = request_lines.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    let lines = lines.clone();
                    tokio::spawn(async move {
                        if let Some(line) = read_request_line(&mut socket).await {
                            lines.lock().unwrap().push(line);
                        }
                        let (status, body) = f(n).await;
                        let status_text = match status {
                            200 => "200 OK".to_string(),
                            404 => "404 Not Found".to_string(),
                            429 => "429 Too Many Requests".to_string(),
                            500 => "500 Internal Server Error".to_string(),
                            502 => "502 Bad Gateway".to_string(),
                            503 => "503 Service Unavailable".to_string(),
                            other => format!("{other} Unknown"),
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend {
        addr,
        hits,
        request_lines,
    }
}

/// Read until the end of the request head and return its first line.
async fn read_request_line(socket: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
    }
    let text = String::from_utf8_lossy(&head);
    text.lines().next().map(str::to_string)
}

/// Event sink that keeps everything for assertions.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingSink {
    events: Mutex<Vec<PollEvent>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn events(&self) -> Vec<PollEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn backoff_bases(&self) -> Vec<Duration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PollEvent::Backoff { base, .. } => Some(base),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &PollEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
