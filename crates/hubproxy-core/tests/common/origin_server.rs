//! Minimal HTTP/1.1 origin server for integration tests.
//!
//! Serves a fixed map of path -> body with `Connection: close`; unknown paths get
//! 404. Every request target and User-Agent is recorded for assertions.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// One request as seen by the origin.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub target: String,
    pub user_agent: Option<String>,
}

/// Handle to a running origin; the server runs until the process exits.
pub struct Origin {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Origin {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `files` (keys are absolute
/// paths like `/game/index.html`). Returns its handle with base URL
/// `http://127.0.0.1:<port>/`.
pub fn start(files: &[(&str, &[u8])]) -> Origin {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files: Arc<HashMap<String, Vec<u8>>> = Arc::new(
        files
            .iter()
            .map(|(p, b)| (p.to_string(), b.to_vec()))
            .collect(),
    );
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_srv = Arc::clone(&seen);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let seen = Arc::clone(&seen_srv);
            thread::spawn(move || handle(stream, &files, &seen));
        }
    });
    Origin {
        base_url: format!("http://127.0.0.1:{}/", port),
        seen,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    files: &HashMap<String, Vec<u8>>,
    seen: &Mutex<Vec<SeenRequest>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (target, user_agent) = parse_request(request);
    seen.lock().unwrap().push(SeenRequest {
        target: target.clone(),
        user_agent,
    });

    let path = target.split('?').next().unwrap_or("");
    match files.get(path) {
        Some(body) => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
            );
        }
    }
}

/// Returns (request target, optional User-Agent value).
fn parse_request(request: &str) -> (String, Option<String>) {
    let mut target = String::new();
    let mut user_agent = None;
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if i == 0 {
            target = line.split_whitespace().nth(1).unwrap_or("").to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }
    (target, user_agent)
}
