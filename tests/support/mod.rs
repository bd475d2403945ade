//! Stub inference host: minimal blocking HTTP/1.1 server for tests.
//!
//! Serves one canned response per connection on an ephemeral localhost port
//! and records every request it parsed.
//!
//! One request per connection, no keep-alive.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Parsed request as the stub saw it
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What the stub answers with
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

pub struct StubHost {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubHost {
    /// Start a host that answers every connection with `response`.
    pub fn start(response: CannedResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub host");
        let addr = listener.local_addr().expect("stub host address");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let recorder = seen.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle(stream, &response, &recorder);
            }
        });

        Self { addr, seen }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().clone()
    }
}

fn handle(mut stream: TcpStream, response: &CannedResponse, seen: &Mutex<Vec<SeenRequest>>) {
    match read_request(&mut stream) {
        Ok(request) => {
            seen.lock().push(request);
            write_response(&mut stream, response.status, response.body.as_bytes());
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            write_response(&mut stream, 400, b"bad request")
        }
        Err(_) => {}
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Buffer until httparse sees a full header block, then read the rest of
/// the body announced by Content-Length.
fn read_request(stream: &mut TcpStream) -> io::Result<SeenRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "closed mid-request"));
        }
        buf.extend_from_slice(&chunk[..n]);

        let mut slots = [httparse::EMPTY_HEADER; 32];
        let mut req = httparse::Request::new(&mut slots);
        let parsed = req
            .parse(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let httparse::Status::Complete(header_len) = parsed else {
            continue;
        };

        let mut seen = SeenRequest {
            method: req.method.unwrap_or_default().to_string(),
            path: req.path.unwrap_or_default().to_string(),
            headers: req
                .headers
                .iter()
                .map(|h| (h.name.to_string(), String::from_utf8_lossy(h.value).into_owned()))
                .collect(),
            body: buf[header_len..].to_vec(),
        };
        let length = seen
            .header("content-length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        if seen.body.len() < length {
            let start = seen.body.len();
            seen.body.resize(length, 0);
            stream.read_exact(&mut seen.body[start..])?;
        }
        return Ok(seen);
    }
}

fn write_response(stream: &mut impl Write, status: u16, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
