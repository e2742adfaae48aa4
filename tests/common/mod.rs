//! In-process fake COMET server.
//!
//! Serves one canned HTTP response per accepted connection and records the
//! request it answered.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use comet_rpc::{query, Client, ClientConfig, FuncEncoding};

/// A request as seen by the fake server.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl Captured {
    pub fn path(&self) -> &str {
        self.target.split_once('?').map_or(self.target.as_str(), |(p, _)| p)
    }

    pub fn raw_query(&self) -> &str {
        self.target.split_once('?').map_or("", |(_, q)| q)
    }

    pub fn query(&self) -> Vec<(String, String)> {
        query::decode(self.raw_query()).unwrap()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.query()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct FakeComet {
    port: u16,
    requests: Receiver<Captured>,
    _handle: JoinHandle<()>,
}

impl FakeComet {
    /// Answers each connection with the next `(status, body)` pair.
    pub fn serve(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                if let Some(captured) = read_request(&stream) {
                    let _ = tx.send(captured);
                }
                let _ = write_response(&mut stream, status, &body);
            }
        });

        Self {
            port,
            requests: rx,
            _handle: handle,
        }
    }

    /// Answers a single connection with HTTP 200 and `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::serve(vec![(200, body.into())])
    }

    /// Accepts one connection, reads the request and stays silent for `delay`.
    pub fn silent(delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                if let Some(captured) = read_request(&stream) {
                    let _ = tx.send(captured);
                }
                thread::sleep(delay);
            }
        });

        Self {
            port,
            requests: rx,
            _handle: handle,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn client(&self) -> Client {
        self.client_with(FuncEncoding::Code)
    }

    pub fn client_with(&self, encoding: FuncEncoding) -> Client {
        Client::new(
            ClientConfig::new("127.0.0.1")
                .with_port(self.port)
                .with_timeout(Duration::from_secs(5))
                .with_func_encoding(encoding),
        )
        .unwrap()
    }

    /// Returns the next request the server answered.
    pub fn request(&self) -> Captured {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("no request received")
    }

    /// Returns whether a request arrived.
    pub fn received_any(&self) -> bool {
        self.requests.try_recv().is_ok()
    }
}

fn read_request(stream: &TcpStream) -> Option<Captured> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;

    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).ok()? == 0 {
            break;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((k, v)) = header.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    Some(Captured {
        method,
        target,
        headers,
    })
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) -> std::io::Result<()> {
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    write!(
        stream,
        "HTTP/1.1 {status} {reason}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}

/// Wraps a result element in a response envelope.
pub fn envelope(element: &str) -> String {
    format!(r#"{{"FANUC":{{"name":"ROBOT","fastclock":"123456","RPC":[{element}]}}}}"#)
}

/// An envelope with an empty result list, as sent by some controllers.
pub fn empty_result_list() -> String {
    r#"{"FANUC":{"name":"ROBOT","fastclock":"123456","RPC":]}}"#.to_string()
}

/// A result element carrying only `rpc` and `status`.
pub fn status_element(code: i64, status: u32) -> String {
    format!(r#"{{"rpc":"{code}","status":"0x{status:X}"}}"#)
}

/// A port that nothing listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
