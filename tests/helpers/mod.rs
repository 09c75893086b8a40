//! Shared helpers for binary-level tests: a one-shot HTTP responder on
//! 127.0.0.1 and a plugin command with proxies disabled.

#![allow(dead_code)]

use assert_cmd::Command;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const SERVERINFO_OK: &str = include_str!("../fixtures/serverinfo_ok.json");

pub const SERVERINFO_UNAUTHORISED: &str = concat!(
    r#"{"ocs":{"meta":{"status":"failure","statuscode":401,"#,
    r#""message":"Unauthorised"},"data":[]}}"#
);

/// How long `stalled_host` keeps a connection open without answering
pub const STALL: Duration = Duration::from_secs(30);

/// Answers exactly one HTTP request with a canned response
pub struct MockServer {
    addr: SocketAddr,
    handle: JoinHandle<String>,
}

impl MockServer {
    /// Serve `body` with the given status line, e.g. `"200 OK"`
    pub fn serve(status_line: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let response = format!(
            "HTTP/1.1 {}\r\n\
             Content-Type: application/json; charset=utf-8\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept request");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream.read(&mut buf).expect("read request");
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush response");
            String::from_utf8_lossy(&request).into_owned()
        });

        Self { addr, handle }
    }

    /// Value for `-H`
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Raw request head as received. Only call when the plugin connected.
    pub fn request(self) -> String {
        self.handle.join().expect("mock server thread")
    }
}

/// A `host:port` on which nothing listens
pub fn closed_port_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind closed port");
    let addr = listener.local_addr().expect("closed port address");
    drop(listener);
    addr.to_string()
}

/// A `host:port` that accepts the connection and then never replies
pub fn stalled_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stalled server");
    let addr = listener.local_addr().expect("stalled server address");

    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(STALL);
            drop(stream);
        }
    });

    addr.to_string()
}

/// The plugin binary with proxy settings removed so requests stay local
pub fn plugin() -> Command {
    let mut cmd = Command::cargo_bin("check_nextcloud").expect("plugin binary");
    for var in [
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_PROXY", "127.0.0.1,localhost");
    cmd
}
