// src/server/client.rs

use anyhow::{Context, Result, bail};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use crate::server::proto::{Request, Response};

/// Sends one request to the configuration service and waits for its
/// response. Blocking; used by CLI commands routed to the server.
pub fn call(addr: &str, request: &Request) -> Result<Response> {
    let mut stream = TcpStream::connect(addr)
        .with_context(|| format!("could not connect to the configuration service at {}", addr))?;

    let mut encoded = serde_json::to_string(request)?;
    encoded.push('\n');
    stream.write_all(encoded.as_bytes())?;
    stream.flush()?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.is_empty() {
        bail!("the configuration service closed the connection without a response");
    }

    serde_json::from_str(&line).context("could not decode the service response")
}
