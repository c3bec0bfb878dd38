// src/server.rs

//! Line-delimited JSON command server.
//!
//! Each connection gets its own thread. Requests are read one line at a time,
//! executed against the [`SharedCanvas`] and answered with exactly one reply
//! line. Malformed requests get an error reply; the connection stays open.
//! Lines longer than [`MAX_LINE_BYTES`] are answered with an error and the
//! connection is closed.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread;

use anyhow::{bail, Context, Result};
use log::*;

use crate::command::{Command, Response};
use crate::service::SharedCanvas;

/// Longest request line accepted, newline excluded. A client exceeding it
/// gets one error reply and is disconnected.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

pub struct Server {
    listener: TcpListener,
}

impl Server {
    pub fn bind(addr: impl ToSocketAddrs) -> Result<Self> {
        let listener = TcpListener::bind(addr).context("Failed to bind command server")?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read listener address")
    }

    /// Accepts connections until the listener fails.
    pub fn run(self, canvas: Arc<SharedCanvas>) -> Result<()> {
        info!("Server: listening on {}", self.local_addr()?);
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(e) => {
                    warn!("Server: accept failed: {}", e);
                    continue;
                }
            };
            let peer = stream
                .peer_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            let canvas = Arc::clone(&canvas);
            thread::Builder::new()
                .name(format!("conn-{}", peer))
                .spawn(move || {
                    info!("Server: {} connected", peer);
                    if let Err(e) = handle_connection(stream, &canvas) {
                        warn!("Server: {}: {:#}", peer, e);
                    }
                    info!("Server: {} disconnected", peer);
                })
                .context("Failed to spawn connection thread")?;
        }
        Ok(())
    }
}

fn handle_connection(stream: TcpStream, canvas: &SharedCanvas) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone().context("Failed to clone stream")?);
    let mut writer = BufWriter::new(stream);
    let mut line = String::new();
    loop {
        line.clear();
        let limit = MAX_LINE_BYTES as u64 + 1;
        if (&mut reader)
            .take(limit)
            .read_line(&mut line)
            .context("Read failed")?
            == 0
        {
            return Ok(());
        }
        if line.len() > MAX_LINE_BYTES && !line.ends_with('\n') {
            let mut reply =
                Response::error(format!("request exceeds {} bytes", MAX_LINE_BYTES)).to_line();
            reply.push('\n');
            writer.write_all(reply.as_bytes()).context("Write failed")?;
            writer.flush().context("Flush failed")?;
            bail!("request exceeds {} bytes", MAX_LINE_BYTES);
        }
        let request = line.trim();
        if request.is_empty() {
            continue;
        }
        let response = match Command::parse(request) {
            Ok(command) => canvas.execute(command),
            Err(e) => {
                warn!("Server: bad request {:?}: {}", request, e);
                Response::error(format!("bad request: {}", e))
            }
        };
        let mut reply = response.to_line();
        reply.push('\n');
        writer.write_all(reply.as_bytes()).context("Write failed")?;
        writer.flush().context("Flush failed")?;
    }
}
