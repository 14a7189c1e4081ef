//! TCP server for remote play
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::handler::handle_request;
use crate::protocol::*;
use crate::registry::GameRegistry;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 7878;
const DEFAULT_MAX_LINE_BYTES: usize = 8192;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Longest accepted request line, newline excluded.
    pub max_line_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables; unset or invalid values keep the defaults.
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("BOWLING_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = env::var("BOWLING_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let max_line_bytes = env::var("BOWLING_MAX_LINE_BYTES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(DEFAULT_MAX_LINE_BYTES);

        Self {
            host,
            port,
            max_line_bytes,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid socket address {}:{}", self.host, self.port))
    }
}

/// Bind and serve forever.
///
/// The bound address (useful with port 0) is sent on `ready_tx` once the
/// listener is up.
pub async fn run_server(
    config: ServerConfig,
    registry: Arc<GameRegistry>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, "bowling server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let max_line_bytes = config.max_line_bytes;
    let mut client_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!(client_id, %addr, "client connected");

        let registry = Arc::clone(&registry);

        // Spawn task to handle this client
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, registry, max_line_bytes).await {
                warn!(client_id, error = %e, "client error");
            }
            info!(client_id, "client disconnected");
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    registry: Arc<GameRegistry>,
    max_line_bytes: usize,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();

    // Spawn task to write messages to client
    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            if serde_json::to_writer(&mut buf, &msg).is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
        }
    });

    let mut buf: Vec<u8> = Vec::with_capacity(1024);
    loop {
        let read = read_request_line(&mut reader, &mut buf, max_line_bytes).await?;
        let response = match read {
            LineRead::Eof => break,
            LineRead::TooLong => {
                warn!(client_id, max_line_bytes, "request line too long");
                let prefix = String::from_utf8_lossy(&buf);
                create_invalid_request(
                    extract_seq_best_effort(&prefix).unwrap_or(0),
                    &format!("request line exceeds {max_line_bytes} bytes"),
                )
            }
            LineRead::Line => {
                let Ok(line) = std::str::from_utf8(&buf) else {
                    debug!(client_id, "request is not valid UTF-8");
                    if tx
                        .send(create_invalid_request(0, "request is not valid UTF-8"))
                        .is_err()
                    {
                        break;
                    }
                    continue;
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                dispatch_line(&registry, client_id, trimmed).await
            }
        };

        if tx.send(response).is_err() {
            break;
        }
    }

    drop(tx);
    let _ = write_task.await;
    Ok(())
}

async fn dispatch_line(registry: &GameRegistry, client_id: usize, line: &str) -> Response {
    match parse_request(line) {
        Ok(ParsedRequest::Request(request)) => {
            debug!(client_id, seq = request.seq(), kind = request.kind(), "request");
            handle_request(registry, request).await
        }
        Ok(ParsedRequest::Unknown { seq, msg_type }) => {
            debug!(client_id, seq, %msg_type, "unknown request type");
            create_invalid_request(seq, &format!("unknown request type: {msg_type}"))
        }
        Err(e) => {
            debug!(client_id, error = %e, "malformed request");
            create_invalid_request(
                extract_seq_best_effort(line).unwrap_or(0),
                &format!("malformed request: {e}"),
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineRead {
    Eof,
    /// `buf` holds one line (newline included, if any).
    Line,
    /// The line was over the limit; `buf` holds its first bytes, the rest was skipped.
    TooLong,
}

/// Read one line into `buf`, never buffering more than `max_line_bytes` of it.
async fn read_request_line<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_line_bytes: usize,
) -> std::io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    // One extra byte for the newline.
    let limit = max_line_bytes as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(LineRead::Eof);
    }
    if buf.last() == Some(&b'\n') || (n as u64) < limit {
        return Ok(LineRead::Line);
    }

    // Skip the rest of the oversized line.
    loop {
        let (used, done) = {
            let chunk = reader.fill_buf().await?;
            match chunk.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (chunk.len(), chunk.is_empty()),
            }
        };
        reader.consume(used);
        if done {
            break;
        }
    }
    Ok(LineRead::TooLong)
}
