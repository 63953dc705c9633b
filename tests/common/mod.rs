//! Shared test doubles for the inventory services and the binaries.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use inventory_ops::blockchain::{ChainError, ChainResult, ContractCall, ContractInvoker, TxHash};
use serde_json::{json, Value};
use starknet::core::types::Felt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Instant;

/// `SN_SEPOLIA` as a short string.
pub const SEPOLIA_CHAIN_ID: &str = "0x534e5f5345504f4c4941";

/// A call as seen by the invoker, with start and end times.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub call: ContractCall,
    pub started: Instant,
    pub finished: Instant,
}

#[derive(Default)]
struct State {
    calls: Vec<RecordedCall>,
    /// Zero-based call indices that fail.
    failing: HashSet<usize>,
    /// Entry points that always fail.
    failing_entrypoints: HashSet<&'static str>,
    /// Per-call latency overriding the default.
    slow: HashMap<usize, Duration>,
}

/// Records every call and answers with a sequential hash.
#[derive(Clone, Default)]
pub struct RecordingInvoker {
    state: Arc<Mutex<State>>,
    issued: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    latency: Duration,
}

impl RecordingInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call takes `latency` of (tokio) time to complete.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail the `index`-th call (zero-based).
    pub fn fail_call(self, index: usize) -> Self {
        self.state.lock().unwrap().failing.insert(index);
        self
    }

    /// The `index`-th call (zero-based) takes `latency` instead.
    pub fn slow_call(self, index: usize, latency: Duration) -> Self {
        self.state.lock().unwrap().slow.insert(index, latency);
        self
    }

    /// Fail every call to `entrypoint`.
    pub fn fail_entrypoint(self, entrypoint: &'static str) -> Self {
        self.state.lock().unwrap().failing_entrypoints.insert(entrypoint);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn entrypoints(&self) -> Vec<&'static str> {
        self.calls().iter().map(|c| c.call.entrypoint).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ContractInvoker for RecordingInvoker {
    async fn invoke(&self, call: ContractCall) -> ChainResult<TxHash> {
        let index = self.issued.fetch_add(1, Ordering::SeqCst);
        let started = Instant::now();

        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let latency = self
            .state
            .lock()
            .unwrap()
            .slow
            .get(&index)
            .copied()
            .unwrap_or(self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let mut state = self.state.lock().unwrap();
        let fails =
            state.failing.contains(&index) || state.failing_entrypoints.contains(call.entrypoint);
        state.calls.push(RecordedCall {
            call: call.clone(),
            started,
            finished: Instant::now(),
        });

        if fails {
            Err(ChainError::Rpc(format!("{} rejected by test node", call.entrypoint)))
        } else {
            Ok(TxHash(Felt::from(index as u64 + 1)))
        }
    }
}

/// Start a JSON-RPC node on a free local port. It reports its chain id and
/// answers every other method with a "Contract not found" error.
pub async fn start_rejecting_node() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let Some(request) = read_json_body(&mut socket).await else {
                            return;
                        };
                        let body = rpc_reply(&request).to_string();
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

fn rpc_reply(request: &Value) -> Value {
    let id = request["id"].clone();
    match request["method"].as_str() {
        Some("starknet_chainId") => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": SEPOLIA_CHAIN_ID,
        }),
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": 20, "message": "Contract not found" },
        }),
    }
}

/// Read one HTTP request and parse its body as JSON.
async fn read_json_body(socket: &mut TcpStream) -> Option<Value> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]);
        let length = headers
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let body_start = header_end + 4;
        if buf.len() >= body_start + length {
            return serde_json::from_slice(&buf[body_start..body_start + length]).ok();
        }
    }
}
