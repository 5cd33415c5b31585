//! Newline-delimited JSON host protocol over stdio
//!
//! Each input line is one request envelope; each output line answers one of
//! them. Requests run concurrently and a single writer task owns the output,
//! so lines are never interleaved. Output order follows completion order;
//! the host matches answers by `id`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::adapter::RecordAdapter;
use crate::capabilities::{Capabilities, RESOURCE_TYPE};
use crate::types::{
    CreateRequest, DeleteRequest, ListRequest, ListResult, Operation, OperationErrorCode,
    ProgressResult, ReadRequest, ReadResult, StatusRequest, UpdateRequest,
};

/// Output lines buffered ahead of the writer.
const OUTPUT_BUFFER: usize = 64;

#[derive(Debug, Deserialize)]
#[serde(tag = "operation", content = "request", rename_all = "lowercase")]
pub enum HostCall {
    Create(CreateRequest),
    Read(ReadRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
    Status(StatusRequest),
    List(ListRequest),
    Capabilities,
}

#[derive(Debug, Deserialize)]
pub struct RequestEnvelope {
    pub id: String,
    /// Abandon the call after this many milliseconds.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
    #[serde(flatten)]
    pub call: HostCall,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Reply {
    Result(Value),
    Error(String),
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ResponseEnvelope {
    pub id: Option<String>,
    #[serde(flatten)]
    pub reply: Reply,
}

impl RequestEnvelope {
    /// Decode one input line. On failure the error reply keeps the `id` if
    /// the line is at least a JSON object carrying one.
    pub fn parse(line: &str) -> Result<Self, ResponseEnvelope> {
        serde_json::from_str(line).map_err(|e| {
            let id = serde_json::from_str::<Value>(line)
                .ok()
                .and_then(|v| v.get("id").and_then(Value::as_str).map(str::to_string));
            ResponseEnvelope {
                id,
                reply: Reply::Error(format!("invalid request envelope: {e}")),
            }
        })
    }
}

/// Run one call against the adapter, honouring the envelope's deadline.
pub async fn dispatch(adapter: &RecordAdapter, envelope: RequestEnvelope) -> ResponseEnvelope {
    let deadline = envelope.deadline_ms.map(Duration::from_millis);

    let result = match envelope.call {
        HostCall::Create(req) => encode(
            within(deadline, adapter.create(req), |msg| {
                ProgressResult::failure(Operation::Create, OperationErrorCode::InternalFailure, msg)
            })
            .await,
        ),
        HostCall::Read(req) => encode(
            within(deadline, adapter.read(req), |msg| ReadResult {
                resource_type: RESOURCE_TYPE.to_string(),
                properties: None,
                error_code: Some(OperationErrorCode::InternalFailure),
                message: Some(msg),
            })
            .await,
        ),
        HostCall::Update(req) => encode(
            within(deadline, adapter.update(req), |msg| {
                ProgressResult::failure(Operation::Update, OperationErrorCode::InternalFailure, msg)
            })
            .await,
        ),
        HostCall::Delete(req) => encode(
            within(deadline, adapter.delete(req), |msg| {
                ProgressResult::failure(Operation::Delete, OperationErrorCode::InternalFailure, msg)
            })
            .await,
        ),
        HostCall::Status(req) => encode(adapter.status(&req)),
        HostCall::List(req) => encode(
            within(deadline, adapter.list(req), |msg| {
                ListResult::failure(OperationErrorCode::InternalFailure, msg)
            })
            .await,
        ),
        HostCall::Capabilities => encode(Capabilities::default()),
    };

    ResponseEnvelope {
        id: Some(envelope.id),
        reply: result,
    }
}

async fn within<T>(
    deadline: Option<Duration>,
    call: impl Future<Output = T>,
    on_timeout: impl FnOnce(String) -> T,
) -> T {
    let Some(deadline) = deadline else {
        return call.await;
    };
    if let Ok(result) = tokio::time::timeout(deadline, call).await {
        result
    } else {
        let message = format!("deadline of {} ms exceeded", deadline.as_millis());
        log::warn!("{message}");
        on_timeout(message)
    }
}

fn encode<T: Serialize>(result: T) -> Reply {
    match serde_json::to_value(result) {
        Ok(value) => Reply::Result(value),
        Err(e) => Reply::Error(format!("failed to encode result: {e}")),
    }
}

/// Serve envelopes from `input` until EOF or `shutdown`, then drain in-flight
/// calls. Returns the writer once every answer has been flushed.
pub async fn serve<R, W>(
    adapter: Arc<RecordAdapter>,
    input: R,
    output: W,
    shutdown: impl Future<Output = ()>,
) -> std::io::Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<String>(OUTPUT_BUFFER);

    let writer = tokio::spawn(async move {
        let mut output = output;
        while let Some(line) = rx.recv().await {
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok::<_, std::io::Error>(output)
    });

    let mut tasks = JoinSet::new();
    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => {
                log::info!("shutdown requested, draining {} in-flight requests", tasks.len());
                break;
            }
            line = lines.next_line() => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => {
                    let tx = tx.clone();
                    let adapter = adapter.clone();
                    tasks.spawn(async move {
                        let response = match RequestEnvelope::parse(&line) {
                            Ok(envelope) => dispatch(&adapter, envelope).await,
                            Err(response) => response,
                        };
                        send(&tx, &response).await;
                    });
                }
                None => break,
            },
            // Reap finished tasks so the set does not grow unbounded.
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    log::error!("request task failed: {e}");
                }
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            log::error!("request task failed: {e}");
        }
    }
    drop(tx);

    writer
        .await
        .map_err(|e| std::io::Error::other(format!("writer task failed: {e}")))?
}

async fn send(tx: &mpsc::Sender<String>, response: &ResponseEnvelope) {
    match serde_json::to_string(response) {
        Ok(line) => {
            if tx.send(line).await.is_err() {
                log::error!("output closed, dropping response {:?}", response.id);
            }
        }
        Err(e) => log::error!("failed to encode response {:?}: {e}", response.id),
    }
}
