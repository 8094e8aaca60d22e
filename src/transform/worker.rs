use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{TextTransformer, TransformRequest};
use crate::engine::error::TransformError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("already generating, wait for the current request to finish")]
    Busy,

    #[error("nothing to send: input is empty")]
    EmptyInput,

    #[error("could not start transform worker: {0}")]
    Spawn(String),
}

/// A finished collaborator call that is still allowed to replace the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformCompletion {
    pub ticket: u64,
    pub label: &'static str,
    pub result: Result<String, TransformError>,
}

/// Runs collaborator calls on background threads, one at a time.
///
/// Each request gets a ticket. Only the completion whose ticket is still
/// outstanding is handed back; anything that was superseded in the meantime
/// is dropped on arrival.
pub struct TransformWorker {
    transformer: Arc<dyn TextTransformer>,
    sender: Sender<TransformCompletion>,
    receiver: Receiver<TransformCompletion>,
    next_ticket: u64,
    outstanding: Option<u64>,
}

impl TransformWorker {
    pub fn new(transformer: Arc<dyn TextTransformer>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            transformer,
            sender,
            receiver,
            next_ticket: 1,
            outstanding: None,
        }
    }

    /// True while a request is in flight and not superseded.
    pub fn is_generating(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn submit(&mut self, request: TransformRequest) -> Result<u64, SubmitError> {
        if self.is_generating() {
            return Err(SubmitError::Busy);
        }
        if request.input().trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let transformer = Arc::clone(&self.transformer);
        let sender = self.sender.clone();
        let label = request.label();
        thread::Builder::new()
            .name(format!("transform-{}", ticket))
            .spawn(move || {
                let result = request.run(transformer.as_ref());
                // receiver gone means the app is shutting down
                let _ = sender.send(TransformCompletion {
                    ticket,
                    label,
                    result,
                });
            })
            .map_err(|e| SubmitError::Spawn(e.to_string()))?;

        info!(ticket, label, "transform submitted");
        self.outstanding = Some(ticket);
        Ok(ticket)
    }

    /// Forgets the outstanding request; its result will be discarded.
    pub fn supersede(&mut self) {
        if let Some(ticket) = self.outstanding.take() {
            info!(ticket, "transform superseded");
        }
    }

    fn accept(&mut self, completion: TransformCompletion) -> Option<TransformCompletion> {
        if self.outstanding != Some(completion.ticket) {
            debug!(ticket = completion.ticket, "dropping stale transform result");
            return None;
        }
        self.outstanding = None;
        match &completion.result {
            Ok(text) => info!(
                ticket = completion.ticket,
                label = completion.label,
                bytes = text.len(),
                "transform completed"
            ),
            Err(e) => warn!(
                ticket = completion.ticket,
                label = completion.label,
                error = %e,
                "transform failed"
            ),
        }
        Some(completion)
    }

    /// Non-blocking: the current completion if it has arrived.
    pub fn poll(&mut self) -> Option<TransformCompletion> {
        while let Ok(completion) = self.receiver.try_recv() {
            if let Some(accepted) = self.accept(completion) {
                return Some(accepted);
            }
        }
        None
    }

    /// Blocks up to `timeout` for the current completion.
    pub fn wait(&mut self, timeout: Duration) -> Option<TransformCompletion> {
        let deadline = Instant::now() + timeout;
        while self.is_generating() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completion) => {
                    if let Some(accepted) = self.accept(completion) {
                        return Some(accepted);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
        None
    }
}
