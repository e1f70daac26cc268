//! ScriptedTransport - in-process transport with queued replies.
//!
//! Replies are consumed in the order requests are sent. A reply can be
//! ready immediately, a transport failure, or held behind a `Gate` so a
//! test decides when (and in which order) calls settle.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::oneshot;

use super::{Request, Response, Transport};
use crate::error::TransportError;

type Outcome = Result<Response, TransportError>;

enum Reply {
    Ready(Outcome),
    Gated(oneshot::Receiver<Outcome>),
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    requests: Vec<Request>,
}

/// Transport that answers from a queue of scripted replies.
///
/// Clone-friendly: clones share the same queue and request log.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, reply: Reply) -> &Self {
        self.script().replies.push_back(reply);
        self
    }

    /// Queue a response with a JSON body.
    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.push(Reply::Ready(Ok(Response::new(status, body))))
    }

    /// Queue a response without a body (e.g. 204, 304).
    pub fn reply_empty(&self, status: u16) -> &Self {
        self.push(Reply::Ready(Ok(Response::empty(status))))
    }

    /// Queue a transport failure.
    pub fn fail(&self, error: TransportError) -> &Self {
        self.push(Reply::Ready(Err(error)))
    }

    /// Queue a reply that settles only when the returned gate is opened.
    pub fn gate(&self) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.push(Reply::Gated(receiver));
        Gate { sender }
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.script().requests.clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.script().requests.last().cloned()
    }

    /// Number of queued replies not yet consumed.
    pub fn pending(&self) -> usize {
        self.script().replies.len()
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send + 'static + use<> {
        let reply = {
            let mut script = self.script();
            let target = format!("{} {}", request.method, request.path);
            script.requests.push(request);
            script.replies.pop_front().ok_or(target)
        };

        async move {
            match reply {
                Ok(Reply::Ready(outcome)) => outcome,
                Ok(Reply::Gated(receiver)) => receiver.await.unwrap_or_else(|_| {
                    Err(TransportError::Unavailable("gate dropped before opening".into()))
                }),
                Err(target) => Err(TransportError::Unavailable(format!(
                    "no scripted reply for {target}"
                ))),
            }
        }
    }
}

/// Holds a scripted reply back until opened.
///
/// Dropping the gate without opening it settles the call as a transport failure.
pub struct Gate {
    sender: oneshot::Sender<Outcome>,
}

impl Gate {
    pub fn respond(self, status: u16, body: Value) {
        let _ = self.sender.send(Ok(Response::new(status, body)));
    }

    pub fn respond_empty(self, status: u16) {
        let _ = self.sender.send(Ok(Response::empty(status)));
    }

    pub fn fail(self, error: TransportError) {
        let _ = self.sender.send(Err(error));
    }
}
