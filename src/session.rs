//! JSON-RPC 2.0 session dispatcher.
//!
//! A [`Session`] routes framed message bodies between typed handlers and a
//! peer: inbound requests and notifications go to registered handlers,
//! inbound responses are correlated back to the [`ResponseFuture`] returned
//! by [`Session::send_request`], and everything outbound goes through a
//! single sender callback.
//!
//! The session is single-threaded cooperative: `receive`, the send methods
//! and the sender callback are driven by one logical owner at a time, and no
//! internal locking is performed. All internal state is committed before the
//! sender or any user callback runs, so a sender may synchronously call back
//! into this (or the peer's) session — the paired sessions in the tests below
//! do exactly that. Response futures are fulfilled from inside `receive` and
//! are thread-safe, so a separate thread may wait on them while an I/O
//! thread drives the session. Waiting on a future from the same thread that
//! drives `receive` deadlocks, by construction.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, trace};

use crate::json::{Builder, JsonError, Member, Value, ValueExt};
use crate::lsp::{CodecError, Decode, Encode, Message, Notification, Request};

const RESULT_MEMBER: &str = "result";
const ERROR_MEMBER: &str = "error";

/// Error types for message dispatch
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no sender set")]
    NoSender,

    #[error("no handler registered for request method '{0}'")]
    NoHandler(String),

    #[error("received response for unknown request with ID {0}")]
    UnknownRequestId(i64),

    #[error("response missing 'result'")]
    MissingResult,

    #[error("session dropped before the response arrived")]
    Dropped,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Json(#[from] JsonError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

type Sender = Rc<dyn Fn(&str) -> Result<(), SessionError>>;
type RequestFn = Rc<dyn Fn(&Value, &Builder) -> Result<Member, SessionError>>;
type NotificationFn = Rc<dyn Fn(&Value) -> Result<(), SessionError>>;
type Waiter = Box<dyn FnOnce(&Value) -> Result<(), SessionError>>;

struct RequestHandler {
    function: RequestFn,
    post_send: Option<Rc<dyn Fn()>>,
}

/// Message dispatch registry for one side of an LSP connection.
pub struct Session {
    sender: RefCell<Option<Sender>>,
    request_handlers: RefCell<HashMap<&'static str, RequestHandler>>,
    notification_handlers: RefCell<HashMap<&'static str, NotificationFn>>,
    response_waiters: RefCell<HashMap<i64, Waiter>>,
    next_request_id: Cell<i64>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            sender: RefCell::new(None),
            request_handlers: RefCell::new(HashMap::new()),
            notification_handlers: RefCell::new(HashMap::new()),
            response_waiters: RefCell::new(HashMap::new()),
            next_request_id: Cell::new(1),
        }
    }

    /// Installs the callback that carries outbound message text to the peer.
    /// Responses and outbound requests/notifications all pass through it.
    pub fn set_sender(&self, sender: impl Fn(&str) -> Result<(), SessionError> + 'static) {
        *self.sender.borrow_mut() = Some(Rc::new(sender));
    }

    /// Registers `handler` for the request type `R`. Registering a second
    /// handler for the same method replaces the first, post-send hook
    /// included.
    pub fn on_request<R, F>(&self, handler: F) -> RegisteredRequestHandler<'_>
    where
        R: Request + 'static,
        F: Fn(R) -> Result<R::Success, R::Failure> + 'static,
    {
        let function: RequestFn = Rc::new(move |message, b| {
            let request = decode_message::<R>(message)?;
            Ok(match handler(request) {
                Ok(success) => Member::new(RESULT_MEMBER, success.encode(b)?),
                Err(failure) => Member::new(ERROR_MEMBER, failure.encode(b)?),
            })
        });
        self.request_handlers.borrow_mut().insert(
            R::METHOD,
            RequestHandler {
                function,
                post_send: None,
            },
        );
        RegisteredRequestHandler {
            session: self,
            method: R::METHOD,
        }
    }

    /// Registers `handler` for the notification type `N`. Last registration
    /// per method wins.
    pub fn on_notification<N, F>(&self, handler: F)
    where
        N: Notification + 'static,
        F: Fn(N) -> Result<(), SessionError> + 'static,
    {
        let function: NotificationFn =
            Rc::new(move |message| handler(decode_message::<N>(message)?));
        self.notification_handlers
            .borrow_mut()
            .insert(N::METHOD, function);
    }

    /// Encodes and sends the request, returning a future for the typed
    /// response. The response id is allocated here and never reused within
    /// this session.
    pub fn send_request<R>(
        &self,
        request: &R,
    ) -> Result<ResponseFuture<R::Success, R::Failure>, SessionError>
    where
        R: Request + 'static,
        R::Success: 'static,
        R::Failure: 'static,
    {
        let b = Builder::new();
        let id = self.next_request_id.get();
        self.next_request_id.set(id + 1);

        let mut members = vec![
            Member::new("id", b.i64(id)),
            Member::new("method", b.string(R::METHOD)),
        ];
        if R::HAS_PARAMS {
            members.push(Member::new("params", request.encode(&b)?));
        }

        let (tx, rx) = oneshot::channel();
        // The waiter must be installed before the message reaches the wire:
        // the sender may hand the response back synchronously.
        self.response_waiters.borrow_mut().insert(
            id,
            Box::new(move |response: &Value| {
                if let Ok(result) = response.member(RESULT_MEMBER) {
                    let success = R::Success::decode(result)?;
                    let _ = tx.send(Ok(success));
                    return Ok(());
                }
                if !R::HAS_FAILURE {
                    return Err(SessionError::MissingResult);
                }
                let error = response.member(ERROR_MEMBER)?;
                let failure = R::Failure::decode(error)?;
                let _ = tx.send(Err(failure));
                Ok(())
            }),
        );

        debug!("sending request '{}' with id {id}", R::METHOD);
        self.send_json(&b.object(members).json())?;
        Ok(ResponseFuture { receiver: rx })
    }

    /// Encodes and sends the notification.
    pub fn send_notification<N: Notification>(&self, notification: &N) -> Result<(), SessionError> {
        let b = Builder::new();
        let mut members = vec![Member::new("method", b.string(N::METHOD))];
        if N::HAS_PARAMS {
            members.push(Member::new("params", notification.encode(&b)?));
        }
        debug!("sending notification '{}'", N::METHOD);
        self.send_json(&b.object(members).json())
    }

    /// Dispatches one inbound message body: a request or notification goes to
    /// its registered handler (the request's outcome is sent back through the
    /// sender), a response fulfils the matching outstanding future.
    pub fn receive(&self, json: &str) -> Result<(), SessionError> {
        let b = Builder::new();
        let message = b.parse(json)?;

        let method = message
            .member("method")
            .ok()
            .and_then(|m| m.try_string().ok())
            .map(str::to_string);

        let Some(method) = method else {
            return self.receive_response(&message);
        };

        if message.has("id") {
            self.receive_request(&method, &message, &b)
        } else {
            self.receive_notification(&method, &message)
        }
    }

    fn receive_response(&self, message: &Value) -> Result<(), SessionError> {
        let id = message.member("id")?.try_i64()?;
        trace!("received response for id {id}");
        let waiter = self
            .response_waiters
            .borrow_mut()
            .remove(&id)
            .ok_or(SessionError::UnknownRequestId(id))?;
        waiter(message)
    }

    fn receive_request(
        &self,
        method: &str,
        message: &Value,
        b: &Builder,
    ) -> Result<(), SessionError> {
        let id = message.member("id")?.try_i64()?;
        debug!("received request '{method}' with id {id}");

        // Clone the handler out so the registry is not borrowed while user
        // code runs; a handler may itself register handlers or send.
        let (function, post_send) = {
            let handlers = self.request_handlers.borrow();
            let handler = handlers
                .get(method)
                .ok_or_else(|| SessionError::NoHandler(method.to_string()))?;
            (handler.function.clone(), handler.post_send.clone())
        };

        let member = function(message, b)?;
        let response = b.object(vec![Member::new("id", b.i64(id)), member]);
        self.send_json(&response.json())?;

        if let Some(post_send) = post_send {
            post_send();
        }
        Ok(())
    }

    fn receive_notification(&self, method: &str, message: &Value) -> Result<(), SessionError> {
        debug!("received notification '{method}'");
        let handler = self
            .notification_handlers
            .borrow()
            .get(method)
            .cloned()
            .ok_or_else(|| SessionError::NoHandler(method.to_string()))?;
        handler(message)
    }

    fn send_json(&self, text: &str) -> Result<(), SessionError> {
        let sender = self.sender.borrow().clone().ok_or(SessionError::NoSender)?;
        sender(text)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_message<M: Message>(message: &Value) -> Result<M, SessionError> {
    if M::HAS_PARAMS {
        Ok(M::decode(message.member("params")?)?)
    } else {
        Ok(M::default())
    }
}

/// Handle returned by [`Session::on_request`].
pub struct RegisteredRequestHandler<'a> {
    session: &'a Session,
    method: &'static str,
}

impl RegisteredRequestHandler<'_> {
    /// Registers `callback` to run once the handler's response has been
    /// handed to the sender — after the sender returns and before the
    /// triggering `receive` returns. Useful for `shutdown`/`exit` sequencing.
    pub fn on_post_send(self, callback: impl Fn() + 'static) {
        if let Some(handler) = self
            .session
            .request_handlers
            .borrow_mut()
            .get_mut(self.method)
        {
            handler.post_send = Some(Rc::new(callback));
        }
    }
}

/// The pending typed response to a sent request.
///
/// Resolves to `Ok(success)` when the peer answers with a `result` member,
/// or `Err(failure)` when it answers with the request's declared error
/// payload. The future is fulfilled from inside the [`Session::receive`]
/// call that consumes the response; if the session is dropped first, waiting
/// reports [`SessionError::Dropped`].
pub struct ResponseFuture<S, F> {
    receiver: oneshot::Receiver<Result<S, F>>,
}

impl<S, F> ResponseFuture<S, F> {
    /// Blocks the calling thread until the response arrives. Call this from a
    /// different thread than the one driving `receive` (or after the response
    /// has already been dispatched); blocking the dispatch thread deadlocks.
    pub fn wait(self) -> Result<Result<S, F>, SessionError> {
        self.receiver
            .blocking_recv()
            .map_err(|_| SessionError::Dropped)
    }

    /// Returns the response if it has already arrived, without blocking.
    pub fn try_wait(&mut self) -> Option<Result<S, F>> {
        self.receiver.try_recv().ok()
    }
}

impl<S, F> Future for ResponseFuture<S, F> {
    type Output = Result<Result<S, F>, SessionError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|r| r.map_err(|_| SessionError::Dropped))
    }
}
