//! Machinery for hosting one side of a Language Server Protocol peer.
//!
//! This crate provides the plumbing a language server (or client) embeds to
//! speak JSON-RPC 2.0 over a byte stream, with proper separation of concerns:
//!
//! - **Io**: blocking byte-stream reader/writer contracts
//! - **Framing**: LSP message framing (Content-Length headers)
//! - **Json**: JSON value model with a builder and kind-aware accessors
//! - **Lsp**: typed message catalogue and the encode/decode dispatch over it
//! - **Session**: JSON-RPC dispatcher with handler registry and request
//!   correlation
//!
//! The transport itself (stdio, sockets, pipes) is the embedder's choice;
//! anything implementing `std::io::Read`/`std::io::Write` works:
//!
//! ```no_run
//! use lsp_host::framing::read_content;
//! use lsp_host::session::Session;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new();
//! // register handlers, install a sender, then pump the stream:
//! let mut stdin = std::io::stdin().lock();
//! loop {
//!     let message = read_content(&mut stdin)?;
//!     session.receive(&message)?;
//! }
//! # }
//! ```

pub mod framing;
pub mod io;
pub mod json;
pub mod lsp;
pub mod one_of;
pub mod session;

pub use framing::{read_content, write_content, FramingError};
pub use io::{Reader, StreamError, Writer};
pub use lsp::{CodecError, Decode, Encode};
pub use one_of::{OneOf2, OneOf3, OneOf4};
pub use session::{ResponseFuture, Session, SessionError};
