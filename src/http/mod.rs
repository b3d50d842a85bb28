//! HTTP/1.1 transport and content-type inference.
//!
//! - **`connection`**: per-connection request/response state machine
//! - **`parser`**: parses requests out of a byte buffer
//! - **`request`**: the immutable request handed to the dispatcher
//! - **`response`**: status codes, wire responses and the write-once `ResponseSink`
//! - **`writer`**: serializes responses onto the socket
//! - **`mime`**: extension to MIME type resolution
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← RequestDispatcher fills a BufferedResponse
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
