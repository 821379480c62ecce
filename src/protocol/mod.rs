//! Wire protocol for the remote execution endpoint.
//!
//! - `envelope`: request construction (`stdin` wrapping)
//! - `decode`: ordered reply checks

pub mod decode;
pub mod envelope;

pub use decode::{decode_reply, decode_response};
pub use envelope::{ExecuteRequest, METHOD, OperationRequest};
