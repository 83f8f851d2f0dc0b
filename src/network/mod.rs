//! Network layer - HTTP request execution
//!
//! The Network actor receives dispatch commands and the dispatcher sends one
//! outcome per request back to the App layer.

pub mod actor;
pub mod client;
pub mod dispatcher;

pub use actor::NetworkActor;
pub use client::{ReqwestTransport, Transport, TransportError, TransportResponse};
pub use dispatcher::Dispatcher;
