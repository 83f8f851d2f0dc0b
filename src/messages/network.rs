//! Network messages - communication between App and Network layers

use crate::error::AppError;
use crate::models::{RequestSpec, ResponseEnvelope};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute one validated request
    Dispatch { id: u64, spec: RequestSpec },
    /// Shutdown the network actor
    Shutdown,
}

/// The single terminal result of one dispatch
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub id: u64,
    pub result: Result<ResponseEnvelope, AppError>,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
