/*!
 * Link Errors
 * Error taxonomy for the shared-memory link transport
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Link transport error types
///
/// Initialization errors are fatal to bringing the queue up. Protocol
/// corruption errors abort the operation with no state mutation; the caller
/// decides whether to treat them as a logic or hardware fault. None of these
/// are retried internally.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum LinkError {
    /// Queue head/tail not attached yet
    #[error("Shared queue not initialized")]
    NotInitialized,

    /// Null descriptor handle passed to an operation requiring a buffer
    #[error("Null buffer descriptor")]
    NullBuffer,

    /// Non-null outgoing link observed on the tail during an enqueue
    #[error("Corrupted tail link: stale next offset {offset:#x}")]
    BadTail { offset: u32 },

    /// Bad shared-region geometry (missing base address, misaligned zone)
    #[error("Invalid link configuration: {0}")]
    Config(String),
}
