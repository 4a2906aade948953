//! Error taxonomy (C9) for the Roughtime client: validation failures and construction-time
//! / lifecycle precondition failures.

use thiserror::Error;

/// Categorized reasons a response failed the four-stage validation pipeline (C7).
///
/// These are protocol-level failures, not precondition failures: they result from bytes
/// received over the wire, not from misuse of this crate's API.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("signature invalid: {0}")]
    SignatureInvalid(String),

    #[error("Merkle inclusion proof invalid: {0}")]
    MerkleTreeInvalid(String),

    #[error("midpoint invalid: {0}")]
    MidpointInvalid(String),

    #[error(transparent)]
    Message(#[from] protocol::Error),
}

/// Precondition failures: misuse of the client API, distinct from protocol errors and not
/// meant to be handled as part of ordinary response processing.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("long-term public key must be exactly 32 bytes, got {0}")]
    InvalidPublicKeyLength(usize),

    #[error("process_response was already called on this client")]
    AlreadyProcessed,
}
