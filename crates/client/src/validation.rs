//! Response validator (C7): the four-stage pipeline that turns a parsed response envelope
//! into a trusted (midpoint, radius) pair or a categorized [`ValidationError`].
//!
//! Stages run in a fixed order because each depends on state the previous stage derived:
//! stage 2 needs the delegated key from stage 1, stage 4 needs the delegation bounds from
//! stage 1. There is no partial success; any stage failing aborts the whole pipeline.

use data_encoding::HEXLOWER;
use protocol::constants::{
    CERTIFICATE_CONTEXT, HASH_LENGTH, PUBLIC_KEY_LENGTH, SIGNED_RESPONSE_CONTEXT,
};
use protocol::{Error as MessageError, Message, Tag};
use tracing::{instrument, trace};

use crate::error::ValidationError;
use crate::verify::verify;

/// Outcome of a successful [`validate_response`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedResponse {
    pub midpoint: u64,
    pub radius: u32,
}

/// Run all four validation stages against `envelope`, using `long_term_key` as the trust
/// root and `nonce` as the value the server was asked to include in its Merkle batch.
pub fn validate_response(
    long_term_key: &[u8; 32],
    nonce: &[u8; 64],
    envelope: &Message,
) -> Result<ValidatedResponse, ValidationError> {
    let (delegated_key, min_t, max_t) = check_delegation_signature(long_term_key, envelope)?;
    check_response_signature(&delegated_key, envelope)?;
    check_merkle_inclusion(nonce, envelope)?;
    let (midpoint, radius) = check_midpoint_bounds(min_t, max_t, envelope)?;

    Ok(ValidatedResponse { midpoint, radius })
}

/// Stage 1: the CERT.DELE value is signed by the server's long-term key. Returns the
/// delegated key and the delegation's validity window on success.
#[instrument(skip_all)]
fn check_delegation_signature(
    long_term_key: &[u8; 32],
    envelope: &Message,
) -> Result<([u8; 32], u64, u64), ValidationError> {
    trace!("checking delegation signature");
    let cert_bytes = envelope.get_required(Tag::CERT)?;
    let cert = Message::parse(cert_bytes)?;
    let dele_bytes = cert.get_required(Tag::DELE)?;
    let sig = cert.get_required(Tag::SIG)?;

    verify(long_term_key, CERTIFICATE_CONTEXT, dele_bytes, sig)
        .map_err(|_| ValidationError::SignatureInvalid("signature on DELE is invalid".to_string()))?;

    let dele = Message::parse(dele_bytes)?;
    let pubk = expect_len(Tag::PUBK, dele.get_required(Tag::PUBK)?, PUBLIC_KEY_LENGTH)?;
    let min_t = read_u64(Tag::MINT, dele.get_required(Tag::MINT)?)?;
    let max_t = read_u64(Tag::MAXT, dele.get_required(Tag::MAXT)?)?;

    let mut delegated_key = [0u8; 32];
    delegated_key.copy_from_slice(pubk);
    trace!(min_t, max_t, "delegation signature valid");
    Ok((delegated_key, min_t, max_t))
}

/// Stage 2: the envelope's SREP value is signed by the delegated key from stage 1.
#[instrument(skip_all)]
fn check_response_signature(
    delegated_key: &[u8; 32],
    envelope: &Message,
) -> Result<(), ValidationError> {
    trace!("checking response signature");
    let srep_bytes = envelope.get_required(Tag::SREP)?;
    let sig = envelope.get_required(Tag::SIG)?;

    verify(delegated_key, SIGNED_RESPONSE_CONTEXT, srep_bytes, sig)
        .map_err(|_| ValidationError::SignatureInvalid("signature on SREP is invalid".to_string()))
}

/// Stage 3: the client's nonce is included in the batch whose root the server signed.
#[instrument(skip_all)]
fn check_merkle_inclusion(nonce: &[u8; 64], envelope: &Message) -> Result<(), ValidationError> {
    trace!("checking Merkle inclusion");
    let srep_bytes = envelope.get_required(Tag::SREP)?;
    let srep = Message::parse(srep_bytes)?;
    let root = expect_len(Tag::ROOT, srep.get_required(Tag::ROOT)?, HASH_LENGTH)?;

    let path = envelope.get_required(Tag::PATH)?;
    let indx = read_u32(Tag::INDX, envelope.get_required(Tag::INDX)?)?;

    if !path.len().is_multiple_of(merkle::HASH_LENGTH) {
        return Err(ValidationError::MerkleTreeInvalid(format!(
            "PATH length {} is not a multiple of {}",
            path.len(),
            merkle::HASH_LENGTH
        )));
    }

    let computed = match (path.is_empty(), indx == 0) {
        (true, true) => merkle::hash_leaf(nonce),
        (false, false) => merkle::root_from_path(nonce, indx, path)
            .map_err(|e| ValidationError::MerkleTreeInvalid(e.to_string()))?,
        _ => {
            return Err(ValidationError::MerkleTreeInvalid(
                "PATH and INDX must either both be empty/zero or both be non-empty/non-zero"
                    .to_string(),
            ));
        }
    };

    if computed.as_slice() != root {
        return Err(ValidationError::MerkleTreeInvalid(format!(
            "nonce not found in signed Merkle root: computed {} != ROOT {}",
            HEXLOWER.encode(&computed),
            HEXLOWER.encode(root)
        )));
    }

    Ok(())
}

/// Stage 4: the signed midpoint lies within the delegation's validity window, using
/// unsigned 64-bit comparison throughout.
#[instrument(skip(envelope))]
fn check_midpoint_bounds(
    min_t: u64,
    max_t: u64,
    envelope: &Message,
) -> Result<(u64, u32), ValidationError> {
    trace!("checking midpoint bounds");
    let srep_bytes = envelope.get_required(Tag::SREP)?;
    let srep = Message::parse(srep_bytes)?;
    let midp = read_u64(Tag::MIDP, srep.get_required(Tag::MIDP)?)?;
    let radi = read_u32(Tag::RADI, srep.get_required(Tag::RADI)?)?;

    if midp < min_t || midp > max_t {
        let msg = format!(
            "midpoint {midp} ({}) lies outside delegation span [{min_t}, {max_t}] ({} .. {})",
            format_micros(midp),
            format_micros(min_t),
            format_micros(max_t)
        );
        return Err(ValidationError::MidpointInvalid(msg));
    }

    Ok((midp, radi))
}

fn expect_len<'a>(tag: Tag, bytes: &'a [u8], expected: usize) -> Result<&'a [u8], ValidationError> {
    if bytes.len() != expected {
        return Err(MessageError::WrongTagSize {
            tag,
            expected,
            actual: bytes.len(),
        }
        .into());
    }
    Ok(bytes)
}

fn read_u64(tag: Tag, bytes: &[u8]) -> Result<u64, ValidationError> {
    let bytes = expect_len(tag, bytes, 8)?;
    Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
}

fn read_u32(tag: Tag, bytes: &[u8]) -> Result<u32, ValidationError> {
    let bytes = expect_len(tag, bytes, 4)?;
    Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
}

/// Render a microsecond timestamp in calendar form for operator diagnosis. Falls back to
/// the raw integer when the value is outside jiff's representable range (notably, values
/// with the high bit set, which exceed the signed 63-bit range this crate deliberately
/// does not rely on for comparisons).
fn format_micros(micros: u64) -> String {
    match i64::try_from(micros).ok().and_then(|m| jiff::Timestamp::from_microsecond(m).ok()) {
        Some(ts) => ts.to_string(),
        None => format!("{micros} \u{3bc}s since epoch, outside calendar range"),
    }
}
