//! Client facade (C8): a one-shot object that holds a nonce and a server's long-term key,
//! builds exactly one request, and processes exactly one response.

use common::crypto::random_bytes;
use protocol::Message;
use tracing::{debug, instrument, trace, warn};

use crate::error::ClientError;
use crate::request;
use crate::validation::{self, ValidatedResponse, ValidationError};

#[derive(Debug)]
enum ClientState {
    Pending,
    Done {
        valid: bool,
        midpoint: u64,
        radius: u32,
        cause: Option<ValidationError>,
    },
}

/// A Roughtime client bound to one server's long-term public key and one freshly
/// generated nonce. Call [`create_request`](Client::create_request) once, transmit it
/// over whatever transport the caller controls, then call
/// [`process_response`](Client::process_response) once on the reply.
#[derive(Debug)]
pub struct Client {
    nonce: [u8; 64],
    long_term_key: [u8; 32],
    state: ClientState,
}

impl Client {
    /// Construct a client with a freshly generated 64-byte nonce and the given server
    /// long-term public key, which must be exactly 32 bytes.
    #[instrument(skip(long_term_key))]
    pub fn new(long_term_key: &[u8]) -> Result<Self, ClientError> {
        trace!("generating a fresh nonce for new client");
        Self::with_nonce(long_term_key, random_bytes::<64>())
    }

    /// Like [`Client::new`], but with a caller-supplied nonce (deterministic tests, or an
    /// injected entropy source).
    #[instrument(skip(long_term_key, nonce))]
    pub fn with_nonce(long_term_key: &[u8], nonce: [u8; 64]) -> Result<Self, ClientError> {
        let long_term_key: [u8; 32] = long_term_key.try_into().map_err(|_| {
            let len = long_term_key.len();
            debug!(len, "rejected long-term key of the wrong length");
            ClientError::InvalidPublicKeyLength(len)
        })?;

        debug!("client constructed");
        Ok(Self {
            nonce,
            long_term_key,
            state: ClientState::Pending,
        })
    }

    /// Build the 1024-byte (PAD, NONC) request for this client's nonce.
    #[instrument(skip(self))]
    pub fn create_request(&self) -> Message {
        trace!("building request");
        request::create_request(&self.nonce)
    }

    /// Run the four-stage validation pipeline against `envelope`.
    ///
    /// Never propagates a validation failure: outcomes are captured internally and read
    /// back through [`is_response_valid`](Self::is_response_valid),
    /// [`midpoint`](Self::midpoint), [`radius`](Self::radius), and
    /// [`invalid_response_cause`](Self::invalid_response_cause). Returns
    /// [`ClientError::AlreadyProcessed`] if a response has already been processed.
    #[instrument(skip(self, envelope))]
    pub fn process_response(&mut self, envelope: &Message) -> Result<(), ClientError> {
        if !matches!(self.state, ClientState::Pending) {
            return Err(ClientError::AlreadyProcessed);
        }

        self.state = match validation::validate_response(&self.long_term_key, &self.nonce, envelope)
        {
            Ok(ValidatedResponse { midpoint, radius }) => {
                debug!(midpoint, radius, "response validated");
                ClientState::Done {
                    valid: true,
                    midpoint,
                    radius,
                    cause: None,
                }
            }
            Err(cause) => {
                warn!(%cause, "response failed validation");
                ClientState::Done {
                    valid: false,
                    midpoint: 0,
                    radius: 0,
                    cause: Some(cause),
                }
            }
        };

        Ok(())
    }

    /// Whether a response has been processed and passed all four validation stages.
    pub fn is_response_valid(&self) -> bool {
        matches!(self.state, ClientState::Done { valid: true, .. })
    }

    /// Server-asserted midpoint in microseconds since the Unix epoch, or 0 if no valid
    /// response has been processed yet.
    pub fn midpoint(&self) -> u64 {
        match &self.state {
            ClientState::Done {
                valid: true,
                midpoint,
                ..
            } => *midpoint,
            _ => 0,
        }
    }

    /// Uncertainty radius in microseconds, or 0 if no valid response has been processed
    /// yet.
    pub fn radius(&self) -> u32 {
        match &self.state {
            ClientState::Done {
                valid: true, radius, ..
            } => *radius,
            _ => 0,
        }
    }

    /// The frozen 64-byte nonce generated at construction.
    pub fn nonce(&self) -> &[u8; 64] {
        &self.nonce
    }

    /// The reason the most recently processed response was rejected, or `None` if no
    /// response has been processed, or the response was valid.
    pub fn invalid_response_cause(&self) -> Option<&ValidationError> {
        match &self.state {
            ClientState::Done {
                valid: false, cause, ..
            } => cause.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_lc_rs::signature::{Ed25519KeyPair, KeyPair};
    use protocol::Tag;
    use protocol::constants::{CERTIFICATE_CONTEXT, SIGNED_RESPONSE_CONTEXT};

    use super::*;

    fn signed_envelope(nonce: [u8; 64], midp: u64, mint: u64, maxt: u64) -> (Vec<u8>, Message) {
        let long_term = Ed25519KeyPair::from_seed_unchecked(&[0x09u8; 32]).unwrap();
        let delegated = Ed25519KeyPair::from_seed_unchecked(&[0x0Au8; 32]).unwrap();

        let dele = Message::build(
            vec![
                (Tag::PUBK, delegated.public_key().as_ref().to_vec()),
                (Tag::MINT, mint.to_le_bytes().to_vec()),
                (Tag::MAXT, maxt.to_le_bytes().to_vec()),
            ],
            false,
        )
        .unwrap()
        .encode();

        let mut dele_signed = CERTIFICATE_CONTEXT.to_vec();
        dele_signed.extend_from_slice(&dele);
        let dele_sig = long_term.sign(&dele_signed);

        let cert = Message::build(
            vec![(Tag::DELE, dele), (Tag::SIG, dele_sig.as_ref().to_vec())],
            false,
        )
        .unwrap()
        .encode();

        let root = merkle::hash_leaf(&nonce);
        let srep = Message::build(
            vec![
                (Tag::ROOT, root.to_vec()),
                (Tag::MIDP, midp.to_le_bytes().to_vec()),
                (Tag::RADI, 500_000u32.to_le_bytes().to_vec()),
            ],
            false,
        )
        .unwrap()
        .encode();

        let mut srep_signed = SIGNED_RESPONSE_CONTEXT.to_vec();
        srep_signed.extend_from_slice(&srep);
        let srep_sig = delegated.sign(&srep_signed);

        let envelope = Message::build(
            vec![
                (Tag::CERT, cert),
                (Tag::SREP, srep),
                (Tag::SIG, srep_sig.as_ref().to_vec()),
                (Tag::INDX, 0u32.to_le_bytes().to_vec()),
                (Tag::PATH, Vec::new()),
            ],
            false,
        )
        .unwrap();

        (long_term.public_key().as_ref().to_vec(), envelope)
    }

    #[test]
    fn rejects_short_public_key_at_construction() {
        let err = Client::new(&[0u8; 31]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidPublicKeyLength(31)));
    }

    #[test]
    fn create_request_carries_the_frozen_nonce() {
        let client = Client::with_nonce(&[0u8; 32], [0x55u8; 64]).unwrap();
        let request = client.create_request();

        assert_eq!(request.get(Tag::NONC), Some(client.nonce().as_slice()));
    }

    #[test]
    fn valid_response_updates_accessors() {
        let nonce = [0x5Eu8; 64];
        let (long_term_key, envelope) = signed_envelope(nonce, 1_500_000, 1_000_000, 2_000_000);
        let mut client = Client::with_nonce(&long_term_key, nonce).unwrap();

        client.process_response(&envelope).unwrap();

        assert!(client.is_response_valid());
        assert_eq!(client.midpoint(), 1_500_000);
        assert_eq!(client.radius(), 500_000);
        assert!(client.invalid_response_cause().is_none());
    }

    #[test]
    fn invalid_response_zeroes_midpoint_and_radius() {
        let nonce = [0x5Fu8; 64];
        let (long_term_key, envelope) = signed_envelope(nonce, 1_500_000, 1_000_000, 2_000_000);
        // Use a different client nonce so the Merkle stage fails.
        let mut client = Client::with_nonce(&long_term_key, [0x60u8; 64]).unwrap();

        client.process_response(&envelope).unwrap();

        assert!(!client.is_response_valid());
        assert_eq!(client.midpoint(), 0);
        assert_eq!(client.radius(), 0);
        assert!(client.invalid_response_cause().is_some());
    }

    #[test]
    fn processing_a_second_response_is_rejected() {
        let nonce = [0x61u8; 64];
        let (long_term_key, envelope) = signed_envelope(nonce, 1_500_000, 1_000_000, 2_000_000);
        let mut client = Client::with_nonce(&long_term_key, nonce).unwrap();

        client.process_response(&envelope).unwrap();
        let second = client.process_response(&envelope);

        assert!(matches!(second, Err(ClientError::AlreadyProcessed)));
    }
}
