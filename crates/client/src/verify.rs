//! Ed25519 verification (C4): a single, streamed-message operation over a domain-separation
//! context and a payload.

use aws_lc_rs::signature::{self, UnparsedPublicKey};
use protocol::constants::SIGNATURE_LENGTH;

use crate::error::ValidationError;

/// Verify `signature` over `context || payload` under `public_key`.
///
/// Fails closed: a signature of the wrong length is rejected before the primitive is
/// invoked, and any decoding or verification failure in the underlying primitive is
/// reported as [`ValidationError::SignatureInvalid`].
pub fn verify(
    public_key: &[u8],
    context: &[u8],
    payload: &[u8],
    signature: &[u8],
) -> Result<(), ValidationError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(ValidationError::SignatureInvalid(format!(
            "expected a {SIGNATURE_LENGTH}-byte signature, got {} byte(s)",
            signature.len()
        )));
    }

    let mut message = Vec::with_capacity(context.len() + payload.len());
    message.extend_from_slice(context);
    message.extend_from_slice(payload);

    let key = UnparsedPublicKey::new(&signature::ED25519, public_key);
    key.verify(&message, signature)
        .map_err(|_| ValidationError::SignatureInvalid("signature failed to verify".to_string()))
}

#[cfg(test)]
mod tests {
    use aws_lc_rs::signature::{Ed25519KeyPair, KeyPair};

    use super::*;

    fn keypair() -> Ed25519KeyPair {
        let seed = [0x07u8; 32];
        Ed25519KeyPair::from_seed_unchecked(&seed).unwrap()
    }

    #[test]
    fn verifies_a_correctly_signed_message() {
        let key = keypair();
        let context = b"test-context\x00";
        let payload = b"payload bytes";
        let mut message = context.to_vec();
        message.extend_from_slice(payload);
        let signature = key.sign(&message);

        verify(
            key.public_key().as_ref(),
            context,
            payload,
            signature.as_ref(),
        )
        .unwrap();
    }

    #[test]
    fn rejects_tampered_payload() {
        let key = keypair();
        let context = b"test-context\x00";
        let payload = b"payload bytes";
        let mut message = context.to_vec();
        message.extend_from_slice(payload);
        let signature = key.sign(&message);

        let result = verify(
            key.public_key().as_ref(),
            context,
            b"payload bytex",
            signature.as_ref(),
        );
        assert!(matches!(result, Err(ValidationError::SignatureInvalid(_))));
    }

    #[test]
    fn rejects_wrong_length_signature() {
        let key = keypair();
        let result = verify(key.public_key().as_ref(), b"ctx", b"payload", &[0u8; 32]);
        match result {
            Err(ValidationError::SignatureInvalid(msg)) => assert!(msg.contains("64-byte")),
            other => panic!("expected SignatureInvalid, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_context() {
        let key = keypair();
        let context = b"test-context\x00";
        let payload = b"payload bytes";
        let mut message = context.to_vec();
        message.extend_from_slice(payload);
        let signature = key.sign(&message);

        let result = verify(
            key.public_key().as_ref(),
            b"different-context\x00",
            payload,
            signature.as_ref(),
        );
        assert!(result.is_err());
    }
}
