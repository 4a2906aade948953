//! Request builder (C6): a nonce-bearing request padded to the protocol minimum size.

use protocol::{Message, Tag};

/// Build the client request message: a single semantic tag NONC carrying the 64-byte
/// nonce, padded to exactly [`protocol::MIN_REQUEST_LENGTH`] bytes.
///
/// The padding is a protocol invariant, not a client preference: it keeps server
/// responses no larger than the request, so Roughtime cannot be used as a UDP
/// amplification vector.
pub fn create_request(nonce: &[u8; 64]) -> Message {
    Message::build(vec![(Tag::NONC, nonce.to_vec())], true)
        .expect("a single 64-byte NONC tag always builds")
}
