/// Domain-separation prefix for Ed25519 signatures over a DELE value (the certificate
/// chain). Includes the trailing NUL byte.
pub const CERTIFICATE_CONTEXT: &[u8] = b"RoughTime v1 delegation signature--\x00";

/// Domain-separation prefix for Ed25519 signatures over an SREP value (the signed
/// response). Includes the trailing NUL byte.
pub const SIGNED_RESPONSE_CONTEXT: &[u8] = b"RoughTime v1 response signature\x00";

/// Length in bytes of an Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length in bytes of an Ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length in bytes of a full (untruncated) SHA-512 digest, used for Merkle hashes.
pub const HASH_LENGTH: usize = 64;
