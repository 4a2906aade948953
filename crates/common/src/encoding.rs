//! Encoding and decoding utilities for keys and other diagnostic output.

use std::io::Write;

use data_encoding::{
    BASE64, BASE64_NOPAD, BASE64URL, BASE64URL_NOPAD, DecodeError, DecodeKind, HEXLOWER, HEXUPPER,
};

/// Decode a 32-byte Ed25519 public key from hex or base64. Tries each encoding in turn
/// until one succeeds.
pub fn try_decode_key(encoded_key: &str) -> Result<[u8; 32], DecodeError> {
    let key = try_decode(encoded_key)?;

    let key: [u8; 32] = key.as_slice().try_into().map_err(|_| DecodeError {
        position: key.len(),
        kind: DecodeKind::Length,
    })?;

    Ok(key)
}

/// Attempt to decode `encoded_value` into a `Vec<u8>` using multiple encoding formats until
/// one succeeds.
pub fn try_decode(encoded_value: &str) -> Result<Vec<u8>, DecodeError> {
    HEXLOWER
        .decode(encoded_value.as_bytes())
        .or_else(|_| HEXUPPER.decode(encoded_value.as_bytes()))
        .or_else(|_| BASE64URL.decode(encoded_value.as_bytes()))
        .or_else(|_| BASE64URL_NOPAD.decode(encoded_value.as_bytes()))
        .or_else(|_| BASE64.decode(encoded_value.as_bytes()))
        .or_else(|_| BASE64_NOPAD.decode(encoded_value.as_bytes()))
}

/// Write a hex dump of the provided data to the writer.
///
/// The output format is similar to traditional hex dump tools:
/// - 8-digit hex offset
/// - 16 bytes per line in hex (grouped by 2 bytes)
/// - ASCII representation on the right
pub fn hexdump<W: Write>(data: &[u8], writer: &mut W) -> std::io::Result<()> {
    const BYTES_PER_LINE: usize = 16;

    for (offset, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        write!(writer, "{:08x}: ", offset * BYTES_PER_LINE)?;

        for (i, byte) in chunk.iter().enumerate() {
            write!(writer, "{byte:02x}")?;
            if i % 2 == 1 {
                write!(writer, " ")?;
            }
        }

        let padding = BYTES_PER_LINE - chunk.len();
        for i in 0..padding {
            write!(writer, "  ")?;
            if (chunk.len() + i) % 2 == 1 {
                write!(writer, " ")?;
            }
        }

        write!(writer, " |")?;
        for byte in chunk {
            let ch = if byte.is_ascii_graphic() || *byte == b' ' {
                *byte as char
            } else {
                '.'
            };
            write!(writer, "{ch}")?;
        }
        writeln!(writer, "|")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_key_hex_lower() {
        let key_hex = "01".repeat(32);
        let result = try_decode_key(&key_hex).unwrap();
        assert_eq!(result, [0x01u8; 32]);
    }

    #[test]
    fn decode_key_hex_upper() {
        let key_hex = "0A".repeat(32);
        let result = try_decode_key(&key_hex).unwrap();
        assert_eq!(result, [0x0au8; 32]);
    }

    #[test]
    fn decode_key_base64() {
        let key_b64 = "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI=";
        let result = try_decode_key(key_b64).unwrap();
        assert_eq!(result, [0x42u8; 32]);
    }

    #[test]
    fn decode_key_base64_nopad() {
        let key_b64 = "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI";
        let result = try_decode_key(key_b64).unwrap();
        assert_eq!(result, [0x42u8; 32]);
    }

    #[test]
    fn decode_key_wrong_length() {
        let key_hex = "0101010101010101";
        let result = try_decode_key(key_hex);
        assert!(matches!(
            result,
            Err(DecodeError {
                kind: DecodeKind::Length,
                ..
            })
        ));
    }

    #[test]
    fn decode_key_invalid_encoding() {
        let key = "not-a-valid-key-encoding!!!";
        let result = try_decode_key(key);
        assert!(matches!(result, Err(DecodeError { .. })));
    }

    #[test]
    fn hexdump_wraps_and_annotates() {
        let data = b"Hello, World! This is a test.";
        let mut output = Vec::new();

        hexdump(data, &mut output).unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains("00000000:"));
        assert!(result.contains("4865 6c6c"));
        assert!(result.contains("|Hello, World! Th|"));
        assert!(result.contains("|is is a test.|"));
    }

    #[test]
    fn hexdump_pads_short_final_line() {
        let data = b"Test";
        let mut output = Vec::new();

        hexdump(data, &mut output).unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains("00000000: 5465 7374"));
        assert!(result.contains("|Test|"));
    }
}
