use std::cmp::Ordering;

/// RFC 4.1.3: Tags are used to identify values in Roughtime messages.
///
/// Tags are ordered by the little-endian interpretation of their four ASCII wire bytes.
/// For example 'SIG\x00' is 0x00474953 and 'NONC' is 0x434e4f4e. Tags are serialized to
/// the wire as the raw ASCII bytes, in that same order.
///
/// Unknown tags are represented by `Unknown`, carrying the raw wire value, so that parsing
/// never loses information and comparisons over `Tag` remain total.
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Tag {
    SIG,
    NONC,
    DELE,
    PATH,
    RADI,
    PUBK,
    MIDP,
    SREP,
    MINT,
    ROOT,
    CERT,
    MAXT,
    INDX,
    PAD,
    Unknown(u32),
}

impl Tag {
    /// Returns the on-the-wire representation of this tag: its four ASCII bytes.
    pub const fn wire_value(&self) -> [u8; 4] {
        match self {
            Tag::SIG => *b"SIG\x00",
            Tag::NONC => *b"NONC",
            Tag::DELE => *b"DELE",
            Tag::PATH => *b"PATH",
            Tag::RADI => *b"RADI",
            Tag::PUBK => *b"PUBK",
            Tag::MIDP => *b"MIDP",
            Tag::SREP => *b"SREP",
            Tag::MINT => *b"MINT",
            Tag::ROOT => *b"ROOT",
            Tag::CERT => *b"CERT",
            Tag::MAXT => *b"MAXT",
            Tag::INDX => *b"INDX",
            Tag::PAD => *b"PAD\xff",
            Tag::Unknown(v) => v.to_be_bytes(),
        }
    }

    /// Little-endian interpretation of the wire bytes, used only for sort ordering.
    fn sort_key(&self) -> u32 {
        u32::from_le_bytes(self.wire_value())
    }

    /// Build a `Tag` from its four wire bytes. Infallible: unrecognized bytes become
    /// `Tag::Unknown`.
    pub fn from_wire(bytes: [u8; 4]) -> Self {
        match &bytes {
            b"SIG\x00" => Tag::SIG,
            b"NONC" => Tag::NONC,
            b"DELE" => Tag::DELE,
            b"PATH" => Tag::PATH,
            b"RADI" => Tag::RADI,
            b"PUBK" => Tag::PUBK,
            b"MIDP" => Tag::MIDP,
            b"SREP" => Tag::SREP,
            b"MINT" => Tag::MINT,
            b"ROOT" => Tag::ROOT,
            b"CERT" => Tag::CERT,
            b"MAXT" => Tag::MAXT,
            b"INDX" => Tag::INDX,
            b"PAD\xff" => Tag::PAD,
            _ => Tag::Unknown(u32::from_be_bytes(bytes)),
        }
    }

    /// RFC 4: Messages MAY be recursive, i.e. the value of a tag can itself be a message.
    /// Returns true if this tag's value is itself an encoded message.
    pub const fn is_nested(&self) -> bool {
        matches!(self, Tag::CERT | Tag::DELE | Tag::SREP)
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ordering of tags is based on their little-endian value, even though tags are
        // serialized as plain ASCII bytes. This is confusing, but it is correct: it's
        // what makes "MAXT" sort after "MINT".
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
