use thiserror::Error;

use crate::tag::Tag;

/// Failure categories for parsing and building a Roughtime message (C5, C9).
///
/// Each variant names exactly one wire invariant violation. `Display` renders a
/// human-readable message suitable for logging; callers that need to branch on the
/// failure category match on the variant itself.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected end of message: needed {0} more byte(s)")]
    TooShort(usize),

    #[error("message length {0} is not a multiple of 4")]
    Unaligned(usize),

    #[error("number of tags {0} exceeds the maximum of 65535")]
    InvalidNumTags(u32),

    #[error("offset at index {index} is not 4-byte aligned: {value:#x}")]
    OffsetUnaligned { index: u32, value: u32 },

    #[error("offset at index {index} ({value:#x}) exceeds the value region length ({region_len:#x})")]
    OffsetOverflow {
        index: u32,
        value: u32,
        region_len: u32,
    },

    #[error("tag at index {index} ({found:#010x}) does not strictly increase over the prior tag ({prior:#010x})")]
    TagsNotIncreasing {
        index: u32,
        prior: u32,
        found: u32,
    },

    #[error("duplicate tag in builder input: {0:?}")]
    DuplicateTag(Tag),

    #[error("wrong tag size for {tag:?}: expected {expected} bytes, got {actual} bytes")]
    WrongTagSize {
        tag: Tag,
        expected: usize,
        actual: usize,
    },

    #[error("required tag missing: {0:?}")]
    MissingTag(Tag),
}
