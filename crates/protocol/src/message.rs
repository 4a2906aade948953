use crate::cursor::{BuildCursor, ParseCursor};
use crate::error::Error;
use crate::tag::Tag;

/// Minimum size of a Roughtime request, in bytes. Requests are padded up to this size so
/// that a server's response can never be larger than the request that elicited it,
/// eliminating use of the protocol as a UDP amplification vector.
pub const MIN_REQUEST_LENGTH: usize = 1024;

/// An ordered tag-value map: the single container format used for every Roughtime PDU
/// (request, response envelope, and nested CERT/DELE/SREP messages).
///
/// Entries are always kept sorted by [`Tag`] and are never duplicated; both invariants are
/// enforced by [`Message::parse`] and by [`Message::build`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    entries: Vec<(Tag, Vec<u8>)>,
}

impl Message {
    /// Parse a wire-format message. See the module-level wire invariants; each violated
    /// invariant returns a distinct [`Error`] variant.
    pub fn parse(bytes: &[u8]) -> Result<Message, Error> {
        let len = bytes.len();
        if len < 4 {
            return Err(Error::TooShort(4 - len));
        }
        if !len.is_multiple_of(4) {
            return Err(Error::Unaligned(len));
        }

        let mut cursor = ParseCursor::new(bytes);
        let num_tags = cursor.try_get_u32_le()?;
        if num_tags > 65535 {
            return Err(Error::InvalidNumTags(num_tags));
        }
        let num_tags = num_tags as usize;

        if num_tags == 0 {
            return Ok(Message { entries: Vec::new() });
        }

        if num_tags == 1 {
            let tag_bytes = cursor.try_get_fixed::<4>()?;
            let tag = Tag::from_wire(tag_bytes);
            let value = cursor.peek_remaining().to_vec();
            return Ok(Message {
                entries: vec![(tag, value)],
            });
        }

        // Header layout for N >= 2: N, then (N-1) offsets, then N tags, then the value region.
        let header_len = 4 + 4 * (num_tags - 1) + 4 * num_tags;
        if len < header_len {
            return Err(Error::TooShort(header_len - len));
        }
        let region_len = (len - header_len) as u32;

        let mut offsets = Vec::with_capacity(num_tags);
        offsets.push(0u32);
        let mut prior_offset = 0u32;
        for index in 0..(num_tags - 1) {
            let offset = cursor.try_get_u32_le()?;
            if !offset.is_multiple_of(4) {
                return Err(Error::OffsetUnaligned {
                    index: index as u32,
                    value: offset,
                });
            }
            if offset > region_len || offset < prior_offset {
                return Err(Error::OffsetOverflow {
                    index: index as u32,
                    value: offset,
                    region_len,
                });
            }
            offsets.push(offset);
            prior_offset = offset;
        }

        let mut tags = Vec::with_capacity(num_tags);
        let mut prior_tag: Option<Tag> = None;
        for index in 0..num_tags {
            let tag_bytes = cursor.try_get_fixed::<4>()?;
            let tag = Tag::from_wire(tag_bytes);
            if let Some(prior) = &prior_tag {
                if tag <= *prior {
                    return Err(Error::TagsNotIncreasing {
                        index: index as u32,
                        prior: u32::from_be_bytes(prior.wire_value()),
                        found: u32::from_be_bytes(tag.wire_value()),
                    });
                }
            }
            prior_tag = Some(tag);
            tags.push(tag);
        }

        let values_region = cursor.peek_remaining();
        if values_region.len() as u32 != region_len {
            return Err(Error::TooShort(
                (region_len as usize).saturating_sub(values_region.len()),
            ));
        }

        let mut entries = Vec::with_capacity(num_tags);
        for i in 0..num_tags {
            let start = offsets[i] as usize;
            let end = if i + 1 < num_tags {
                offsets[i + 1] as usize
            } else {
                values_region.len()
            };
            entries.push((tags[i], values_region[start..end].to_vec()));
        }

        Ok(Message { entries })
    }

    /// Build a message from `entries`, sorting by tag. Rejects duplicate tags. If
    /// `add_padding` is set and the result would be shorter than [`MIN_REQUEST_LENGTH`], a
    /// synthetic `PAD` entry is inserted so the total length is exactly
    /// `MIN_REQUEST_LENGTH`; otherwise a zero-length `PAD` entry is inserted so the request
    /// shape is consistent regardless of payload size.
    pub fn build(entries: Vec<(Tag, Vec<u8>)>, add_padding: bool) -> Result<Message, Error> {
        let mut entries = entries;
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for window in entries.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(Error::DuplicateTag(window[0].0));
            }
        }

        if add_padding {
            let unpadded = Message {
                entries: entries.clone(),
            };
            let unpadded_len = unpadded.encoded_len_for(entries.len() + 1);
            let pad_len = MIN_REQUEST_LENGTH.saturating_sub(unpadded_len);
            entries.push((Tag::PAD, vec![0u8; pad_len]));
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }

        Ok(Message { entries })
    }

    /// Length the message would have if it had exactly `num_tags` entries with the values
    /// currently held (used internally to size padding before PAD is actually inserted).
    fn encoded_len_for(&self, num_tags: usize) -> usize {
        let values_len: usize = self.entries.iter().map(|(_, v)| v.len()).sum();
        if num_tags == 0 {
            4
        } else if num_tags == 1 {
            8 + values_len
        } else {
            4 + 4 * (num_tags - 1) + 4 * num_tags + values_len
        }
    }

    /// Serialize this message to its wire form.
    pub fn encode(&self) -> Vec<u8> {
        let num_tags = self.entries.len();
        let mut out = BuildCursor::with_capacity(self.encoded_len_for(num_tags));

        out.put_u32_le(num_tags as u32);

        if num_tags >= 2 {
            let mut running = 0u32;
            for (_, value) in &self.entries[..num_tags - 1] {
                running += value.len() as u32;
                out.put_u32_le(running);
            }
        }

        for (tag, _) in &self.entries {
            out.put_slice(&tag.wire_value());
        }

        for (_, value) in &self.entries {
            out.put_slice(value);
        }

        out.into_bytes()
    }

    /// Number of entries in this message.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a tag's value, scanning the (small, sorted) entry list.
    pub fn get(&self, tag: Tag) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, v)| v.as_slice())
    }

    pub fn get_required(&self, tag: Tag) -> Result<&[u8], Error> {
        self.get(tag).ok_or(Error::MissingTag(tag))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Tag, &[u8])> {
        self.entries.iter().map(|(t, v)| (t, v.as_slice()))
    }
}
