//! Decoder for the uncompressed label sequence of a DNS question name.

use super::ExtractError;

/// Labels walked before a name is given up on. The check runs before each
/// label, so at most `MAX_LABEL_ITERATIONS + 1` labels are read.
pub const MAX_LABEL_ITERATIONS: usize = 128;

const POINTER_MASK: u8 = 0xC0;

/// Decodes the name starting at `offset` into a dotted string.
///
/// Returns `None` for an empty name or any out-of-bounds label. Label bytes
/// that are not valid UTF-8 come back as U+FFFD.
pub fn decode(buffer: &[u8], length: usize, offset: usize) -> Option<String> {
    try_decode(buffer, length, offset).ok().map(into_string)
}

/// Turns decoded name bytes into a `String`, replacing invalid UTF-8 with
/// U+FFFD. Valid names are moved, not copied.
pub(crate) fn into_string(name: Vec<u8>) -> String {
    String::from_utf8(name).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Decodes the name starting at `offset` into raw dotted bytes.
///
/// Decoding stops at a zero-length label, at a compression pointer (which is
/// not followed), or at `length`. Nothing at or past `length` is read.
pub fn try_decode(buffer: &[u8], length: usize, offset: usize) -> Result<Vec<u8>, ExtractError> {
    let length = length.min(buffer.len());
    if offset >= length {
        return Err(ExtractError::OffsetOutOfRange);
    }

    let mut name = Vec::new();
    let mut pos = offset;
    let mut iterations = 0usize;

    while pos < length {
        let label_len = buffer[pos];
        if label_len == 0 {
            break;
        }

        if iterations > MAX_LABEL_ITERATIONS {
            return Err(ExtractError::TooManyLabels);
        }
        iterations += 1;

        if label_len & POINTER_MASK == POINTER_MASK {
            if name.is_empty() {
                return Err(ExtractError::CompressedName);
            }
            break;
        }

        let start = pos + 1;
        let end = start + usize::from(label_len);
        if end > length {
            return Err(ExtractError::LabelOverrun);
        }

        if !name.is_empty() {
            name.push(b'.');
        }
        name.extend_from_slice(&buffer[start..end]);
        pos = end;
    }

    if name.is_empty() {
        return Err(ExtractError::EmptyName);
    }
    Ok(name)
}
