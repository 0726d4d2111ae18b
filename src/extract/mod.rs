//! Extraction of the queried domain from a raw IPv4/UDP DNS packet.
//!
//! The extractor is split into two stages that compose linearly:
//! [`envelope`] finds where the DNS question section starts, and [`qname`]
//! decodes the label sequence found there. Both stages are pure functions
//! over a borrowed buffer and never read past its end.
//!
//! DNS name compression is not resolved. A pointer in the question name ends
//! decoding with whatever plain labels were read before it.

use std::fmt;

pub mod envelope;
pub mod qname;

pub use envelope::{classify, try_classify};
pub use qname::{decode, try_decode};

/// Why a packet did not yield a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// Not enough bytes for an IPv4, UDP and DNS header.
    TooShort,
    /// The IP version nibble is not 4.
    NotIpv4,
    /// The IPv4 protocol byte is not UDP.
    NotUdp,
    /// The question section would start at or past the end of the packet.
    QuestionOutOfRange,
    /// The decoder was handed a starting offset outside the buffer.
    OffsetOutOfRange,
    /// A label length runs past the end of the packet.
    LabelOverrun,
    /// The name has more labels than the decoder is willing to walk.
    TooManyLabels,
    /// The name is the root: a zero-length label before any other.
    EmptyName,
    /// The name starts with a compression pointer, which is not followed.
    CompressedName,
}

/// Coarse grouping of [`ExtractError`] kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    MalformedPacket,
    UnsupportedProtocol,
}

impl ExtractError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotIpv4 | Self::NotUdp | Self::CompressedName => ErrorClass::UnsupportedProtocol,
            Self::TooShort
            | Self::QuestionOutOfRange
            | Self::OffsetOutOfRange
            | Self::LabelOverrun
            | Self::TooManyLabels
            | Self::EmptyName => ErrorClass::MalformedPacket,
        }
    }
}

impl std::error::Error for ExtractError {}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Returns the first question name of an IPv4/UDP DNS packet, or `None` if
/// the packet is not one or the name cannot be read safely.
///
/// The returned name is never empty.
pub fn extract_domain(packet: &[u8]) -> Option<String> {
    try_extract_domain(packet).ok()
}

/// Like [`extract_domain`], but reports why extraction failed.
pub fn try_extract_domain(packet: &[u8]) -> Result<String, ExtractError> {
    let question_start = try_classify(packet, packet.len())?;
    let name = try_decode(packet, packet.len(), question_start)?;
    Ok(qname::into_string(name))
}
