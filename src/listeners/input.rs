//! Decoding of captured packets handed to a listener.

use std::fmt;

use clap::ValueEnum;
use etherparse::Ethernet2HeaderSlice;

const ETHERTYPE_IPV4: u16 = 0x0800;

/// Link-layer framing of captured packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkType {
    /// No link-layer header; the packet starts at the IP header (tun devices).
    Raw,
    /// Ethernet II header ahead of the IP header.
    Ethernet,
}

/// How packets are laid out in the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One packet per line as hex digits.
    Hex,
    /// The whole input is a single packet.
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    OddLength(usize),
    InvalidDigit(char),
}

impl std::error::Error for HexError {}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Parses one hex line into packet bytes.
///
/// Whitespace between digits is ignored. Blank lines and lines starting with
/// `#` yield `Ok(None)`.
pub fn parse_hex_packet(line: &str) -> Result<Option<Vec<u8>>, HexError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let digits: Vec<char> = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }

    let mut packet = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks(2) {
        let hi = pair[0].to_digit(16).ok_or(HexError::InvalidDigit(pair[0]))?;
        let lo = pair[1].to_digit(16).ok_or(HexError::InvalidDigit(pair[1]))?;
        packet.push(((hi << 4) | lo) as u8);
    }
    Ok(Some(packet))
}

/// Returns the part of `frame` that starts at the IPv4 header, or `None` if
/// the frame carries something else.
pub fn strip_link_layer(frame: &[u8], link: LinkType) -> Option<&[u8]> {
    match link {
        LinkType::Raw => Some(frame),
        LinkType::Ethernet => {
            let header = Ethernet2HeaderSlice::from_slice(frame).ok()?;
            if header.ether_type() != ETHERTYPE_IPV4 {
                return None;
            }
            frame.get(header.slice().len()..)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_lines() {
        assert_eq!(parse_hex_packet("45 00 0a\tFF"), Ok(Some(vec![0x45, 0x00, 0x0a, 0xff])));
        assert_eq!(parse_hex_packet("   "), Ok(None));
        assert_eq!(parse_hex_packet("# captured on tun0"), Ok(None));
        assert_eq!(parse_hex_packet("450"), Err(HexError::OddLength(3)));
        assert_eq!(parse_hex_packet("4g"), Err(HexError::InvalidDigit('g')));
    }

    #[test]
    fn raw_frames_pass_through() {
        let frame = [0x45u8, 0x00];
        assert_eq!(strip_link_layer(&frame, LinkType::Raw), Some(&frame[..]));
    }

    #[test]
    fn ethernet_header_is_stripped() {
        let mut frame = vec![0u8; 12];
        frame.extend_from_slice(&[0x08, 0x00, 0x45, 0x00]);
        assert_eq!(strip_link_layer(&frame, LinkType::Ethernet), Some(&[0x45u8, 0x00][..]));

        frame[12] = 0x86;
        frame[13] = 0xdd;
        assert_eq!(strip_link_layer(&frame, LinkType::Ethernet), None);

        assert_eq!(strip_link_layer(&frame[..10], LinkType::Ethernet), None);
    }
}
