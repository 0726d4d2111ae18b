//! IPv4/UDP envelope checks ahead of the DNS question section.

use super::ExtractError;

pub const IPV4_MIN_HEADER_LEN: usize = 20;
pub const UDP_HEADER_LEN: usize = 8;
pub const DNS_HEADER_LEN: usize = 12;

/// Packets of this many bytes or fewer cannot carry a question name.
pub const MIN_PACKET_LEN: usize = IPV4_MIN_HEADER_LEN + UDP_HEADER_LEN + DNS_HEADER_LEN;

const IPV4_PROTOCOL_OFFSET: usize = 9;
const IP_VERSION_4: u8 = 4;
const PROTOCOL_UDP: u8 = 17;

/// Returns the offset of the DNS question section, or `None` if the packet
/// is not an IPv4/UDP datagram with room for one.
pub fn classify(buffer: &[u8], length: usize) -> Option<usize> {
    try_classify(buffer, length).ok()
}

/// Like [`classify`], but reports which check failed.
///
/// Only the version, IHL and protocol fields are looked at. Ports, checksums
/// and DNS header flags are not, so responses are classified as well as
/// queries. An IHL below 5 is taken at face value.
pub fn try_classify(buffer: &[u8], length: usize) -> Result<usize, ExtractError> {
    let length = length.min(buffer.len());
    if length <= MIN_PACKET_LEN {
        return Err(ExtractError::TooShort);
    }

    let version_ihl = buffer[0];
    if version_ihl >> 4 != IP_VERSION_4 {
        return Err(ExtractError::NotIpv4);
    }
    if buffer[IPV4_PROTOCOL_OFFSET] != PROTOCOL_UDP {
        return Err(ExtractError::NotUdp);
    }

    let ip_header_len = usize::from(version_ihl & 0x0F) * 4;
    let question_start = ip_header_len + UDP_HEADER_LEN + DNS_HEADER_LEN;
    if question_start >= length {
        return Err(ExtractError::QuestionOutOfRange);
    }
    Ok(question_start)
}
