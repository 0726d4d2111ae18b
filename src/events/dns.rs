use serde::Serialize;
use tracing::debug;

use super::{SocketAddress, SocketPair};

#[derive(Debug, Serialize)]
pub struct QueryEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SocketAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<SocketAddress>,
    pub domain: String,
    pub packet_length: usize,
}

impl QueryEvent {
    /// Builds the event for a packet whose question name was `domain`.
    ///
    /// Endpoints are left out when the headers do not slice cleanly, which
    /// can happen for packets the extractor still accepts (e.g. a bogus
    /// total length).
    pub fn from_packet(packet: &[u8], domain: String) -> Self {
        let (source, destination) = match SocketPair::from_packet(packet) {
            Ok(pair) => (Some(pair.source), Some(pair.destination)),
            Err(e) => {
                debug!("No endpoints for DNS query {}: {}", domain, e);
                (None, None)
            }
        };

        QueryEvent {
            source,
            destination,
            domain,
            packet_length: packet.len(),
        }
    }
}
