use std::error::Error;
use std::fmt;

use tracing::debug;

use crate::events::{dns::QueryEvent, Event, Logger};
use crate::extract::{try_extract_domain, ErrorClass};

use super::{Disposition, PacketProcessor};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorStats {
    pub processed: u64,
    pub extracted: u64,
    pub malformed: u64,
    pub unsupported: u64,
}

impl fmt::Display for ProcessorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} extracted={} malformed={} unsupported={}",
            self.processed, self.extracted, self.malformed, self.unsupported
        )
    }
}

/// Pulls the question name out of each packet and logs a query event for it.
#[derive(Debug, Default)]
pub struct DnsProcessor {
    stats: ProcessorStats,
}

impl DnsProcessor {
    pub fn new() -> DnsProcessor {
        DnsProcessor::default()
    }

    pub fn stats(&self) -> ProcessorStats {
        self.stats
    }
}

impl PacketProcessor for DnsProcessor {
    fn process(&mut self, packet: &[u8]) -> Result<Disposition, Box<dyn Error>> {
        self.stats.processed += 1;

        let domain = match try_extract_domain(packet) {
            Ok(domain) => domain,
            Err(e) => {
                match e.class() {
                    ErrorClass::MalformedPacket => self.stats.malformed += 1,
                    ErrorClass::UnsupportedProtocol => self.stats.unsupported += 1,
                }
                debug!("Skipping {} byte packet: {}", packet.len(), e);
                return Ok(Disposition::Skipped(e));
            }
        };

        self.stats.extracted += 1;
        Logger::log_event(&Event::DnsQuery(QueryEvent::from_packet(packet, domain.clone())))?;
        Ok(Disposition::Extracted(domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tests::ipv4_udp_dns;
    use crate::extract::ExtractError;

    #[test]
    fn counts_each_outcome() {
        let mut processor = DnsProcessor::new();

        let query = ipv4_udp_dns(5, b"\x07example\x03org\x00\x00\x01\x00\x01");
        assert_eq!(
            processor.process(&query).unwrap(),
            Disposition::Extracted(String::from("example.org"))
        );

        let mut tcp = query.clone();
        tcp[9] = 6;
        assert_eq!(
            processor.process(&tcp).unwrap(),
            Disposition::Skipped(ExtractError::NotUdp)
        );

        assert_eq!(
            processor.process(&query[..30]).unwrap(),
            Disposition::Skipped(ExtractError::TooShort)
        );

        let compressed = ipv4_udp_dns(5, b"\xc0\x0c\x00\x01\x00\x01");
        assert_eq!(
            processor.process(&compressed).unwrap(),
            Disposition::Skipped(ExtractError::CompressedName)
        );

        assert_eq!(
            processor.stats(),
            ProcessorStats { processed: 4, extracted: 1, malformed: 1, unsupported: 2 }
        );
    }
}
