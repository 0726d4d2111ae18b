use std::{fmt, time::SystemTime};

use chrono::{DateTime, Utc};
use etherparse::InternetSlice::{Ipv4, Ipv6};
use etherparse::SlicedPacket;
use etherparse::TransportSlice::Udp;
use serde::Serialize;
use serde_json::Error;

use self::dns::QueryEvent;

pub mod dns;

#[derive(Debug)]
pub enum EventError {
    TranslationError(&'static str),
}

impl std::error::Error for EventError {}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Serialize)]
pub enum Event {
    DnsQuery(QueryEvent),
}

impl Event {
    pub fn get_type(&self) -> String {
        match self {
            Self::DnsQuery(_) => String::from("DnsQuery"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocketAddress {
    pub ip: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketPair {
    pub source: SocketAddress,
    pub destination: SocketAddress,
}

impl SocketPair {
    /// Reads the UDP endpoints of a packet that starts at the IP header.
    pub fn from_packet(packet: &[u8]) -> Result<Self, EventError> {
        let sliced = SlicedPacket::from_ip(packet)
            .map_err(|_| EventError::TranslationError("Could not slice IP packet"))?;
        let (source_ip, dest_ip) = match sliced.ip.as_ref() {
            Some(Ipv4(h, _)) => (h.source_addr().to_string(), h.destination_addr().to_string()),
            Some(Ipv6(h, _)) => (h.source_addr().to_string(), h.destination_addr().to_string()),
            None => return Err(EventError::TranslationError("Missing IP header")),
        };
        let (source_port, dest_port) = match sliced.transport.as_ref() {
            Some(Udp(h)) => (h.source_port(), h.destination_port()),
            _ => return Err(EventError::TranslationError("Unrecognized packet transport")),
        };

        Ok(SocketPair {
            source: SocketAddress { ip: source_ip, port: source_port },
            destination: SocketAddress { ip: dest_ip, port: dest_port },
        })
    }
}

#[derive(Debug, Serialize)]
struct LogEvent<'a> {
    time: String,
    r#type: String,
    event: &'a Event,
}

pub struct Logger;

impl Logger {
    /// Writes the event to stdout as a single JSON line.
    pub fn log_event(event: &Event) -> Result<(), Error> {
        println!("{}", Self::format_event(event)?);
        Ok(())
    }

    pub fn format_event(event: &Event) -> Result<String, Error> {
        let now: DateTime<Utc> = SystemTime::now().into();
        let log_event = LogEvent {
            time: now.to_rfc3339(),
            r#type: event.get_type(),
            event,
        };
        serde_json::to_string(&log_event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_one_json_line() {
        let event = Event::DnsQuery(QueryEvent {
            source: None,
            destination: None,
            domain: String::from("example.com"),
            packet_length: 57,
        });
        let line = Logger::format_event(&event).unwrap();
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "DnsQuery");
        assert_eq!(value["event"]["DnsQuery"]["domain"], "example.com");
        assert_eq!(value["event"]["DnsQuery"]["packet_length"], 57);
        assert!(value["event"]["DnsQuery"].get("source").is_none());
        assert!(DateTime::parse_from_rfc3339(value["time"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn socket_pair_rejects_garbage() {
        assert!(SocketPair::from_packet(&[0x45, 0x00]).is_err());
    }
}
