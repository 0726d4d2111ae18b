use std::error::Error;

use crate::extract::ExtractError;

pub mod dns;

/// What a processor did with one packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Extracted(String),
    Skipped(ExtractError),
}

pub trait PacketProcessor {
    fn process(&mut self, packet: &[u8]) -> Result<Disposition, Box<dyn Error>>;
}
