use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tracing::{debug, error, info};

use crate::processors::{dns::{DnsProcessor, ProcessorStats}, PacketProcessor};

use super::input::{parse_hex_packet, strip_link_layer, InputFormat, LinkType};
use super::{Listener, ListenerError};

/// Given an expression that returns a Result type, return the value or log the error
/// and continue the loop.
macro_rules! continue_on_err {
    ($res:expr, $line:expr) => {
        match $res {
            Ok(val) => val,
            Err(e) => {
                error!("Skipping input line {}: {}", $line, e);
                continue;
            }
        }
    };
}

pub struct PacketListenerConfig {
    /// Capture file to read; stdin when unset.
    pub input: Option<PathBuf>,
    pub format: InputFormat,
    pub link: LinkType,
}

pub struct PacketListener {
    config: PacketListenerConfig,
    processor: DnsProcessor,
}

impl PacketListener {
    pub fn stats(&self) -> ProcessorStats {
        self.processor.stats()
    }

    async fn open(&self) -> Result<Box<dyn AsyncRead + Unpin + Send>, ListenerError> {
        match &self.config.input {
            Some(path) => {
                info!("Reading packets from {}", path.display());
                Ok(Box::new(File::open(path).await?))
            }
            None => {
                info!("Reading packets from stdin");
                Ok(Box::new(io::stdin()))
            }
        }
    }

    fn handle_frame(&mut self, frame: &[u8]) {
        let packet = match strip_link_layer(frame, self.config.link) {
            Some(packet) => packet,
            None => {
                debug!("Dropping non-IPv4 frame of {} bytes", frame.len());
                return;
            }
        };

        if let Err(e) = self.processor.process(packet) {
            error!("Could not process packet: {}", e);
        }
    }
}

#[async_trait]
impl Listener for PacketListener {
    type Config = PacketListenerConfig;

    fn new(config: PacketListenerConfig) -> Result<PacketListener, ListenerError> {
        Ok(PacketListener {
            config,
            processor: DnsProcessor::new(),
        })
    }

    async fn listen(&mut self) -> Result<(), ListenerError> {
        let mut reader = self.open().await?;

        match self.config.format {
            InputFormat::Binary => {
                let mut frame = Vec::new();
                reader.read_to_end(&mut frame).await?;
                self.handle_frame(&frame);
            }
            InputFormat::Hex => {
                let mut reader = BufReader::new(reader);
                let mut buf = Vec::new();
                let mut line_no = 0usize;
                loop {
                    buf.clear();
                    if reader.read_until(b'\n', &mut buf).await? == 0 {
                        break;
                    }
                    line_no += 1;
                    let line = continue_on_err!(std::str::from_utf8(&buf), line_no);
                    if let Some(frame) = continue_on_err!(parse_hex_packet(line), line_no) {
                        self.handle_frame(&frame);
                    }
                }
            }
        }

        info!("Input exhausted: {}", self.processor.stats());
        Ok(())
    }
}
