use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use crate::listeners::input::{InputFormat, LinkType};
use crate::listeners::packet_listener::PacketListenerConfig;

/// Print the queried domain of every IPv4/UDP DNS packet in a capture.
#[derive(Debug, Parser)]
#[clap(name = "qname-sniffer", version, about)]
pub struct Cli {
    /// Capture to read (stdin if omitted).
    #[clap(short, long, value_parser)]
    pub input: Option<PathBuf>,

    #[clap(short, long, value_enum, default_value = "hex")]
    pub format: InputFormat,

    #[clap(short, long, value_enum, default_value = "raw")]
    pub link: LinkType,

    /// Diagnostic log level, written to stderr.
    #[clap(long, value_parser, default_value = "info")]
    pub log_level: Level,
}

impl Cli {
    pub fn listener_config(&self) -> PacketListenerConfig {
        PacketListenerConfig {
            input: self.input.clone(),
            format: self.format,
            link: self.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["qname-sniffer"]).unwrap();
        assert_eq!(cli.input, None);
        assert_eq!(cli.format, InputFormat::Hex);
        assert_eq!(cli.link, LinkType::Raw);
        assert_eq!(cli.log_level, Level::INFO);
    }

    #[test]
    fn explicit_options() {
        let cli = Cli::try_parse_from([
            "qname-sniffer",
            "--input",
            "/tmp/tun0.bin",
            "--format",
            "binary",
            "--link",
            "ethernet",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = cli.listener_config();
        assert_eq!(config.input, Some(PathBuf::from("/tmp/tun0.bin")));
        assert_eq!(config.format, InputFormat::Binary);
        assert_eq!(config.link, LinkType::Ethernet);
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_unknown_link() {
        assert!(Cli::try_parse_from(["qname-sniffer", "--link", "wifi"]).is_err());
    }
}
