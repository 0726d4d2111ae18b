use clap::Parser;
use qname_sniffer::cli::Cli;
use qname_sniffer::listeners::packet_listener::PacketListener;
use qname_sniffer::listeners::Listener;
use qname_sniffer::shutdown::interrupted;
use std::process;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;


#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Setup tracing. Stdout is reserved for query events.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not install tracing subscriber: {}", e);
        process::exit(1);
    }

    let mut listener = match PacketListener::new(cli.listener_config()) {
        Ok(listener) => listener,
        Err(e) => {
            error!("Could not create packet listener: {}", e);
            process::exit(1);
        }
    };

    tokio::select! {
        res = listener.listen() => {
            if let Err(e) = res {
                error!("Packet listener failed: {}", e);
                process::exit(1);
            }
        }
        _ = interrupted() => {
            eprintln!();
        }
    }
    info!("Packets seen: {}", listener.stats());
}
