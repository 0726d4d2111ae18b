use std::future::Future;
use std::io;

use tokio::signal;
use tracing::error;

/// Wait for CTRL+C.
///
/// Never returns if the handler cannot be installed, so a caller racing this
/// against its work keeps working instead of stopping at once.
pub async fn interrupted() {
    wait_for(signal::ctrl_c()).await
}

async fn wait_for<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!("Could not listen for CTRL+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn delivered_signal_returns() {
        wait_for(async { Ok(()) }).await;
    }

    #[tokio::test]
    async fn failed_handler_waits_forever() {
        let failing = async { Err(io::Error::new(io::ErrorKind::Other, "no signal support")) };
        let waited = tokio::time::timeout(Duration::from_millis(50), wait_for(failing)).await;
        assert!(waited.is_err());
    }
}
