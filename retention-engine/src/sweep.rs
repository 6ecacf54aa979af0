use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::error::RetentionResult;

/// Storage seam for the retention sweep.
///
/// Implementors must remove expired segment content atomically with respect
/// to readers: a read racing the sweep sees either the full transcript or
/// "expired", never a partially scrubbed one.
#[async_trait]
pub trait TranscriptScrubber: Send + Sync {
    /// Scrub segment storage for every transcription whose window has elapsed
    /// at `now`. Returns the number of transcriptions scrubbed.
    async fn scrub_expired(&self, now: DateTime<Utc>) -> RetentionResult<usize>;
}

/// Periodic retention sweep.
///
/// Enforcement is already lazy on read; the sweep exists so expired segments
/// leave storage even when nobody reads them. A sweep that cannot delete must
/// be loud about it — the countdown would otherwise lie about the data's
/// existence — so failures are logged at error level and the loop keeps
/// running.
pub async fn run_sweep(scrubber: Arc<dyn TranscriptScrubber>, interval: Duration) {
    info!(interval_secs = interval.as_secs(), "Retention sweep started");
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        match scrubber.scrub_expired(Utc::now()).await {
            Ok(0) => debug!("Retention sweep: nothing expired"),
            Ok(scrubbed) => info!(scrubbed, "Retention sweep scrubbed expired transcripts"),
            Err(e) => error!(error = %e, "Retention sweep failed; expired segments may remain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetentionError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingScrubber {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TranscriptScrubber for CountingScrubber {
        async fn scrub_expired(&self, _now: DateTime<Utc>) -> RetentionResult<usize> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(RetentionError::Scrub("storage unavailable".into()))
            } else {
                Ok(1)
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_keeps_running_after_failures() {
        let scrubber = Arc::new(CountingScrubber {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let handle = tokio::spawn(run_sweep(scrubber.clone(), Duration::from_secs(60)));
        tokio::time::sleep(Duration::from_secs(185)).await;
        handle.abort();
        // First tick fires immediately, then once per minute.
        assert!(scrubber.calls.load(Ordering::SeqCst) >= 3);
    }
}
