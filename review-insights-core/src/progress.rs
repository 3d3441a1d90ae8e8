// Logs through tracing so progress is visible in non-tty output too.
use {
    std::time::{Duration, Instant},
    tracing::info,
};

const REPORT_INTERVAL: Duration = Duration::from_secs(10);

pub struct Progress {
    message: String,
    interval: Duration,
    started_at: Instant,
    reported_at: Instant,
    total_processed: u64,
}

impl Progress {
    pub fn new(message: &str) -> Self {
        Self::with_interval(message, REPORT_INTERVAL)
    }

    pub fn with_interval(message: &str, interval: Duration) -> Self {
        Self {
            message: message.to_owned(),
            interval,
            started_at: Instant::now(),
            reported_at: Instant::now(),
            total_processed: 0,
        }
    }

    /// Counts one item; returns true when a report was logged.
    pub fn update(&mut self) -> bool {
        self.total_processed += 1;

        let now = Instant::now();
        if now - self.reported_at >= self.interval {
            self.reported_at = now;
            info!("{}: {} total ({:.2}/second)", self.message, self.total_processed, self.rate(now));
            true
        } else {
            false
        }
    }

    pub fn finish(&self) {
        info!("{}: done, {} total ({:.2}/second)", self.message, self.total_processed, self.rate(Instant::now()));
    }

    pub fn total_processed(&self) -> u64 {
        self.total_processed
    }

    fn rate(&self, now: Instant) -> f32 {
        let elapsed = (now - self.started_at).as_secs_f32();
        if elapsed > 0.0 {
            self.total_processed as f32 / elapsed
        } else {
            0.0
        }
    }
}
