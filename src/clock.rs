use crate::config::ClockFormat;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// A repeating callback on a fixed period. The schedule lives exactly as long
/// as this handle: dropping it (or calling [`Ticker::stop`]) aborts the task.
pub struct Ticker {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    /// The first callback fires one `period` after this call, not immediately.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        // Anchor the schedule here rather than on the task's first poll.
        let first = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(first, period);
            // Burst keeps ticks on the original grid after a stall.
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                on_tick();
            }
        });
        debug!("Ticker started with period {:?}", period);
        Self {
            period,
            task: Some(task),
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn stop(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Ticker with period {:?} cancelled", self.period);
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Header clock: captures the time on start and re-captures it every period.
pub struct ClockTicker {
    rx: watch::Receiver<DateTime<Local>>,
    ticker: Ticker,
}

impl ClockTicker {
    pub fn start(period: Duration) -> Self {
        Self::start_with(period, Local::now)
    }

    pub fn start_with<S>(period: Duration, source: S) -> Self
    where
        S: Fn() -> DateTime<Local> + Send + 'static,
    {
        let (tx, rx) = watch::channel(source());
        let ticker = Ticker::spawn(period, move || {
            tx.send_replace(source());
        });
        Self { rx, ticker }
    }

    pub fn now(&self) -> DateTime<Local> {
        *self.rx.borrow()
    }

    /// Returns the new time if the clock moved since the last call.
    pub fn take_update(&mut self) -> Option<DateTime<Local>> {
        if self.rx.has_changed().unwrap_or(false) {
            Some(*self.rx.borrow_and_update())
        } else {
            None
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DateTime<Local>> {
        self.rx.clone()
    }

    pub fn formatted(&self, format: ClockFormat) -> String {
        format_time(&self.now(), format)
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_active()
    }

    pub fn stop(self) {
        self.ticker.stop();
    }
}

pub fn format_time<Tz>(time: &DateTime<Tz>, format: ClockFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format(format.pattern()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SECOND: Duration = Duration::from_millis(1000);

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn counting_ticker() -> (Ticker, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        let ticker = Ticker::spawn(SECOND, move || {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        (ticker, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_seconds_three_ticks() {
        let (ticker, count) = counting_ticker();
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0, "start itself is not a tick");

        time::advance(Duration::from_millis(3000)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(ticker.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stepwise_ticks_do_not_drift() {
        let (_ticker, count) = counting_ticker();
        for expected in 1..=5 {
            time::advance(SECOND).await;
            settle().await;
            assert_eq!(count.load(Ordering::SeqCst), expected);
        }
        time::advance(Duration::from_millis(999)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_further_ticks() {
        let (ticker, count) = counting_ticker();
        time::advance(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        ticker.stop();
        time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_further_ticks() {
        let count = {
            let (_ticker, count) = counting_ticker();
            time::advance(SECOND).await;
            settle().await;
            count
        };
        assert_eq!(count.load(Ordering::SeqCst), 1);

        time::advance(Duration::from_secs(3600)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_publishes_recaptured_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let base = Local::now();
        let mut clock = ClockTicker::start_with(SECOND, move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) as i64;
            base + chrono::Duration::seconds(n)
        });

        assert_eq!(clock.now(), base);
        assert!(clock.take_update().is_none());

        time::advance(SECOND).await;
        settle().await;
        assert_eq!(clock.take_update(), Some(base + chrono::Duration::seconds(1)));
        assert!(clock.take_update().is_none(), "update is consumed once");

        time::advance(Duration::from_millis(2000)).await;
        settle().await;
        assert_eq!(clock.now(), base + chrono::Duration::seconds(3));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_stop_freezes_value() {
        let clock = ClockTicker::start(SECOND);
        assert!(clock.is_running());
        let mut rx = clock.subscribe();
        rx.borrow_and_update();

        clock.stop();
        time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert!(rx.has_changed().is_err(), "sender is gone once the ticker stops");
    }

    #[test]
    fn test_format_time_variants() {
        let t = Utc.with_ymd_and_hms(2024, 3, 8, 15, 4, 5).unwrap();
        assert_eq!(format_time(&t, ClockFormat::TwelveHour), "3:04:05 PM");
        assert_eq!(format_time(&t, ClockFormat::TwentyFourHour), "15:04:05");

        let morning = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 9).unwrap();
        assert_eq!(format_time(&morning, ClockFormat::TwelveHour), "12:00:09 AM");
    }
}
