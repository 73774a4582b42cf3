use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event reader stopped");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Owns the only tick schedule. A tick is due every `interval`; input
/// arriving in between is returned first but never pushes the deadline back.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Blocks until the next event or the tick deadline, whichever is first
    pub fn step(&mut self) -> AppEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            return self.tick(now);
        }

        match self.event_source.recv_timeout(self.next_tick - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.tick(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                // nothing left to read; just keep time
                let now = Instant::now();
                if now < self.next_tick {
                    std::thread::sleep(self.next_tick - now);
                }
                self.tick(Instant::now())
            }
        }
    }

    fn tick(&mut self, now: Instant) -> AppEvent {
        self.next_tick += self.ticker.interval();
        // skip missed periods instead of bursting ticks
        if self.next_tick <= now {
            self.next_tick = now + self.ticker.interval();
        }
        AppEvent::Tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        assert_matches!(runner.step(), AppEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(50));
        let mut runner = Runner::new(es, ticker);

        assert_matches!(runner.step(), AppEvent::Resize);
    }

    #[test]
    fn step_ticks_when_source_disconnected() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(2));
        let mut runner = Runner::new(es, ticker);

        assert_matches!(runner.step(), AppEvent::Tick);
    }

    #[test]
    fn steady_input_does_not_starve_ticks() {
        let (tx, rx) = mpsc::channel();
        for _ in 0..500 {
            tx.send(AppEvent::Key(KeyEvent::new(
                KeyCode::Char('a'),
                KeyModifiers::NONE,
            )))
            .unwrap();
        }
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(5));
        let mut runner = Runner::new(es, ticker);

        std::thread::sleep(Duration::from_millis(10));
        assert_matches!(runner.step(), AppEvent::Tick);
        assert_matches!(runner.step(), AppEvent::Key(_));
    }
}
