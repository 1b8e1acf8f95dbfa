use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// How often the app loop wakes up when no input arrives.
pub const UI_TICK_MS: u64 = 100;

/// UI ticks per whole engine second.
pub const TICKS_PER_SECOND: u32 = (1000 / UI_TICK_MS) as u32;

/// Everything the app loop reacts to.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where app events come from. Production reads the terminal; headless
/// tests feed a channel.
pub trait EventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Terminal-backed source. A reader thread translates crossterm events and
/// hangs up once the receiving side is gone.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(ev).is_err() {
                break;
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

/// Channel-fed source for driving the loop without a terminal.
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

/// Pulls the next event, timing out into `Tick` so the loop always makes
/// progress at the UI tick rate even with no input at all.
pub struct Runner<S: EventSource> {
    source: S,
    tick_every: Duration,
}

impl<S: EventSource> Runner<S> {
    pub fn new(source: S, tick_every: Duration) -> Self {
        Self { source, tick_every }
    }

    pub fn step(&self) -> AppEvent {
        match self.source.recv_timeout(self.tick_every) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// Folds UI ticks into whole engine seconds. The engine only ever sees
/// seconds; resetting the gate on pause/resume means a resumed second
/// always starts full, so no partial second is lost or double-counted.
#[derive(Debug, Default)]
pub struct SecondGate {
    subticks: u32,
}

impl SecondGate {
    /// Count one UI tick; true when it completes a whole second.
    pub fn advance(&mut self) -> bool {
        self.subticks += 1;
        if self.subticks >= TICKS_PER_SECOND {
            self.subticks = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.subticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn runner_with_events(events: Vec<AppEvent>) -> Runner<TestEventSource> {
        let (tx, rx) = mpsc::channel();
        for ev in events {
            tx.send(ev).unwrap();
        }
        // The sender is dropped here; a drained channel times out into Tick.
        Runner::new(TestEventSource::new(rx), Duration::from_millis(1))
    }

    #[test]
    fn step_times_out_into_a_tick() {
        let runner = runner_with_events(Vec::new());
        assert!(matches!(runner.step(), AppEvent::Tick));
    }

    #[test]
    fn step_drains_queued_events_before_ticking() {
        let runner = runner_with_events(vec![AppEvent::Resize]);
        assert!(matches!(runner.step(), AppEvent::Resize));
        assert!(matches!(runner.step(), AppEvent::Tick));
    }

    #[test]
    fn second_gate_completes_every_ticks_per_second() {
        let mut gate = SecondGate::default();
        let mut seconds = 0;
        for _ in 0..TICKS_PER_SECOND * 3 {
            if gate.advance() {
                seconds += 1;
            }
        }
        assert_eq!(seconds, 3);
    }

    #[test]
    fn second_gate_reset_restarts_the_current_second() {
        let mut gate = SecondGate::default();
        for _ in 0..TICKS_PER_SECOND - 1 {
            assert!(!gate.advance());
        }
        gate.reset();
        // The next second needs the full tick count again.
        for _ in 0..TICKS_PER_SECOND - 1 {
            assert!(!gate.advance());
        }
        assert!(gate.advance());
    }
}
