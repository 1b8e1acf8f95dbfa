use std::sync::mpsc;
use std::time::Duration;

use rondo::config::TimerConfig;
use rondo::engine::{Cue, Phase, TimerEngine};
use rondo::program::Program;
use rondo::runtime::{AppEvent, Runner, TestEventSource};

// Headless integration using the internal runtime + TimerEngine without a
// TTY. The runner's tick is the engine's second here, which is exactly the
// scheduling swap the runtime seam exists for.

fn program() -> Program {
    Program {
        id: "smoke".to_string(),
        name: "Smoke".to_string(),
        icon: "*".to_string(),
        subtitle: "headless".to_string(),
        work_secs: 5,
        rest_secs: 5,
        rounds: 2,
        sets: 1,
        set_rest_secs: 10,
    }
}

fn config(work: u32, rest: u32, rounds: u32, sets: u32, set_rest: u32) -> TimerConfig {
    TimerConfig {
        work_secs: work,
        rest_secs: rest,
        rounds,
        sets,
        set_rest_secs: set_rest,
    }
}

#[test]
fn headless_session_completes_via_runner_ticks() {
    let mut engine = TimerEngine::new(program(), config(2, 1, 2, 1, 10));
    engine.toggle();

    let (_tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, Duration::from_millis(1));

    let mut completed = false;
    for _ in 0..100u32 {
        if let AppEvent::Tick = runner.step() {
            if engine.tick().contains(&Cue::Complete) {
                completed = true;
                break;
            }
        }
    }

    assert!(completed, "session should reach the completion cue");
    assert_eq!(engine.phase(), Phase::Done);

    let summary = engine.summary();
    assert_eq!(summary.total_rounds, 2);
    // countdown excluded: 2 work phases + 1 rest
    assert_eq!(summary.elapsed_secs, 2 + 1 + 2);
}

#[test]
fn headless_pause_event_flow() {
    let mut engine = TimerEngine::new(program(), config(10, 5, 2, 1, 10));
    engine.toggle();
    for _ in 0..3 {
        engine.tick();
    }
    assert_eq!(engine.phase(), Phase::Work);

    let (tx, rx) = mpsc::channel();
    // Interleave ticks with a pause/resume pair, as the app loop would.
    tx.send(AppEvent::Tick).unwrap();
    tx.send(AppEvent::Tick).unwrap();
    tx.send(AppEvent::Key(crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Char(' '),
        crossterm::event::KeyModifiers::NONE,
    )))
    .unwrap();
    tx.send(AppEvent::Tick).unwrap();

    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, Duration::from_millis(1));

    for _ in 0..4 {
        match runner.step() {
            AppEvent::Tick => {
                engine.tick();
            }
            AppEvent::Key(_) => {
                engine.toggle();
            }
            AppEvent::Resize => {}
        }
    }

    // Two seconds elapsed, then pause froze the third.
    assert_eq!(engine.phase(), Phase::Paused);
    assert_eq!(engine.remaining(), 8);

    engine.toggle();
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(engine.remaining(), 8);
}

#[test]
fn headless_runner_times_out_into_ticks() {
    let (_tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, Duration::from_millis(1));

    assert!(matches!(runner.step(), AppEvent::Tick));
}
