use notify_rust::{Notification, Timeout, Urgency};
use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::engine::{Cue, TimerEngine};

/// One tone of a chime: pitch, length, and start offset from the first
/// tone. Pitch is part of the pattern data even though the terminal
/// player can only reproduce the rhythm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tone {
    pub freq_hz: u16,
    pub duration_ms: u64,
    pub at_ms: u64,
}

const fn tone(freq_hz: u16, duration_ms: u64, at_ms: u64) -> Tone {
    Tone {
        freq_hz,
        duration_ms,
        at_ms,
    }
}

pub const WORK_CHIME: &[Tone] = &[tone(880, 150, 0), tone(1100, 200, 180)];
pub const REST_CHIME: &[Tone] = &[tone(660, 200, 0)];
pub const TICK_CHIME: &[Tone] = &[tone(440, 100, 0)];
pub const COMPLETE_CHIME: &[Tone] = &[
    tone(523, 150, 0),
    tone(659, 150, 200),
    tone(784, 150, 400),
    tone(1047, 300, 600),
];

/// Alternating vibrate/pause milliseconds, one pattern per transition kind.
pub const WORK_BUZZ: &[u64] = &[200, 100, 300];
pub const REST_BUZZ: &[u64] = &[150, 80, 150];
pub const SET_REST_BUZZ: &[u64] = &[300, 150, 300];
pub const COMPLETE_BUZZ: &[u64] = &[200, 100, 200, 100, 400];

pub fn chime_for(cue: Cue) -> &'static [Tone] {
    match cue {
        Cue::WorkStart => WORK_CHIME,
        Cue::RestStart | Cue::SetRestStart => REST_CHIME,
        // The same short tick serves the pre-start countdown and the
        // last-three-seconds warning.
        Cue::CountdownTick | Cue::Warning => TICK_CHIME,
        Cue::Complete => COMPLETE_CHIME,
    }
}

pub fn vibration_for(cue: Cue) -> Option<&'static [u64]> {
    match cue {
        Cue::WorkStart => Some(WORK_BUZZ),
        Cue::RestStart => Some(REST_BUZZ),
        Cue::SetRestStart => Some(SET_REST_BUZZ),
        Cue::Complete => Some(COMPLETE_BUZZ),
        Cue::CountdownTick | Cue::Warning => None,
    }
}

/// Desktop notification payload. The tag collapses repeats of the same
/// phase-category into one showing notification instead of stacking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationSpec {
    pub title: String,
    pub body: String,
    pub tag: &'static str,
}

impl NotificationSpec {
    fn tag_id(&self) -> u32 {
        match self.tag {
            "work" => 1,
            "rest" => 2,
            "set-rest" => 3,
            _ => 4,
        }
    }
}

/// Payload for phase-entry cues; countdown and warning ticks stay silent.
pub fn notification_for(cue: Cue, engine: &TimerEngine) -> Option<NotificationSpec> {
    let cfg = engine.config();
    match cue {
        Cue::WorkStart => Some(NotificationSpec {
            title: "Work!".to_string(),
            body: format!(
                "Round {}/{} · Set {}/{}",
                engine.round(),
                cfg.rounds,
                engine.set(),
                cfg.sets
            ),
            tag: "work",
        }),
        Cue::RestStart => Some(NotificationSpec {
            title: "Rest".to_string(),
            body: format!("{}s rest", cfg.rest_secs),
            tag: "rest",
        }),
        Cue::SetRestStart => Some(NotificationSpec {
            title: "Set break".to_string(),
            body: format!("Set {} done, {}s rest", engine.set(), cfg.set_rest_secs),
            tag: "set-rest",
        }),
        Cue::Complete => Some(NotificationSpec {
            title: "Workout complete!".to_string(),
            body: format!("{} finished. Nice work!", engine.program().name),
            tag: "complete",
        }),
        Cue::CountdownTick | Cue::Warning => None,
    }
}

pub trait ChimePlayer {
    fn play(&self, chime: &'static [Tone]);
}

/// Rings the terminal bell once per tone, spaced by the chime's offsets,
/// on a detached thread so the event loop never blocks on a sound.
pub struct TerminalBell;

impl ChimePlayer for TerminalBell {
    fn play(&self, chime: &'static [Tone]) {
        thread::spawn(move || {
            let mut out = std::io::stdout();
            let mut elapsed = 0u64;
            for t in chime {
                if t.at_ms > elapsed {
                    thread::sleep(Duration::from_millis(t.at_ms - elapsed));
                    elapsed = t.at_ms;
                }
                let _ = out.write_all(b"\x07");
                let _ = out.flush();
            }
        });
    }
}

/// `--mute`.
pub struct Silent;

impl ChimePlayer for Silent {
    fn play(&self, _chime: &'static [Tone]) {}
}

pub trait Haptics {
    fn vibrate(&self, pattern: &[u64]);
}

/// Desktops have no vibration motor; the pattern is dropped silently.
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&self, _pattern: &[u64]) {}
}

/// Fans one cue out to chime, haptics, and notification. Every channel is
/// best-effort and independent of the others.
pub struct Signaler {
    chimes: Box<dyn ChimePlayer>,
    haptics: Box<dyn Haptics>,
    notifications: bool,
}

impl Signaler {
    pub fn new(mute: bool) -> Self {
        let chimes: Box<dyn ChimePlayer> = if mute {
            Box::new(Silent)
        } else {
            Box::new(TerminalBell)
        };
        Self {
            chimes,
            haptics: Box::new(NoHaptics),
            notifications: true,
        }
    }

    /// Used by headless tests to keep desktop daemons out of the loop.
    pub fn without_notifications(mut self) -> Self {
        self.notifications = false;
        self
    }

    pub fn dispatch(&self, cue: Cue, engine: &TimerEngine) {
        self.chimes.play(chime_for(cue));
        if let Some(pattern) = vibration_for(cue) {
            self.haptics.vibrate(pattern);
        }
        if self.notifications {
            if let Some(spec) = notification_for(cue, engine) {
                send_notification(&spec);
            }
        }
    }
}

fn send_notification(spec: &NotificationSpec) {
    let _ = Notification::new()
        .summary(&spec.title)
        .body(&spec.body)
        .appname("rondo")
        .icon("alarm-clock")
        .id(spec.tag_id())
        .urgency(Urgency::Normal)
        .timeout(Timeout::Milliseconds(4000))
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimerConfig;
    use crate::program::Program;

    fn engine() -> TimerEngine {
        let program = Program {
            id: "kb".to_string(),
            name: "Kettlebell".to_string(),
            icon: "*".to_string(),
            subtitle: "s".to_string(),
            work_secs: 30,
            rest_secs: 30,
            rounds: 10,
            sets: 3,
            set_rest_secs: 60,
        };
        let config = TimerConfig {
            work_secs: 30,
            rest_secs: 20,
            rounds: 10,
            sets: 3,
            set_rest_secs: 60,
        };
        TimerEngine::new(program, config)
    }

    #[test]
    fn each_transition_kind_has_a_distinct_chime() {
        assert_ne!(chime_for(Cue::WorkStart), chime_for(Cue::RestStart));
        assert_ne!(chime_for(Cue::WorkStart), chime_for(Cue::Complete));
        assert_eq!(chime_for(Cue::CountdownTick), chime_for(Cue::Warning));
    }

    #[test]
    fn chime_offsets_are_monotonic() {
        for chime in [WORK_CHIME, REST_CHIME, TICK_CHIME, COMPLETE_CHIME] {
            let mut last = 0;
            for t in chime {
                assert!(t.at_ms >= last);
                last = t.at_ms;
                assert!(t.duration_ms > 0);
            }
        }
    }

    #[test]
    fn vibration_patterns_alternate_vibrate_and_pause() {
        for pattern in [WORK_BUZZ, REST_BUZZ, SET_REST_BUZZ, COMPLETE_BUZZ] {
            // Patterns start and end on a vibrate pulse.
            assert_eq!(pattern.len() % 2, 1);
            assert!(pattern.iter().all(|&ms| ms > 0));
        }
    }

    #[test]
    fn ticks_do_not_vibrate_or_notify() {
        let e = engine();
        assert!(vibration_for(Cue::CountdownTick).is_none());
        assert!(vibration_for(Cue::Warning).is_none());
        assert!(notification_for(Cue::CountdownTick, &e).is_none());
        assert!(notification_for(Cue::Warning, &e).is_none());
    }

    #[test]
    fn work_notification_interpolates_round_and_set() {
        let e = engine();
        let spec = notification_for(Cue::WorkStart, &e).unwrap();
        assert_eq!(spec.title, "Work!");
        assert_eq!(spec.body, "Round 1/10 · Set 1/3");
        assert_eq!(spec.tag, "work");
    }

    #[test]
    fn rest_notification_names_the_configured_duration() {
        let e = engine();
        let spec = notification_for(Cue::RestStart, &e).unwrap();
        assert_eq!(spec.body, "20s rest");
        assert_eq!(spec.tag, "rest");
    }

    #[test]
    fn set_rest_notification_names_the_finished_set() {
        let e = engine();
        let spec = notification_for(Cue::SetRestStart, &e).unwrap();
        assert_eq!(spec.title, "Set break");
        assert_eq!(spec.body, "Set 1 done, 60s rest");
        assert_eq!(spec.tag, "set-rest");
    }

    #[test]
    fn complete_notification_names_the_program() {
        let e = engine();
        let spec = notification_for(Cue::Complete, &e).unwrap();
        assert_eq!(spec.body, "Kettlebell finished. Nice work!");
        assert_eq!(spec.tag, "complete");
    }

    #[test]
    fn tags_map_to_stable_ids() {
        let e = engine();
        let work = notification_for(Cue::WorkStart, &e).unwrap();
        let rest = notification_for(Cue::RestStart, &e).unwrap();
        assert_ne!(work.tag_id(), rest.tag_id());
        assert_eq!(work.tag_id(), notification_for(Cue::WorkStart, &e).unwrap().tag_id());
    }

    #[test]
    fn silent_player_and_no_haptics_absorb_everything() {
        Silent.play(WORK_CHIME);
        NoHaptics.vibrate(WORK_BUZZ);
    }
}
