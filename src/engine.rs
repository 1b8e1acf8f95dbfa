use crate::config::TimerConfig;
use crate::program::Program;

/// Seconds of 3-2-1 lead-in before the first work phase.
pub const COUNTDOWN_SECS: u32 = 3;

/// Remaining-seconds threshold below which the warning cue fires.
const WARNING_WINDOW: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Countdown,
    Work,
    Rest,
    SetRest,
    Paused,
    Done,
}

/// Signal emitted by the state machine for the app to dispatch.
/// The engine never touches audio, haptics, or notifications itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    CountdownTick,
    WorkStart,
    RestStart,
    SetRestStart,
    Warning,
    Complete,
}

/// Aggregate totals shown on the completion screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    /// Seconds actually ticked in work/rest/set-rest phases.
    pub elapsed_secs: u32,
    pub total_rounds: u32,
    pub sets: u32,
    /// Configured work time across the whole session.
    pub work_secs: u32,
}

/// One workout session: program snapshot, configuration snapshot, and the
/// phase state machine advanced by `tick()`. Created on program selection,
/// discarded on navigating home or saving new settings.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    program: Program,
    config: TimerConfig,
    phase: Phase,
    paused_from: Option<Phase>,
    round: u32,
    set: u32,
    remaining: u32,
    total: u32,
    countdown: u32,
    elapsed: u32,
}

impl TimerEngine {
    pub fn new(program: Program, config: TimerConfig) -> Self {
        let work = config.work_secs;
        Self {
            program,
            config,
            phase: Phase::Idle,
            paused_from: None,
            round: 1,
            set: 1,
            remaining: work,
            total: work,
            countdown: 0,
            elapsed: 0,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Phase a pause would resume into; the phase itself while counting.
    /// Drives badge/ring coloring on the timer screen.
    pub fn visible_phase(&self) -> Phase {
        match self.phase {
            Phase::Paused => self.paused_from.unwrap_or(Phase::Work),
            p => p,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn set(&self) -> u32 {
        self.set
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// True while a tick source should be driving this engine.
    pub fn is_ticking(&self) -> bool {
        matches!(
            self.phase,
            Phase::Countdown | Phase::Work | Phase::Rest | Phase::SetRest
        )
    }

    /// Play/pause control. Starts the countdown from idle, pauses any
    /// counting phase, resumes the remembered phase from paused.
    pub fn toggle(&mut self) -> Vec<Cue> {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Countdown;
                self.countdown = COUNTDOWN_SECS;
                // First beep lands as soon as "3" is shown.
                vec![Cue::CountdownTick]
            }
            Phase::Work | Phase::Rest | Phase::SetRest => {
                self.paused_from = Some(self.phase);
                self.phase = Phase::Paused;
                Vec::new()
            }
            Phase::Paused => {
                self.phase = self.paused_from.take().unwrap_or(Phase::Work);
                Vec::new()
            }
            Phase::Countdown | Phase::Done => Vec::new(),
        }
    }

    /// Advance the session by one second. Idle, paused, and done sessions
    /// ignore ticks entirely; the countdown and the main phases are never
    /// counting at the same time.
    pub fn tick(&mut self) -> Vec<Cue> {
        let mut cues = Vec::new();
        match self.phase {
            Phase::Countdown => {
                self.countdown = self.countdown.saturating_sub(1);
                if self.countdown == 0 {
                    self.enter_work(&mut cues);
                } else {
                    cues.push(Cue::CountdownTick);
                }
            }
            Phase::Work | Phase::Rest | Phase::SetRest => {
                self.remaining = self.remaining.saturating_sub(1);
                self.elapsed += 1;
                if self.remaining == 0 {
                    self.advance(&mut cues);
                } else if self.remaining <= WARNING_WINDOW {
                    cues.push(Cue::Warning);
                }
            }
            Phase::Idle | Phase::Paused | Phase::Done => {}
        }
        cues
    }

    /// Back to idle with indices and durations recomputed from the config.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.paused_from = None;
        self.round = 1;
        self.set = 1;
        self.remaining = self.config.work_secs;
        self.total = self.config.work_secs;
        self.countdown = 0;
        self.elapsed = 0;
    }

    /// The last-round/last-set check happens here, only at the moment work
    /// time reaches zero.
    fn advance(&mut self, cues: &mut Vec<Cue>) {
        match self.phase {
            Phase::Work => {
                if self.round >= self.config.rounds && self.set >= self.config.sets {
                    self.phase = Phase::Done;
                    cues.push(Cue::Complete);
                } else if self.round >= self.config.rounds {
                    self.phase = Phase::SetRest;
                    self.remaining = self.config.set_rest_secs;
                    self.total = self.config.set_rest_secs;
                    cues.push(Cue::SetRestStart);
                } else {
                    self.phase = Phase::Rest;
                    self.remaining = self.config.rest_secs;
                    self.total = self.config.rest_secs;
                    cues.push(Cue::RestStart);
                }
            }
            Phase::Rest => {
                self.round += 1;
                self.enter_work(cues);
            }
            Phase::SetRest => {
                self.set += 1;
                self.round = 1;
                self.enter_work(cues);
            }
            _ => {}
        }
    }

    fn enter_work(&mut self, cues: &mut Vec<Cue>) {
        self.phase = Phase::Work;
        self.remaining = self.config.work_secs;
        self.total = self.config.work_secs;
        cues.push(Cue::WorkStart);
    }

    /// Fraction of the whole session completed, by rounds.
    pub fn progress(&self) -> f64 {
        let total_rounds = (self.config.rounds * self.config.sets) as f64;
        if total_rounds == 0.0 {
            return 0.0;
        }
        let finished = ((self.set - 1) * self.config.rounds + (self.round - 1)) as f64;
        match self.phase {
            Phase::Done => 1.0,
            _ => finished / total_rounds,
        }
    }

    /// Fraction of the current phase elapsed, for the gauge ring.
    pub fn phase_progress(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.total - self.remaining) as f64 / self.total as f64
    }

    pub fn summary(&self) -> SessionSummary {
        let total_rounds = self.config.rounds * self.config.sets;
        SessionSummary {
            elapsed_secs: self.elapsed,
            total_rounds,
            sets: self.config.sets,
            work_secs: self.config.work_secs * total_rounds,
        }
    }
}
