use crate::config::TimerConfig;

/// "MM:SS", minutes padded past 99 if a session somehow runs that long.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Rough whole-session length used on the home screen stat line.
pub fn estimate_total_secs(cfg: &TimerConfig) -> u32 {
    (cfg.work_secs + cfg.rest_secs) * cfg.rounds * cfg.sets
}

/// Whole-session completion by finished rounds, 0..=100.
pub fn progress_percent(round: u32, set: u32, cfg: &TimerConfig) -> u16 {
    let total = cfg.rounds * cfg.sets;
    if total == 0 {
        return 0;
    }
    let finished = (set.saturating_sub(1)) * cfg.rounds + round.saturating_sub(1);
    ((finished as f64 / total as f64) * 100.0).round() as u16
}
