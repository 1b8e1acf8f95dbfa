use ratatui::Frame;

use crate::{App, AppState};

/// A UI screen boundary: one renderer per app state.
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        crate::ui::render_home(app, f);
    }
}

pub struct TimerScreen;

impl Screen for TimerScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        crate::ui::render_timer(app, f);
    }
}

pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        crate::ui::settings::render_settings(app, f);
    }
}

pub struct CompleteScreen;

impl Screen for CompleteScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        crate::ui::complete::render_complete(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Home => Box::new(HomeScreen),
        AppState::Timer => Box::new(TimerScreen),
        AppState::Settings => Box::new(SettingsScreen),
        AppState::Complete => Box::new(CompleteScreen),
    }
}
