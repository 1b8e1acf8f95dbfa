pub mod ui;

use chrono::{DateTime, Local};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use rondo::{
    app_dirs::AppDirs,
    cache::{AssetCache, BundledAssets},
    celebration::Celebration,
    config::{ConfigStore, FileConfigStore, SavedConfigs, SettingsEditor},
    engine::{Phase, SessionSummary, TimerEngine},
    program::{Program, ProgramCatalog},
    runtime::{self, AppEvent, CrosstermEventSource, Runner, SecondGate},
    signal::Signaler,
    util,
};

/// workout interval timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A workout interval timer that cycles you through work, rest, and set-rest phases for a chosen program, with per-program settings and transition cues."
)]
pub struct Cli {
    /// jump straight into a program's timer
    #[clap(short = 'p', long, value_enum)]
    program: Option<ProgramArg>,

    /// disable audio cues
    #[clap(long)]
    mute: bool,

    /// alternate config file location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// alternate asset cache directory
    #[clap(long)]
    cache_dir: Option<PathBuf>,

    /// print the program catalog and exit
    #[clap(long)]
    list: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum ProgramArg {
    Kettlebell,
    Interval,
    F45,
}

impl ProgramArg {
    fn id(&self) -> &'static str {
        match self {
            ProgramArg::Kettlebell => "kettlebell",
            ProgramArg::Interval => "interval",
            ProgramArg::F45 => "f45",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Timer,
    Settings,
    Complete,
}

pub struct App {
    pub catalog: ProgramCatalog,
    pub store: FileConfigStore,
    pub configs: SavedConfigs,
    pub state: AppState,
    pub selected: usize,
    pub engine: Option<TimerEngine>,
    pub editor: Option<SettingsEditor>,
    pub celebration: Celebration,
    pub summary: Option<SessionSummary>,
    pub finished_at: Option<DateTime<Local>>,
    pub banner: String,
    pub help: String,
    pub show_help: bool,
    signaler: Signaler,
    second_gate: SecondGate,
}

impl App {
    pub fn new(
        catalog: ProgramCatalog,
        store: FileConfigStore,
        banner: String,
        help: String,
        signaler: Signaler,
    ) -> Self {
        let configs = store.load();
        Self {
            catalog,
            store,
            configs,
            state: AppState::Home,
            selected: 0,
            engine: None,
            editor: None,
            celebration: Celebration::default(),
            summary: None,
            finished_at: None,
            banner,
            help,
            show_help: false,
            signaler,
            second_gate: SecondGate::default(),
        }
    }

    pub fn select_next(&mut self) {
        if !self.catalog.is_empty() {
            self.selected = (self.selected + 1) % self.catalog.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.catalog.is_empty() {
            self.selected = (self.selected + self.catalog.len() - 1) % self.catalog.len();
        }
    }

    /// Build a fresh idle session for `program` and show the timer screen.
    pub fn open_program(&mut self, program: Program) {
        let config = self.configs.config_for(&program);
        self.engine = Some(TimerEngine::new(program, config));
        self.editor = None;
        self.summary = None;
        self.finished_at = None;
        self.celebration = Celebration::default();
        self.second_gate.reset();
        self.state = AppState::Timer;
    }

    pub fn open_selected(&mut self) {
        if let Some(program) = self.catalog.get(self.selected).cloned() {
            self.open_program(program);
        }
    }

    pub fn open_by_id(&mut self, id: &str) {
        if let Some(idx) = self
            .catalog
            .programs()
            .iter()
            .position(|p| p.id == id)
        {
            self.selected = idx;
            self.open_selected();
        }
    }

    /// Drop any session and return to program selection.
    pub fn go_home(&mut self) {
        self.engine = None;
        self.editor = None;
        self.celebration = Celebration::default();
        self.state = AppState::Home;
    }

    pub fn toggle_timer(&mut self) {
        self.second_gate.reset();
        let cues = match self.engine.as_mut() {
            Some(engine) => engine.toggle(),
            None => return,
        };
        if let Some(engine) = self.engine.as_ref() {
            for cue in cues {
                self.signaler.dispatch(cue, engine);
            }
        }
    }

    pub fn reset_timer(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.reset();
        }
        self.second_gate.reset();
    }

    pub fn open_settings(&mut self) {
        if let Some(engine) = self.engine.as_ref() {
            self.editor = Some(SettingsEditor::new(*engine.config()));
            self.state = AppState::Settings;
        }
    }

    /// Commit the draft wholesale, persist, and rebuild the session idle
    /// from the new configuration.
    pub fn save_settings(&mut self) {
        let (Some(editor), Some(engine)) = (self.editor.take(), self.engine.as_ref()) else {
            return;
        };
        let program = engine.program().clone();
        self.configs.insert(&program.id, editor.draft);
        // Persistence is best-effort; the new values still apply in-memory.
        let _ = self.store.save(&self.configs);
        self.open_program(program);
    }

    pub fn cancel_settings(&mut self) {
        self.editor = None;
        self.state = AppState::Timer;
    }

    /// One 100ms UI tick. Engine seconds are derived by counting, so the
    /// scheduling primitive never leaks into transition logic.
    pub fn on_tick(&mut self, width: u16, height: u16) {
        self.celebration.update();

        let ticking = self.engine.as_ref().map(|e| e.is_ticking()).unwrap_or(false);
        if !ticking {
            return;
        }
        if !self.second_gate.advance() {
            return;
        }

        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let cues = engine.tick();
        let done = engine.phase() == Phase::Done;
        if done {
            self.summary = Some(engine.summary());
            self.finished_at = Some(Local::now());
        }
        if let Some(engine) = self.engine.as_ref() {
            for cue in cues {
                self.signaler.dispatch(cue, engine);
            }
        }
        if done {
            self.state = AppState::Complete;
            self.celebration.start(width, height);
        }
    }

    /// Returns true when the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        if key.code == KeyCode::Char('?') {
            self.show_help = !self.show_help;
            return false;
        }
        if self.show_help {
            // Any other key dismisses the overlay.
            self.show_help = false;
            return false;
        }
        if key.code == KeyCode::Char('q') {
            return true;
        }

        match self.state {
            AppState::Home => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Enter => self.open_selected(),
                KeyCode::Esc => return true,
                _ => {}
            },
            AppState::Timer => match key.code {
                KeyCode::Char(' ') => self.toggle_timer(),
                KeyCode::Char('r') => self.reset_timer(),
                KeyCode::Char('s') => self.open_settings(),
                KeyCode::Esc => self.go_home(),
                _ => {}
            },
            AppState::Settings => match key.code {
                KeyCode::Up => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.prev_field();
                    }
                }
                KeyCode::Down => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.next_field();
                    }
                }
                KeyCode::Left => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.adjust(-1);
                    }
                }
                KeyCode::Right => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.adjust(1);
                    }
                }
                KeyCode::Enter => self.save_settings(),
                KeyCode::Esc => self.cancel_settings(),
                _ => {}
            },
            AppState::Complete => match key.code {
                KeyCode::Char('r') => {
                    if let Some(program) = self.engine.as_ref().map(|e| e.program().clone()) {
                        self.open_program(program);
                    }
                }
                KeyCode::Enter | KeyCode::Esc => self.go_home(),
                _ => {}
            },
        }
        false
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let cache_root = cli
        .cache_dir
        .clone()
        .or_else(AppDirs::cache_root)
        .unwrap_or_else(|| PathBuf::from(".rondo-cache"));
    let cache = AssetCache::new(&cache_root);
    let source = BundledAssets;
    // A failed install leaves reads falling through to the bundled source.
    let _ = cache.install(&source);
    let _ = cache.activate();

    let catalog = ProgramCatalog::load(&cache, &source)?;

    if cli.list {
        let store = cli
            .config
            .clone()
            .map(FileConfigStore::with_path)
            .unwrap_or_default();
        print_catalog(&catalog, &store.load());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli
        .config
        .clone()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let banner = String::from_utf8_lossy(&cache.fetch("banner.txt", &source)?).into_owned();
    let help = String::from_utf8_lossy(&cache.fetch("help.txt", &source)?).into_owned();

    let mut app = App::new(catalog, store, banner, help, Signaler::new(cli.mute));
    if let Some(arg) = cli.program {
        app.open_by_id(arg.id());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn print_catalog(catalog: &ProgramCatalog, configs: &SavedConfigs) {
    for program in catalog.programs() {
        let cfg = configs.config_for(program);
        println!(
            "{:<12} {:<12} {}s work / {}s rest, {} rounds x {} sets, ~{}m",
            program.id,
            program.name,
            cfg.work_secs,
            cfg.rest_secs,
            cfg.rounds,
            cfg.sets,
            util::estimate_total_secs(&cfg) / 60
        );
    }
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(runtime::UI_TICK_MS),
    );

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            AppEvent::Tick => {
                let size = terminal.size().unwrap_or_default();
                app.on_tick(size.width, size.height);
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
