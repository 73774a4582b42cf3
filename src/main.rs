mod ui;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{debug, info};
use typeclock::{
    config::{Config, ConfigStore, FileConfigStore, TestDuration},
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    samples::SamplePool,
    session::{Phase, Session},
    TICK_RATE_MS,
};

/// timed typing speed trainer with live wpm, cpm, accuracy and error counts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed typing test for the terminal. The clock starts on the first keystroke and live words-per-minute, characters-per-minute, accuracy and error counts update as you type."
)]
pub struct Cli {
    /// test duration in seconds
    #[clap(short = 'd', long, value_enum)]
    duration: Option<TestDuration>,

    /// custom text to type instead of the built-in samples
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// config file to read (defaults to the platform config directory)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// append logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// raise log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

/// Settings after merging the CLI over the config file
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub duration: TestDuration,
    pub pool: SamplePool,
    pub log_file: Option<PathBuf>,
}

impl RuntimeSettings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let pool = match &cli.prompt {
            Some(prompt) => SamplePool::single(prompt.clone()),
            None => SamplePool::new(config.samples),
        };

        Self {
            duration: cli.duration.unwrap_or(config.duration),
            pool,
            log_file: cli
                .log_file
                .clone()
                .or(config.log_file)
                .or_else(|| (cli.verbose > 0).then(logging::default_log_path)),
        }
    }
}

/// Owns the live session and its lifecycle
#[derive(Debug)]
pub struct App {
    pub settings: RuntimeSettings,
    pub session: Session,
}

impl App {
    pub fn new(settings: RuntimeSettings) -> Self {
        let reference = settings.pool.pick_random().to_owned();
        let session = Session::new(reference, settings.duration.as_duration());
        Self { settings, session }
    }

    /// Fresh session with a newly picked reference text
    pub fn reset(&mut self) {
        let reference = self.settings.pool.pick_random().to_owned();
        self.session
            .reset(reference, self.settings.duration.as_duration());
    }

    pub fn cycle_duration(&mut self) -> bool {
        if self.session.phase() != Phase::Idle {
            return false;
        }
        self.settings.duration = self.settings.duration.next();
        self.session
            .select_duration(self.settings.duration.as_duration())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> Control {
    if key.kind == KeyEventKind::Release {
        return Control::Continue;
    }

    // ctrl+c to quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Control::Quit;
    }

    match (app.session.phase(), key.code) {
        (_, KeyCode::Esc) => app.reset(),
        (Phase::Finished, KeyCode::Char('r') | KeyCode::Enter) => app.reset(),
        (Phase::Finished, KeyCode::Char('q')) => return Control::Quit,
        (Phase::Finished, _) => {}
        (Phase::Idle, KeyCode::Enter) => app.session.start_at(now),
        (Phase::Idle, KeyCode::Tab) => {
            app.cycle_duration();
        }
        (_, KeyCode::Backspace) => {
            app.session.backspace_at(now);
        }
        (_, KeyCode::Char(c))
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.session.push_char_at(c, now);
        }
        _ => {}
    }

    Control::Continue
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = match store.load() {
        Ok(config) => config,
        Err(e) => Cli::command().error(ErrorKind::InvalidValue, e).exit(),
    };

    let settings = RuntimeSettings::resolve(&cli, config);
    if let Err(e) = logging::init_logging(cli.verbose, settings.log_file.as_deref()) {
        Cli::command().error(ErrorKind::Io, e).exit();
    }
    info!(
        duration = %settings.duration,
        samples = settings.pool.len(),
        config = %store.path().display(),
        "starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                if app.session.on_tick() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Key(key) => {
                if handle_key(app, key, Instant::now()) == Control::Quit {
                    debug!("quit requested");
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
