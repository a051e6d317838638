use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use blueshell::constants::CHROME_HEIGHT;
use blueshell::event_loop::{ConsoleDriver, InputDriver};
use blueshell::media::FsMediaStore;
use blueshell::runner::{Runner, run_shell};
use blueshell::shell::Shell;
use blueshell::speech::OrbVoice;
use blueshell::window::Viewport;

#[derive(Debug, Parser)]
#[command(name = "blueshell", about, version)]
struct Cli {
    /// Directory for the media store and persisted preferences.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Input poll interval in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Disable terminal mouse capture (keyboard-only session).
    #[arg(long)]
    no_mouse: bool,
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".blueshell")
}

fn main() -> io::Result<()> {
    blueshell::tracing_sub::init_default();
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let store = FsMediaStore::open(&data_dir).map_err(io::Error::other)?;

    // The real viewport is read from the terminal once the runner starts.
    let shell = Shell::new(Viewport::new(80, 24, CHROME_HEIGHT), store, OrbVoice::new());
    let mut runner = Runner::new(shell);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let mut driver = ConsoleDriver::new();
    if !cli.no_mouse {
        driver.set_mouse_capture(true)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_shell(
        &mut terminal,
        &mut driver,
        &mut runner,
        Duration::from_millis(cli.tick_ms),
    );

    terminal::disable_raw_mode()?;
    if !cli.no_mouse {
        driver.set_mouse_capture(false)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor().map_err(io::Error::other)?;

    result
}
