use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
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

use klack::{
    app::{App, Flow},
    config::{ConfigStore, FileConfigStore},
    logging,
    runtime::{setup_or_restore, CrosstermEventSource, FixedTicker, Runner},
    source::load_target_text,
    TICK_RATE_MS,
};

/// terminal typing trainer with live per-character highlighting
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the displayed text and watch every character turn green or red. Characters typed, errors made and accuracy are counted as you go; deleting never takes an error back."
)]
pub struct Cli {
    /// custom prompt to practice on
    #[clap(short = 'p', long, conflicts_with_all = ["file", "url"])]
    prompt: Option<String>,

    /// read the practice text from a plain text file
    #[clap(short = 'f', long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// fetch the practice text from an endpoint answering {"text": "..."}
    #[clap(short = 'u', long)]
    url: Option<String>,

    /// log at debug level
    #[clap(long)]
    debug: bool,

    /// store the text source and debug flag as defaults for later runs
    #[clap(long)]
    save_config: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = store
        .load()
        .merged(cli.file.clone(), cli.url.clone(), cli.debug);

    let log_path = logging::init(config.debug);
    log::info!("klack {} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &log_path {
        log::debug!("logging to {}", path.display());
    }

    if cli.save_config {
        store.save(&config)?;
        log::info!("saved config to {}", store.path().display());
    }

    // input handling only starts once the text is in place
    let source = config.text_source(cli.prompt.clone());
    let target_text = load_target_text(source.as_ref());
    let mut app = App::new(&target_text, source.label());

    enable_raw_mode()?;

    let mut terminal = setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        disable_raw_mode,
    )?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("terminal loop failed: {}", e);
    }
    log::info!("klack exiting");
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        if app.dirty {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            app.dirty = false;
        }

        if app.on_event(runner.step()) == Flow::Quit {
            break;
        }
    }

    Ok(())
}
