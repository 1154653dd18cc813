mod app;
mod config;
mod event;
mod games;
mod ui;

use std::fs::File;
use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use simplelog::{ConfigBuilder, WriteLogger};

use calmcade::AppError;

use app::App;
use config::Config;
use event::{Event, EventHandler};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode owns the terminal, so logs only go to a file when one is given.
fn setup_logging(config: &Config) -> Result<(), AppError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.display().to_string(),
        source,
    })?;
    WriteLogger::init(
        config.log_level,
        ConfigBuilder::new().set_target_level(log::LevelFilter::Error).build(),
        file,
    )?;
    Ok(())
}

/// Run `restore` when `result` is an error, then pass the result through.
fn or_restore<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn setup_terminal() -> Result<Tui, AppError> {
    enable_raw_mode()?;
    let setup = || -> io::Result<Tui> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(terminal)
    };
    // Hand the shell back in cooked mode before reporting.
    let terminal = or_restore(setup(), || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        if let Err(err) = disable_raw_mode() {
            log::error!("could not leave raw mode: {}", err);
        }
    })?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<(), AppError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(terminal: &mut Tui, app: &mut App, config: &Config) -> Result<(), AppError> {
    let events = EventHandler::new(config.frame_rate);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Tick => {}
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
        }
        // Timers are polled on every event so steady typing cannot starve them.
        app.on_tick();
    }
    Ok(())
}

fn main() -> Result<(), AppError> {
    let config = Config::from_args();
    setup_logging(&config)?;

    let mut app = App::new(&config)?;
    let mut terminal = setup_terminal()?;

    let result = run(&mut terminal, &mut app, &config);
    // Restore even when the loop failed, then report the first error.
    let restored = restore_terminal(&mut terminal);
    if let Err(err) = &result {
        log::error!("exiting on error: {}", err);
    }
    log::info!("bye");
    result.and(restored)
}
