mod animation;
mod app;
mod bookings;
mod calendar;
mod data;
mod help;
mod logging;
mod screen;
mod theme;
mod toggle;
use crate::app::App;
use crate::data::DAYS;
use crate::logging::{init_logging, LogLevel};
use anyhow::Context;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        expanded: bool,
        log_dir: Option<PathBuf>,
        log_level: LogLevel,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut expanded = false;
        let mut log_dir = None;
        let mut log_level = LogLevel::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('e') | Arg::Long("expanded") => expanded = true,
                Arg::Long("log-dir") => log_dir = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-level") => log_level = parser.value()?.parse()?,
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            expanded,
            log_dir,
            log_level,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                expanded,
                log_dir,
                log_level,
            } => {
                // Held until the calendar exits so that buffered records get
                // flushed
                let _logger = log_dir
                    .map(|dir| init_logging(log_level, &dir))
                    .transpose()?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(&DAYS, expanded, Instant::now()).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: bookcal [<options>]");
                println!();
                println!("Terminal month calendar with hover-driven meeting badges and a bookings panel");
                println!();
                println!("Options:");
                println!("  -e, --expanded        Start with the bookings panel open");
                println!("  --log-dir <DIR>       Write a log file in the given directory");
                println!("  --log-level <LEVEL>   Set the log level: trace, debug, info [default],");
                println!("                        warn, or error");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    // Hovering needs mouse motion reports, and leaving the window should
    // clear the hover
    let r = execute!(std::io::stdout(), EnableMouseCapture, EnableFocusChange)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture, DisableFocusChange) {
        log::warn!("event=disable_mouse_capture_failed error={e}");
    }
    ratatui::restore();
    r
}
