use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use tracing::info;

use srmon::action::Action;
use srmon::app::App;
use srmon::config::{Config, load_config, load_config_from_path};
use srmon::event::{Event, EventHandler};
use srmon::logging;
use srmon::ui;
use srmon::ui::header::WINDOW_TITLE;

#[derive(Parser)]
#[command(
    name = "srmon",
    version,
    about = "Terminal dashboard for system resource metrics"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Collector program polled once per refresh for JSON metrics
    #[arg(long)]
    collector: Option<String>,

    /// Argument passed to the collector (repeatable)
    #[arg(long = "collector-arg", allow_hyphen_values = true)]
    collector_args: Vec<String>,

    /// Theme: midnight, nord
    #[arg(long)]
    theme: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `srmon=trace`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli);
    let config = load_config_for_cli(&cli);
    info!(version = env!("CARGO_PKG_VERSION"), "starting srmon");

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture, SetTitle(WINDOW_TITLE))?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(app.refresh_rate.duration());
    app.start_collector(events.collector_sender());

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    true
                } else {
                    false
                }
            }
            Event::Mouse(mouse) => {
                let action = app.map_mouse(mouse);
                let handled = action != Action::None;
                app.dispatch(action);
                handled
            }
            Event::Tick => {
                app.on_tick();
                true
            }
            Event::Resize => true,
            Event::Collector(message) => app.apply_collector_message(message),
        };

        if let Some(rate) = app.take_tick_rate_change() {
            events.set_tick_rate(rate);
        }
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    app.shutdown();
    Ok(())
}

/// Logging is best effort: a missing cache dir or unwritable file only
/// costs the log.
fn init_logging(cli: &Cli) {
    let Some(path) = cli.log_file.clone().or_else(logging::default_log_path) else {
        eprintln!("srmon: no cache directory, logging disabled");
        return;
    };
    if let Err(err) = logging::init(&path, cli.log_level.as_deref()) {
        eprintln!("srmon: logging disabled: {err}");
    }
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref program) = cli.collector {
        config.collector.command = Some(program.clone());
    }
    if !cli.collector_args.is_empty() {
        config.collector.args = cli.collector_args.clone();
    }
    if let Some(ref theme) = cli.theme {
        config.general.theme = theme.clone();
    }
    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }

    config
}
