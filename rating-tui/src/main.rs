//! rating-tui - Terminal star rating widget
//!
//! Pick 1-5 stars and submit them to the configured backend.

use std::path::PathBuf;

use clap::Parser;
use libratingbox::config::SubmitterConfig;
use libratingbox::logging::LoggingConfig;
use libratingbox::{Config, RatingBox};
use rating_tui::{
    app::App,
    error::Result,
    event::{EventHandler, TuiEvent},
    map_key,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};

#[derive(Parser, Debug)]
#[command(name = "rating-tui")]
#[command(about = "Rate with stars and submit from the terminal", long_about = None)]
struct Cli {
    /// Config file (defaults to $RATINGBOX_CONFIG or the XDG config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Submit to this HTTP endpoint instead of the configured submitter
    #[arg(short, long, env = "RATINGBOX_ENDPOINT")]
    endpoint: Option<String>,

    /// Use a mock submitter that always fails with this reason
    #[arg(long, conflicts_with = "endpoint")]
    mock_fail: Option<String>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging (with --log-file)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // stderr would draw over the alternate screen, so only log to a file
    if let Some(path) = &cli.log_file {
        let logging = LoggingConfig {
            verbose: cli.verbose,
            ..LoggingConfig::from_env()
        };
        logging.with_log_file(path).init()?;
    }

    let config = load_config(&cli)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let rating_box = RatingBox::from_config(&config)?.with_runtime(runtime.handle().clone());
    let mut app = App::new(rating_box);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(terminal)?;

    result
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_default()?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.submitter = SubmitterConfig::Http {
            endpoint: endpoint.clone(),
            timeout_secs: 10,
        };
    } else if let Some(reason) = &cli.mock_fail {
        config.submitter = SubmitterConfig::Mock {
            delay_ms: 500,
            fail_with: Some(reason.clone()),
        };
    }

    Ok(config)
}

fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let event_handler = EventHandler::new(app.config.tick_rate_ms);

    loop {
        app.tick();

        terminal.draw(|frame| ui::render(frame, app))?;

        if let TuiEvent::Key(key) = event_handler.next()? {
            if let Some(input) = map_key(key) {
                app.handle(input);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
