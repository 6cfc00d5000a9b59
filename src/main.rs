//! schemascribe binary
//!
//! No subcommand (or `tui`) starts the terminal UI; every other subcommand
//! runs once and exits with 0 (success), 1 (failure) or 2 (validation).

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use crossterm::{
    event::{poll, read, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use schemascribe::cli::{exit_code, load_context, parse_args, run_command, Command, Context};
use schemascribe::credentials::{Credentials, FileStore, StoreBackend};
use schemascribe::diagram::Renderer;
use schemascribe::export::ClipboardBackend;
use schemascribe::logging::init_logging;
use schemascribe::ui::{handlers, map_key, App, Services};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    let ctx = match load_context(&args) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code(&e));
        }
    };

    let guard = match init_logging(&ctx.paths.log_dir(), &ctx.config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };
    info!(home = %ctx.paths.home().display(), "schemascribe starting");

    match args.command() {
        Command::Tui => run_tui(&ctx),
        command => {
            if let Err(e) = run_command(command, &ctx).await {
                eprintln!("Error: {}", e);
                drop(guard);
                std::process::exit(exit_code(&e));
            }
            Ok(())
        }
    }
}

fn run_tui(ctx: &Context) -> anyhow::Result<()> {
    let credentials = Credentials::new(StoreBackend::File(FileStore::new(ctx.paths.store_file())));
    let services = Services {
        client: Arc::new(ctx.client()),
        renderer: Arc::new(Renderer::MermaidCli(ctx.renderer())),
        clipboard: ClipboardBackend::default(),
        settings: ctx.config.model_settings(),
        output_dir: ctx.config.export.output_dir.clone(),
    };
    let mut app = App::new(credentials, services).context("failed to start the UI")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    while !app.should_quit() {
        schemascribe::ui::render(terminal, app)?;

        if poll(POLL_INTERVAL)? {
            if let Event::Key(key) = read()? {
                if key.kind == KeyEventKind::Press {
                    let action = map_key(key, app.focus, app.notification().is_some());
                    handlers::execute_action(app, action);
                }
            }
        }

        // Results from spawned tasks; the next render shows them
        app.process_events();
        app.tick(Instant::now());
    }
    Ok(())
}
