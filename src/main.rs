use sockview::adapters::SocketIoTransport;
use sockview::app::App;
use sockview::cli::{parse_args, run_cli_command};
use sockview::session::SessionController;
use sockview::startup::{default_log_dir, load_config, ServerConfig};
use sockview::terminal::{setup_panic_hook, TerminalManager};
use sockview::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tracing::{info, warn};

/// Redraw interval when nothing else happens.
const TICK: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let overrides = match run_cli_command(parse_args(std::env::args())) {
        Ok(overrides) => overrides,
        Err(code) => std::process::exit(code),
    };
    let log_dir = default_log_dir();
    let config = overrides.apply(load_config(log_dir.as_deref()));

    setup_panic_hook();
    run(config).await
}

async fn run(config: ServerConfig) -> Result<()> {
    info!("Initializing Socket.IO connection to {}", config.endpoint_url());

    let (transport, mut transport_events) = SocketIoTransport::connect(config.clone());
    let mut session = SessionController::new();
    session.initialize(Box::new(transport))?;
    let mut app = App::new(session, &config);

    let mut term_manager = TerminalManager::new()?;
    let mut input = EventStream::new();
    let mut tick = tokio::time::interval(TICK);

    while !app.should_quit {
        term_manager.terminal().draw(|frame| ui::render(frame, &app))?;

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Terminal input error: {}", e);
                    app.should_quit = true;
                }
                None => app.should_quit = true,
            },
            Some(event) = transport_events.recv() => app.handle_transport_event(event),
            _ = tick.tick() => {}
        }
    }

    app.shutdown();
    term_manager.restore()?;
    info!("Exited cleanly");
    Ok(())
}
