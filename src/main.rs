use std::fs::File;
use std::sync::{Arc, Mutex};

use speedread::app::{App, AppEvent};
use speedread::engine::Config;
use speedread::transform::CommandTransformer;
use speedread::ui::{Theme, TuiManager};

fn init_logging(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(config.log_path())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_logging(&config)?;
    tracing::info!(wpm = config.timing.wpm, "speedread starting");

    let transformer = CommandTransformer::from_config(&config.transform);
    if !transformer.is_configured() {
        tracing::info!("no transform command configured");
    }
    let theme = Theme::from_config(&config.theme);
    let mut app = App::new(config, Arc::new(transformer));

    // an optional path argument is opened straight into the reader
    if let Some(path) = std::env::args().nth(1) {
        app.handle_event(AppEvent::LoadFile(path));
    }

    let mut tui = TuiManager::new(theme)?;
    tui.run_event_loop(&mut app)?;

    Ok(())
}
