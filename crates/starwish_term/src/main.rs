//! starwish-term - the greeting widget in a terminal
//!
//! Prints the holiday countdown once per second and turns each line typed on
//! stdin into a wish. A sent wish launches the confetti run, rendered as
//! sparkle lines.
//!
//! Config lookup:
//! - `--config <path>` if given
//! - otherwise `<config dir>/starwish/config.json` if it exists
//! - otherwise built-in defaults

use std::path::Path;
use std::time::Duration;

use starwish::clock::HostClock;
use starwish::prng::Prng;
use starwish::{GreetingWidget, WidgetConfig};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod args;
mod error;
mod paths;
mod session;

use error::TermError;
use paths::AppPaths;
use session::{read_wishes, Session};

const FRAME_MS: u64 = 50;

fn load_config(path: &Path) -> Result<WidgetConfig, TermError> {
    let raw = std::fs::read_to_string(path)?;
    WidgetConfig::from_json(&raw).map_err(|source| TermError::Config {
        path: path.display().to_string(),
        source,
    })
}

fn resolve_config(explicit: Option<&Path>) -> Result<WidgetConfig, TermError> {
    if let Some(path) = explicit {
        let cfg = load_config(path)?;
        info!("Loaded config from {}", path.display());
        return Ok(cfg);
    }
    let Some(paths) = AppPaths::new() else {
        warn!("Could not determine config directory; using defaults");
        return Ok(WidgetConfig::default());
    };
    let path = paths.config_file();
    if !path.exists() {
        return Ok(WidgetConfig::default());
    }
    match load_config(&path) {
        Ok(cfg) => {
            info!("Loaded config from {}", path.display());
            Ok(cfg)
        }
        Err(e) => {
            warn!("Ignoring {}: {}", path.display(), e);
            Ok(WidgetConfig::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; the widget owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = args::parse(std::env::args().skip(1))?;
    if opts.help {
        args::print_help();
        return Ok(());
    }

    let config = resolve_config(opts.config.as_deref())?;
    let clock = HostClock::new();
    let seed = opts
        .seed
        .unwrap_or_else(|| clock.local_now().timestamp_micros() as u64);

    let widget = GreetingWidget::mount(config, Prng::new(seed), clock.now_ms(), &clock.local_now());
    let mut session = Session::new(widget);
    for line in session.banner() {
        println!("{line}");
    }

    let (tx, mut rx) = mpsc::channel::<String>(16);
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = read_wishes(stdin, tx).await {
            error!("stdin read failed: {}", e);
        }
    });

    let mut frame = tokio::time::interval(Duration::from_millis(FRAME_MS));
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = frame.tick() => {
                for line in session.frame(clock.now_ms(), &clock.local_now()) {
                    println!("{line}");
                }
                // Piped input: leave once the last wish has been celebrated.
                if !stdin_open && !session.widget().is_sent() {
                    break;
                }
            }
            line = rx.recv(), if stdin_open => match line {
                Some(line) => {
                    for out in session.handle_line(&line, clock.now_ms(), &clock.local_now()) {
                        println!("{out}");
                    }
                }
                None => {
                    info!("stdin closed");
                    stdin_open = false;
                }
            },
            _ = &mut ctrl_c => {
                info!("Ctrl-C received");
                break;
            }
        }
    }

    session.shutdown();
    Ok(())
}
