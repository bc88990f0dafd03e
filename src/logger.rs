use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;
use std::path::Path;

const LOG_FILE: &str = "cascade_sim.log";

/// Installs the global logger. Call once, from the binary, before anything logs.
///
/// The level comes from `RUST_LOG` (e.g. `RUST_LOG=debug` for one line per trial) and
/// defaults to `info`. Records always go to stderr; with `log_dir` set they are also
/// appended to `<log_dir>/cascade_sim.log`.
pub fn init(log_dir: Option<&Path>) {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_level_filter = log_level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console_config = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = Dispatch::new().level(log_level_filter).chain(console_config);

    let mut log_file_path = None;
    if let Some(dir) = log_dir {
        let path = dir.join(LOG_FILE);
        match fs::create_dir_all(dir).and_then(|_| fern::log_file(&path)) {
            Ok(file) => {
                let file_config = Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {} {}] {}",
                            Local::now().format("%Y-%m-%d %H:%M:%S"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file);
                dispatch = dispatch.chain(file_config);
                log_file_path = Some(path);
            }
            Err(e) => eprintln!("Failed to open log file '{}': {}", path.display(), e),
        }
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to apply logger configuration: {}", e);
        return;
    }

    match log_file_path {
        Some(path) => log::info!("Logger initialized. Logging to console and '{}'.", path.display()),
        None => log::info!("Logger initialized. Logging to console."),
    }
}
