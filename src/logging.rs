//! Logging backend which writes to a file from a background thread.

use std::{
    fs::File,
    io::Write,
    path::Path,
    sync::{mpsc, Mutex},
};

use chrono::Local;
use eyre::{eyre, Result, WrapErr};
use log::{Level, LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;

#[derive(Debug)]
struct Message {
    module: String,
    level: Level,
    string: String,
    time: String,
}

impl Message {
    fn from_record(record: &Record) -> Message {
        let module = record
            .module_path()
            .and_then(|path| path.split("::").last())
            .unwrap_or("unknown")
            .to_string();

        Message {
            module,
            level: record.level(),
            string: format!("{}", record.args()),
            time: Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        }
    }

    /// Formats the message as a single log line.
    ///      [date time] [module] [level] Text
    fn line(&self) -> String {
        let level_name = match self.level {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug | Level::Trace => "debug",
        };

        format!(
            "[{}] [{}] [{}] {}\n",
            self.time, self.module, level_name, self.string
        )
    }
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Logging must never take the game down, so a dead writer just drops messages.
        if let Some(sender) = MSG_SENDER.get() {
            if let Ok(sender) = sender.lock() {
                let _ = sender.send(Message::from_record(record));
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: Logger = Logger;
static MSG_SENDER: OnceCell<Mutex<mpsc::Sender<Message>>> = OnceCell::new();

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("Panic: {info}\n{backtrace}");

        default_hook(info);
    }));
}

/// Starts logging to `path` at the given level. Only the first call succeeds.
pub fn init(path: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    if MSG_SENDER.get().is_some() {
        return Err(eyre!("logging is already initialised"));
    }

    let path = path.as_ref();
    let mut file =
        File::create(path).wrap_err_with(|| format!("creating log file {}", path.display()))?;

    // The sender is only stored once we own the global logger, so a failed attempt leaves
    // nothing behind.
    log::set_logger(&LOGGER).map_err(|err| eyre!("could not install logger: {err}"))?;

    let (sender, receiver) = mpsc::channel::<Message>();

    MSG_SENDER
        .set(Mutex::new(sender))
        .map_err(|_| eyre!("logging is already initialised"))?;

    log::set_max_level(level);

    install_panic_hook();

    // Writing happens on a separate thread so that game code never waits on the disk.
    std::thread::spawn(move || {
        for message in receiver {
            let _ = file.write_all(message.line().as_bytes());
        }
    });

    log::info!("Logging to {} at level {level}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_use_short_module_names() {
        let line = Message::from_record(
            &Record::builder()
                .args(format_args!("hello"))
                .level(Level::Warn)
                .module_path(Some("costume_framework::costumes::resolve"))
                .build(),
        )
        .line();

        assert!(line.ends_with("[resolve] [warning] hello\n"), "{line}");
    }

    #[test]
    fn missing_module_is_unknown() {
        let line = Message::from_record(
            &Record::builder()
                .args(format_args!("x"))
                .level(Level::Trace)
                .build(),
        )
        .line();

        assert!(line.contains("[unknown] [debug]"), "{line}");
    }
}
