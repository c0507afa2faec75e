use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::{
    config::DEFAULT_LOG_FILTER,
    console::{ConsoleMethod, console_method},
};

/// Routes formatted tracing lines to the browser console, one call per event.
#[derive(Clone, Copy, Default)]
struct ConsoleMakeWriter;

struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }

        let line = String::from_utf8_lossy(&self.buf);
        let value = JsValue::from_str(line.trim_end());
        match console_method(&self.level) {
            ConsoleMethod::Error => console::error_1(&value),
            ConsoleMethod::Warn => console::warn_1(&value),
            ConsoleMethod::Log => console::log_1(&value),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

pub fn init_logging(filter: &str) {
    let env_filter =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // wasm32-unknown-unknown has no system clock behind std::time.
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .try_init();

    if let Err(err) = result {
        console::warn_1(&JsValue::from_str(&format!(
            "tempfiles: logging already initialised: {err}"
        )));
    }
}
