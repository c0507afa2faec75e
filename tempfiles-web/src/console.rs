use tracing::Level;

/// Browser console method a log line is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Log,
}

pub fn console_method(level: &Level) -> ConsoleMethod {
    match *level {
        Level::ERROR => ConsoleMethod::Error,
        Level::WARN => ConsoleMethod::Warn,
        _ => ConsoleMethod::Log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_warn_goes_to_log() {
        assert_eq!(console_method(&Level::ERROR), ConsoleMethod::Error);
        assert_eq!(console_method(&Level::WARN), ConsoleMethod::Warn);
        for level in [Level::INFO, Level::DEBUG, Level::TRACE] {
            assert_eq!(console_method(&level), ConsoleMethod::Log, "{level}");
        }
    }
}
