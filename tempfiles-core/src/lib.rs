use thiserror::Error;

pub mod clipboard;
pub mod countdown;
pub mod progress;
pub mod theme;
pub mod upload;

pub use clipboard::{CopyFeedback, copy_payload};
pub use countdown::{CountdownState, CountdownTimer, ExpiryTimestamp, format_remaining};
pub use progress::{ProgressAnimation, ProgressTick};
pub use theme::{MemoryStore, PreferenceStore, ThemeController, ThemePreference, ThemeView};
pub use upload::{
    Alert, AlertKind, FileInfoView, ProgressView, SelectedFile, UploadController, UploadPhase,
    UploadView,
};

/// Upload ceiling enforced before the form is allowed to submit.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;
pub const THEME_STORAGE_KEY: &str = "tempfiles-theme";
pub const PROGRESS_TICK_MS: u32 = 100;
pub const PROGRESS_MAX_STEP: f64 = 15.0;
pub const COUNTDOWN_TICK_MS: u32 = 1_000;
pub const COPY_FEEDBACK_MS: u32 = 2_000;
pub const COPY_CONFIRMATION_LABEL: &str = "✅ Copied!";
pub const EXPIRED_MESSAGE: &str = "File has expired";
pub const SUBMIT_IDLE_LABEL: &str = "🚀 Upload File";
pub const SUBMIT_UPLOADING_HTML: &str = "<span class=\"spinner\"></span> Uploading...";

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// User-facing failures. The `Display` text is what the alert banner shows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UiError {
    #[error("File size exceeds 100MB limit")]
    FileTooLarge { size: u64, max: u64 },
    #[error("Please select a file first")]
    NoFileSelected,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("preference write rejected: {0}")]
    WriteRejected(String),
}

/// Renders a byte count with binary-prefix units and at most two decimals.
///
/// Trailing zeros are dropped, so `1024` renders as `1 KB` and `1536` as `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_owned();
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    // Half-up, like the page's `toFixed(2)`; `{:.2}` alone rounds ties to even.
    let value = (bytes as f64 / divisor as f64 * 100.0).round() / 100.0;
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

pub fn validate_file_size(size: u64) -> Result<(), UiError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UiError::FileTooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1), "1 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_500_000), "1.43 MB");
        assert_eq!(format_file_size(MAX_UPLOAD_BYTES), "100 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn exact_halves_round_up() {
        let labels: Vec<String> = [1152, 1408, 1664, 1920, 2176, 2688]
            .into_iter()
            .map(format_file_size)
            .collect();
        assert_eq!(
            labels,
            ["1.13 KB", "1.38 KB", "1.63 KB", "1.88 KB", "2.13 KB", "2.63 KB"]
        );
    }

    #[test]
    fn terabytes_stay_in_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn ceiling_is_inclusive() {
        validate_file_size(MAX_UPLOAD_BYTES).unwrap();
        let err = validate_file_size(MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 100MB limit");
    }
}
