use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Body attribute holding an `EnvFilter` directive, e.g. `data-log-level="debug"`.
pub const LOG_LEVEL_ATTR: &str = "data-log-level";

/// DOM hooks shared with the server-rendered templates.
///
/// The upload size ceiling is deliberately absent: it is fixed in
/// `tempfiles_core::MAX_UPLOAD_BYTES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub file_input_id: &'static str,
    pub upload_area_id: &'static str,
    pub upload_form_id: &'static str,
    pub progress_container_selector: &'static str,
    pub progress_fill_selector: &'static str,
    pub progress_text_selector: &'static str,
    pub file_info_selector: &'static str,
    pub file_name_selector: &'static str,
    pub file_size_selector: &'static str,
    pub alert_selector: &'static str,
    pub submit_button_selector: &'static str,
    pub theme_toggle_class: &'static str,
    pub copy_button_class: &'static str,
    pub dragover_class: &'static str,
    pub expiry_selector: &'static str,
    pub expiry_attr: &'static str,
    pub countdown_selector: &'static str,
    pub log_filter: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            file_input_id: "fileInput",
            upload_area_id: "uploadArea",
            upload_form_id: "uploadForm",
            progress_container_selector: ".progress-container",
            progress_fill_selector: ".progress-fill",
            progress_text_selector: ".progress-text",
            file_info_selector: ".file-info",
            file_name_selector: ".file-name",
            file_size_selector: ".file-size",
            alert_selector: ".alert",
            submit_button_selector: "button[type=\"submit\"]",
            theme_toggle_class: "theme-toggle",
            copy_button_class: "copy-btn",
            dragover_class: "dragover",
            expiry_selector: "[data-expiry]",
            expiry_attr: "data-expiry",
            countdown_selector: ".countdown-time",
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl PageConfig {
    pub fn with_log_level(mut self, attr: Option<&str>) -> Self {
        self.log_filter = log_filter_from_attr(attr);
        self
    }

    pub fn theme_toggle_selector(&self) -> String {
        format!(".{}", self.theme_toggle_class)
    }
}

/// Accepts any valid `EnvFilter` directive; blank or invalid input yields the default.
pub fn log_filter_from_attr(attr: Option<&str>) -> String {
    let Some(raw) = attr.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return DEFAULT_LOG_FILTER.to_owned();
    };

    match EnvFilter::try_new(raw) {
        Ok(_) => raw.to_owned(),
        Err(_) => DEFAULT_LOG_FILTER.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_level_uses_default() {
        assert_eq!(log_filter_from_attr(None), "info");
        assert_eq!(log_filter_from_attr(Some("   ")), "info");
    }

    #[test]
    fn directives_pass_through() {
        assert_eq!(log_filter_from_attr(Some(" debug ")), "debug");
        assert_eq!(
            log_filter_from_attr(Some("tempfiles_core=trace,warn")),
            "tempfiles_core=trace,warn"
        );
    }

    #[test]
    fn invalid_directive_falls_back() {
        assert_eq!(log_filter_from_attr(Some("tempfiles_core=loud")), "info");
    }

    #[test]
    fn defaults_match_server_markup() {
        let config = PageConfig::default().with_log_level(Some("warn"));
        assert_eq!(config.file_input_id, "fileInput");
        assert_eq!(config.theme_toggle_selector(), ".theme-toggle");
        assert_eq!(config.log_filter, "warn");
    }
}
