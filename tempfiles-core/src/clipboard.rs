use crate::COPY_CONFIRMATION_LABEL;

/// Temporary label swap on a copy button.
///
/// `pending_original` is the label stashed by a confirmation that is still on
/// screen. It wins over `current_label`, which at that point reads the
/// confirmation text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    original_label: String,
}

impl CopyFeedback {
    pub fn begin(current_label: &str, pending_original: Option<&str>) -> Self {
        let original_label = pending_original.unwrap_or(current_label).to_owned();
        Self { original_label }
    }

    pub fn confirmation_label(&self) -> &'static str {
        COPY_CONFIRMATION_LABEL
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }
}

/// Copy payload from a button's `data-text`.
///
/// Only a missing attribute skips the copy; `data-text=""` copies an empty string.
pub fn copy_payload(data_text: Option<String>) -> Option<String> {
    data_text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_click_remembers_label() {
        let feedback = CopyFeedback::begin("📋 Copy", None);
        assert_eq!(feedback.original_label(), "📋 Copy");
        assert_eq!(feedback.confirmation_label(), "✅ Copied!");
    }

    #[test]
    fn repeat_click_keeps_first_label() {
        let feedback = CopyFeedback::begin(COPY_CONFIRMATION_LABEL, Some("📋 Copy"));
        assert_eq!(feedback.original_label(), "📋 Copy");
    }

    #[test]
    fn only_missing_payload_is_skipped() {
        assert_eq!(copy_payload(None), None);
        assert_eq!(copy_payload(Some(String::new())).as_deref(), Some(""));
        assert_eq!(
            copy_payload(Some("https://example.test/f/abc".to_owned())).as_deref(),
            Some("https://example.test/f/abc")
        );
    }
}
