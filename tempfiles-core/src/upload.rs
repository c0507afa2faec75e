use rand::Rng;
use tracing::{debug, info};

use crate::{
    ProgressAnimation, ProgressTick, SUBMIT_IDLE_LABEL, SUBMIT_UPLOADING_HTML, UiError,
    format_file_size, validate_file_size,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Error => "error",
            AlertKind::Success => "success",
        }
    }

    /// Full `class` attribute for the alert banner.
    pub fn class_name(self) -> String {
        format!("alert alert-{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn error(err: &UiError) -> Self {
        Self {
            kind: AlertKind::Error,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfoView {
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub width_css: String,
    pub label: String,
}

/// Everything the page needs to draw the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub file_info: Option<FileInfoView>,
    pub alert: Option<Alert>,
    pub upload_area_enabled: bool,
    pub submit_disabled: bool,
    pub submit_html: &'static str,
    pub progress: Option<ProgressView>,
}

#[derive(Debug, Clone)]
pub struct UploadController {
    selected: Option<SelectedFile>,
    alert: Option<Alert>,
    phase: UploadPhase,
    progress: ProgressAnimation,
    progress_visible: bool,
    /// Bumped whenever an upload starts or is abandoned; tick chains from an
    /// older generation must stop.
    generation: u64,
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadController {
    pub fn new() -> Self {
        Self {
            selected: None,
            alert: None,
            phase: UploadPhase::Idle,
            progress: ProgressAnimation::default(),
            progress_visible: false,
            generation: 0,
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn progress(&self) -> &ProgressAnimation {
        &self.progress
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stages a file picked from the input or dropped on the zone.
    ///
    /// An empty pick is ignored. An oversized file raises the alert and leaves
    /// any earlier selection staged.
    pub fn select_file(&mut self, file: Option<SelectedFile>) -> Result<(), UiError> {
        let Some(file) = file else {
            debug!("empty file selection ignored");
            return Ok(());
        };

        if let Err(err) = validate_file_size(file.size_bytes) {
            info!(name = %file.name, size = file.size_bytes, "file rejected: too large");
            self.alert = Some(Alert::error(&err));
            return Err(err);
        }

        debug!(name = %file.name, size = file.size_bytes, "file staged");
        self.selected = Some(file);
        self.alert = None;
        Ok(())
    }

    /// Gate for the native form submission.
    ///
    /// On `Ok` the caller lets the browser POST proceed; on `Err` it must
    /// cancel the submission. A repeat submit while uploading keeps the
    /// running animation.
    pub fn submit(&mut self) -> Result<&SelectedFile, UiError> {
        let Some(file) = self.selected.as_ref() else {
            let err = UiError::NoFileSelected;
            self.alert = Some(Alert::error(&err));
            return Err(err);
        };

        if self.phase == UploadPhase::Uploading {
            debug!(name = %file.name, "submit repeated while uploading");
            return Ok(file);
        }

        info!(name = %file.name, size = file.size_bytes, "upload submitted");
        self.phase = UploadPhase::Uploading;
        self.generation += 1;
        self.progress.start();
        self.progress_visible = true;
        Ok(file)
    }

    /// Advances the animation started in `generation`. Ticks from a
    /// superseded upload report `Finished` and change nothing.
    pub fn tick_progress<R: Rng + ?Sized>(
        &mut self,
        generation: u64,
        rng: &mut R,
    ) -> ProgressTick {
        if self.phase != UploadPhase::Uploading || generation != self.generation {
            return ProgressTick::Finished;
        }
        self.progress.tick(rng)
    }

    pub fn show_alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.alert = Some(Alert {
            kind,
            message: message.into(),
        });
    }

    pub fn hide_alert(&mut self) {
        self.alert = None;
    }

    /// Drops the staged file and hides its info panel.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    /// Leaves the uploading state: re-enables the drop zone and submit button
    /// and hides the progress bar.
    pub fn enable_upload_area(&mut self) {
        self.phase = UploadPhase::Idle;
        self.generation += 1;
        self.progress.stop();
        self.progress_visible = false;
    }

    pub fn view(&self) -> UploadView {
        let uploading = self.phase == UploadPhase::Uploading;
        UploadView {
            file_info: self.selected.as_ref().map(|file| FileInfoView {
                name: file.name.clone(),
                size_label: format_file_size(file.size_bytes),
            }),
            alert: self.alert.clone(),
            upload_area_enabled: !uploading,
            submit_disabled: uploading,
            submit_html: if uploading {
                SUBMIT_UPLOADING_HTML
            } else {
                SUBMIT_IDLE_LABEL
            },
            progress: self.progress_visible.then(|| ProgressView {
                width_css: self.progress.width_css(),
                label: self.progress.label(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_UPLOAD_BYTES;

    fn file(name: &str, size_bytes: u64) -> SelectedFile {
        SelectedFile {
            name: name.to_owned(),
            size_bytes,
        }
    }

    #[test]
    fn empty_pick_is_ignored() {
        let mut controller = UploadController::new();
        controller.select_file(None).unwrap();
        assert!(controller.selected().is_none());
        assert!(controller.alert().is_none());
    }

    #[test]
    fn oversized_pick_keeps_previous_selection() {
        let mut controller = UploadController::new();
        controller.select_file(Some(file("a.txt", 10))).unwrap();
        let err = controller
            .select_file(Some(file("huge.iso", MAX_UPLOAD_BYTES + 1)))
            .unwrap_err();

        assert!(matches!(err, UiError::FileTooLarge { .. }));
        assert_eq!(controller.selected().map(|f| f.name.as_str()), Some("a.txt"));
        assert_eq!(
            controller.alert().map(|a| a.message.as_str()),
            Some("File size exceeds 100MB limit")
        );
    }

    #[test]
    fn valid_pick_clears_alert() {
        let mut controller = UploadController::new();
        let _ = controller.submit();
        assert!(controller.alert().is_some());

        controller.select_file(Some(file("a.txt", 10))).unwrap();
        assert!(controller.alert().is_none());
    }

    #[test]
    fn enable_upload_area_returns_to_idle() {
        let mut controller = UploadController::new();
        controller.select_file(Some(file("a.txt", 10))).unwrap();
        controller.submit().unwrap();
        assert!(!controller.view().upload_area_enabled);

        controller.enable_upload_area();
        let view = controller.view();
        assert!(view.upload_area_enabled);
        assert!(!view.submit_disabled);
        assert_eq!(view.submit_html, SUBMIT_IDLE_LABEL);
        assert!(view.progress.is_none());
    }

    #[test]
    fn repeated_submit_keeps_progress() {
        let mut controller = UploadController::new();
        controller.select_file(Some(file("a.txt", 10))).unwrap();
        controller.submit().unwrap();
        controller.progress.advance(40.0);

        controller.submit().unwrap();
        assert_eq!(controller.progress().percent(), 40.0);
    }

    #[test]
    fn stale_tick_chain_stops_after_restart() {
        use rand::{SeedableRng, rngs::SmallRng};

        let mut rng = SmallRng::seed_from_u64(3);
        let mut controller = UploadController::new();
        controller.select_file(Some(file("a.txt", 10))).unwrap();
        controller.submit().unwrap();
        let abandoned = controller.generation();

        controller.enable_upload_area();
        controller.submit().unwrap();
        let current = controller.generation();
        assert_ne!(abandoned, current);

        assert_eq!(
            controller.tick_progress(abandoned, &mut rng),
            ProgressTick::Finished
        );
        assert_eq!(controller.progress().percent(), 0.0);
        assert!(controller.progress().is_running());

        assert_eq!(
            controller.tick_progress(current, &mut rng),
            ProgressTick::Continue
        );
    }

    #[test]
    fn reset_hides_file_info() {
        let mut controller = UploadController::new();
        controller.select_file(Some(file("a.txt", 10))).unwrap();
        controller.reset();
        assert!(controller.view().file_info.is_none());
    }

    #[test]
    fn alert_class_names() {
        assert_eq!(AlertKind::Error.class_name(), "alert alert-error");
        assert_eq!(AlertKind::Success.class_name(), "alert alert-success");
    }
}
