use crate::api::{ProgressCallback, ProgressEvent};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

pub(crate) const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {msg} [{wide_bar}] {pos}/{len} ({eta})";

pub(crate) struct ProgressBarBuilder {
    style_template: &'static str,
    message: String,
    spinner: bool,
    enable_tick: bool,
}

impl ProgressBarBuilder {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            style_template: "{spinner:.green} {msg}",
            message: message.into(),
            spinner: true,
            enable_tick: false,
        }
    }

    pub(crate) fn with_template(mut self, template: &'static str) -> Self {
        self.style_template = template;
        self
    }

    pub(crate) fn with_progress_bar(mut self) -> Self {
        self.spinner = false;
        self
    }

    pub(crate) fn with_tick(mut self) -> Self {
        self.enable_tick = true;
        self
    }

    pub(crate) fn build(self) -> Result<ProgressBar> {
        let pb = if self.spinner {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::new(0)
        };

        pb.set_style(ProgressStyle::default_spinner().template(self.style_template)?);
        pb.set_message(self.message);

        if self.enable_tick {
            pb.enable_steady_tick(Duration::from_millis(200));
        }

        Ok(pb)
    }
}

/// Drives `pb` from library progress events.
pub(crate) fn progress_callback(pb: &ProgressBar) -> ProgressCallback {
    let pb = pb.clone();
    Arc::new(move |event: ProgressEvent| match event {
        ProgressEvent::Started { task, total } => {
            pb.set_length(total);
            pb.set_position(0);
            pb.set_message(task);
        }
        ProgressEvent::Progress { current, total, .. } => {
            pb.set_length(total);
            pb.set_position(current);
        }
        ProgressEvent::Message { message, .. } => pb.set_message(message),
        ProgressEvent::Completed { task } => pb.finish_with_message(format!("{} done", task)),
    })
}
