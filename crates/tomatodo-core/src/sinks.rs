//! Collaborator interfaces for rendering and sound.
//!
//! These are the only I/O boundaries the core calls through. They are write
//! only -- the core never reads anything back from a sink.

use crate::error::AlarmError;
use crate::ledger::{CompletedTodo, TodoItem};
use crate::session::ColorToken;

pub trait RenderSink {
    fn phase_label(&mut self, label: &str, color: ColorToken);
    /// Zero-padded `mm:ss`.
    fn countdown(&mut self, mmss: &str);
    fn checkmarks(&mut self, count: u32);
    fn todo_list(&mut self, pending: &[TodoItem], completed: &[CompletedTodo]);
    /// Non-fatal collaborator failure (e.g. alarm playback). Ignored unless
    /// the sink overrides it.
    fn warning(&mut self, _message: &str) {}
}

pub trait AlarmSink {
    /// Fire-and-forget; a failure here must never block phase advancement.
    fn play(&mut self) -> Result<(), AlarmError>;
}

/// Render sink that discards everything.
#[derive(Debug, Default)]
pub struct NoopRender;

impl RenderSink for NoopRender {
    fn phase_label(&mut self, _label: &str, _color: ColorToken) {}
    fn countdown(&mut self, _mmss: &str) {}
    fn checkmarks(&mut self, _count: u32) {}
    fn todo_list(&mut self, _pending: &[TodoItem], _completed: &[CompletedTodo]) {}
}

/// Alarm sink that plays nothing.
#[derive(Debug, Default)]
pub struct NoopAlarm;

impl AlarmSink for NoopAlarm {
    fn play(&mut self) -> Result<(), AlarmError> {
        Ok(())
    }
}
