use crate::error::GanttResult;
use crate::render::{GanttFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_bar_count: usize,
    pub last_arrow_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &GanttFrame) -> GanttResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_bar_count = frame.bars.len();
        self.last_arrow_count = frame.arrows.len();
        Ok(())
    }
}
