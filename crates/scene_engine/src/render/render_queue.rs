//! Submit-only render queue
//!
//! Collects draw requests for one frame. Components submit during the scene
//! walk; the host drains once per frame after `Scene::update` returns.

use super::RenderCommand;

/// Per-frame queue of draw requests
#[derive(Debug, Default)]
pub struct RenderQueue {
    commands: Vec<RenderCommand>,
}

impl RenderQueue {
    /// Create an empty render queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a draw request for this frame
    pub fn submit(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Commands submitted so far this frame, in submission order
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Take all commands out of the queue, leaving it empty for the next frame
    pub fn drain(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if nothing has been submitted this frame
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Discard all queued commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
