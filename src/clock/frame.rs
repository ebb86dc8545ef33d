use crate::clock::appearance::AppearanceState;
use crate::clock::render::render_at;
use crate::clock::surface::ClockSurface;
use anyhow::Result;
use chrono::Timelike;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Reallocated,
    Unchanged,
    /// The client area collapsed to nothing (e.g. minimized); the buffer was dropped.
    Cleared,
    /// Allocation failed; the previous buffer is kept and ticks skip until a
    /// matching buffer exists.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered,
    SkippedEmpty,
    SkippedNoBuffer,
    SkippedStale,
}

impl TickOutcome {
    pub fn is_rendered(self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// Owns the back buffer and keeps it in step with the client area.
#[derive(Debug)]
pub struct FrameSlot<B> {
    client: (i32, i32),
    buffer: Option<B>,
}

impl<B> Default for FrameSlot<B> {
    fn default() -> Self {
        Self {
            client: (0, 0),
            buffer: None,
        }
    }
}

impl<B: ClockSurface> FrameSlot<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_size(&self) -> (i32, i32) {
        self.client
    }

    pub fn buffer(&self) -> Option<&B> {
        self.buffer.as_ref()
    }

    /// Whether the held buffer exactly covers the client area.
    pub fn is_current(&self) -> bool {
        self.buffer
            .as_ref()
            .is_some_and(|buffer| buffer.size() == self.client)
    }

    pub fn resize<F>(&mut self, width: i32, height: i32, allocate: F) -> ResizeOutcome
    where
        F: FnOnce(i32, i32) -> Result<B>,
    {
        self.client = (width, height);
        if width <= 0 || height <= 0 {
            self.buffer = None;
            return ResizeOutcome::Cleared;
        }
        if self.is_current() {
            return ResizeOutcome::Unchanged;
        }

        match allocate(width, height) {
            Ok(buffer) => {
                // Assignment drops the previous buffer.
                self.buffer = Some(buffer);
                tracing::debug!(width, height, "frame buffer reallocated");
                ResizeOutcome::Reallocated
            }
            Err(err) => {
                tracing::warn!(?err, width, height, "frame buffer reallocation failed");
                ResizeOutcome::Failed
            }
        }
    }

    pub fn tick<T: Timelike>(&mut self, appearance: &AppearanceState, time: &T) -> TickOutcome {
        let (width, height) = self.client;
        if width <= 0 || height <= 0 {
            return TickOutcome::SkippedEmpty;
        }
        let client = self.client;
        let Some(buffer) = self.buffer.as_mut() else {
            return TickOutcome::SkippedNoBuffer;
        };
        if buffer.size() != client {
            tracing::trace!(?client, buffer = ?buffer.size(), "skipping tick on stale buffer");
            return TickOutcome::SkippedStale;
        }
        match render_at(buffer, appearance, time) {
            Some(_) => TickOutcome::Rendered,
            None => TickOutcome::SkippedEmpty,
        }
    }
}
