//! Frame-driven animation: a time-ordered sequence of texture handles.
//!
//! Animations are advanced by the external game loop's monotonically
//! increasing millisecond tick counter, carried in the per-frame context.

use crate::api::types::TextureHandle;

#[derive(Debug, Clone, Copy)]
struct AnimationFrame {
    handle: TextureHandle,
    /// How long this frame stays active, in milliseconds.
    duration: u32,
}

/// A looping or one-shot sequence of (texture, duration) frames.
///
/// Each frame's duration is measured from the tick at which it became
/// active; the reference resets on every advance. At most one frame advances
/// per `update` call.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<AnimationFrame>,
    current: usize,
    /// Tick at which the current frame became active. `None` re-bases the
    /// clock at the next update (set by `reset`).
    frame_begin: Option<u64>,
    looping: bool,
    playing: bool,
}

impl Animation {
    /// Create an empty, looping, playing animation. The first frame measures
    /// its duration from tick zero.
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(4),
            current: 0,
            frame_begin: Some(0),
            looping: true,
            playing: true,
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Append a frame. The first frame added becomes the active one.
    pub fn add_frame(&mut self, handle: TextureHandle, duration_ms: u32) {
        self.frames.push(AnimationFrame {
            handle,
            duration: duration_ms,
        });
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Handle of the currently active frame; `INVALID` while no frames
    /// exist.
    pub fn current_texture(&self) -> TextureHandle {
        self.frames
            .get(self.current)
            .map(|f| f.handle)
            .unwrap_or(TextureHandle::INVALID)
    }

    /// Freeze playback on the current frame.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Return to frame 0 and resume playing. The frame clock re-bases at the
    /// next observed tick.
    pub fn reset(&mut self) {
        self.current = 0;
        self.frame_begin = None;
        self.playing = true;
    }

    /// Advance based on `ticks`, the owner's monotonic millisecond counter.
    ///
    /// No-op while the current frame has been active for strictly less than
    /// its duration. Otherwise the next frame becomes active and the clock
    /// reference moves to `ticks`. Running past the final frame wraps when
    /// looping, and otherwise freezes on it and stops playback.
    pub fn update(&mut self, ticks: u64) {
        if !self.playing || self.frames.is_empty() {
            return;
        }

        let begin = *self.frame_begin.get_or_insert(ticks);
        let duration = u64::from(self.frames[self.current].duration);
        if ticks.saturating_sub(begin) < duration {
            return;
        }

        if self.current + 1 >= self.frames.len() {
            if self.looping {
                self.current = 0;
            } else {
                self.playing = false;
                return;
            }
        } else {
            self.current += 1;
        }
        self.frame_begin = Some(ticks);
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}
