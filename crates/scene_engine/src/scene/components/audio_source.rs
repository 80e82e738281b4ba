//! Audio playback component

use crate::audio::SoundHandle;
use crate::impl_component;
use crate::scene::{Component, UpdateContext};

/// Issues playback requests for an externally resolved sound
///
/// The sound handle comes from the external audio layer; host code injects
/// it after construction. With `play_on_init` set the sound starts the
/// moment the component attaches. Playback stops when the owner is reaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioSourceComponent {
    sound: Option<SoundHandle>,
    play_on_init: bool,
}

impl AudioSourceComponent {
    /// Create a source that plays `sound` as soon as it attaches
    pub fn playing(sound: SoundHandle) -> Self {
        Self {
            sound: Some(sound),
            play_on_init: true,
        }
    }

    /// Create a silent source holding `sound` for later playback
    pub fn holding(sound: SoundHandle) -> Self {
        Self {
            sound: Some(sound),
            play_on_init: false,
        }
    }

    /// Set the sound handle
    pub fn set_sound(&mut self, sound: SoundHandle) {
        self.sound = Some(sound);
    }

    /// Request playback now
    pub fn play(&self, ctx: &mut UpdateContext<'_>) {
        if let Some(sound) = self.sound {
            ctx.services.audio.play(sound);
        }
    }
}

impl Component for AudioSourceComponent {
    impl_component!(AudioSourceComponent);

    fn init(&mut self, ctx: &mut UpdateContext<'_>) {
        if self.play_on_init {
            self.play(ctx);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut UpdateContext<'_>) {}

    fn on_destroy(&mut self, ctx: &mut UpdateContext<'_>) {
        if let Some(sound) = self.sound {
            ctx.services.audio.stop(sound);
        }
    }
}
