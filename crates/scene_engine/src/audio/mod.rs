//! Narrow interface to the external audio backend
//!
//! Sounds are loaded and mixed elsewhere; the core stores opaque handles
//! and issues play/stop requests through an [`AudioSink`].

use crate::foundation::collections::TypedHandle;

/// Marker for sound handles
pub struct SoundAsset;

/// Opaque handle to a sound owned by the external audio layer
pub type SoundHandle = TypedHandle<SoundAsset>;

/// The surface the scene graph needs from an audio backend
pub trait AudioSink {
    /// Request playback of a sound
    fn play(&mut self, sound: SoundHandle);

    /// Stop a playing sound; unknown handles are ignored
    fn stop(&mut self, sound: SoundHandle);
}

/// Audio sink that discards every request
///
/// Default for headless hosts and tests.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: SoundHandle) {}

    fn stop(&mut self, _sound: SoundHandle) {}
}
