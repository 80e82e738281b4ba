//! External collaborator bundle
//!
//! The scene graph owns no global state. Everything components may talk to
//! outside the tree — renderer queue, physics backend, audio backend — is
//! bundled here and threaded explicitly through `Scene::update` and into
//! every component hook.

use crate::audio::{AudioSink, NullAudio};
use crate::physics::{KinematicWorld, PhysicsWorld};
use crate::render::RenderQueue;

/// Subsystem handles passed into the frame walk
pub struct EngineServices {
    /// Draw-request queue drained by the host each frame
    pub render_queue: RenderQueue,

    /// Physics backend
    pub physics: Box<dyn PhysicsWorld>,

    /// Audio backend
    pub audio: Box<dyn AudioSink>,
}

impl EngineServices {
    /// Create services with the bookkeeping physics world and no audio
    pub fn new() -> Self {
        Self {
            render_queue: RenderQueue::new(),
            physics: Box::new(KinematicWorld::new()),
            audio: Box::new(NullAudio),
        }
    }

    /// Replace the physics backend
    #[must_use]
    pub fn with_physics(mut self, physics: Box<dyn PhysicsWorld>) -> Self {
        self.physics = physics;
        self
    }

    /// Replace the audio backend
    #[must_use]
    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }
}

impl Default for EngineServices {
    fn default() -> Self {
        Self::new()
    }
}
