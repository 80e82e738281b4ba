//! Foundation utilities shared by every engine subsystem
//!
//! Math types, handle collections, logging, and timing. Nothing in here
//! knows about the scene graph.

pub mod collections;
pub mod logging;
pub mod math;
pub mod time;
