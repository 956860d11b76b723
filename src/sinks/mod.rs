//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;

pub use memory::MemoryBuffer;

pub use crate::core::{Sink, SinkId};
