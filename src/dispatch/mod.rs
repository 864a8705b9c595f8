//! Bridges store notifications to full-frame rendering.

mod dispatcher;
mod surface;

pub use dispatcher::RenderDispatcher;
pub use surface::{MemorySurface, Surface, WriterSurface};
