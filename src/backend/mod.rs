mod link;
mod noop;
mod traits;

pub use link::{LinkBackend, SurfaceLink};
pub use noop::NoOpBackendPlugin;
pub use traits::{AttachmentAnchors, LandingBackend};
