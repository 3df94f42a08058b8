pub mod camera;
pub mod frame;
pub mod interaction;
pub mod picking;
pub mod viewpoint;

pub use camera::{OrbitCamera, OrbitLimits, ScreenPos, Viewport};
pub use frame::{CameraFrame, Frame, NodeGeometry, RenderNode};
pub use interaction::{InteractionController, InteractionOutcome, InteractionState, PointerTarget};
pub use picking::{Aabb, Ray};
pub use viewpoint::{ViewPreset, ViewpointController};
