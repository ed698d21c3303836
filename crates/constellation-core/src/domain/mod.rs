//! Domain types stored by the scenario state manager: the authoritative,
//! transport-agnostic representation of a scenario.

pub mod interface;
pub mod link;
pub mod node;
pub mod platform;
pub mod service_request;
pub mod vec3;

pub use interface::{Medium, NetworkInterface, TransceiverModel};
pub use link::{LinkStatus, NetworkLink};
pub use node::{NetworkNode, NodeType};
pub use platform::{MotionSource, Platform, PlatformType};
pub use service_request::{FlowRequirement, ServiceRequest, TimeInterval};
pub use vec3::Vec3;
