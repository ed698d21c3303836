//! Wire Mapping (spec §4.4): pure `from_wire`/`to_wire` conversions between
//! the external schema (plain serde-derived structs — this corpus's
//! replacement for a generated protobuf schema) and the internal domain
//! model. No module here touches Scenario State.

pub mod interface;
pub mod link;
pub mod node;
pub mod platform;
pub mod service_request;

pub use interface::InterfaceWire;
pub use link::{BidirectionalLinkWire, LinkWire};
pub use node::NodeWire;
pub use platform::PlatformWire;
pub use service_request::{FlowRequirementWire, ServiceEndpointWire, ServiceRequestWire, TimeIntervalWire};
