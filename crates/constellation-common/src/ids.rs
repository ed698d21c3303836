//! Monotonic, prefixed id formatting and the `<node>/<local>` interface id shape.
//!
//! Unlike the platform's other id families, scenario entity ids are not
//! random — they are generated from a per-store monotonic counter so that
//! `ListX` output is naturally creation-ordered without a separate sort key.

/// Format a platform id from a monotonic counter value: `platform-<n>`.
pub fn platform_id(counter: u64) -> String {
    format!("platform-{counter}")
}

/// Format a service request id from a monotonic counter value: `sr-<n>`.
pub fn service_request_id(counter: u64) -> String {
    format!("sr-{counter}")
}

/// Split a network interface id of the form `<node>/<local>` into its parts.
///
/// Returns `None` if there is no `/` separator. A bare local id (no `/`) is
/// not an error at this layer — callers decide whether that is acceptable
/// for their context.
pub fn split_interface_id(id: &str) -> Option<(&str, &str)> {
    id.split_once('/')
}

/// Build the canonical `<node>/<local>` interface id.
pub fn interface_id(node_id: &str, local_id: &str) -> String {
    format!("{node_id}/{local_id}")
}

/// Derive a stable directional link id from its endpoints:
/// `<src>\u{2194}<dst>|<src>\u{2192}<dst>`, so reversing the pair yields a
/// different id while the bidirectional key (the part before `|`) stays
/// comparable across both directions.
pub fn directional_link_id(src_interface_id: &str, dst_interface_id: &str) -> String {
    format!("{src_interface_id}\u{2194}{dst_interface_id}|{src_interface_id}\u{2192}{dst_interface_id}")
}

/// The bidirectional key shared by a link and its reverse: `<a>\u{2194}<b>`,
/// with endpoints ordered so that `bidirectional_key(a, b) == bidirectional_key(b, a)`.
pub fn bidirectional_key(a_interface_id: &str, b_interface_id: &str) -> String {
    if a_interface_id <= b_interface_id {
        format!("{a_interface_id}\u{2194}{b_interface_id}")
    } else {
        format!("{b_interface_id}\u{2194}{a_interface_id}")
    }
}
