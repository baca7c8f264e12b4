//! Capability trait for entities that can be etagged.

/// Produce the deterministic base string an etag is derived from.
///
/// Implementors combine their identity and last-modified timestamp
/// (`"<id>:<timestamp>"`); any state change that moves the timestamp
/// changes the base, and with it the derived etag.
pub trait EtagSource {
    fn etag_base(&self) -> String;
}
