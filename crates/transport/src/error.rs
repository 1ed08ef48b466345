/// Error returned when a transport operation fails.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport exhausted: needed {needed} octets, {available} available")]
    Exhausted { needed: usize, available: usize },

    #[error("patch of {len} octets at {position} lands outside the {written} octets written")]
    PatchOutOfBounds { position: u64, len: usize, written: u64 },

    #[error("transport is unhealthy after an earlier failure")]
    Unhealthy,
}
