//! Octet transports for the tagged message codec.
//!
//! A sink accepts ordered octet appends, a source yields ordered octet
//! reads. Both report their current position and carry a healthy flag: the
//! first failure clears the flag and every later operation refuses to run,
//! so the earliest error is the one that surfaces to the caller.

mod error;
mod sink;
mod source;

pub use error::TransportError;
pub use sink::{BufferSink, OctetSink};
pub use source::{BufferSource, OctetSource};
