//! Domain layer for hidlink-sender.
//!
//! Pure arithmetic with no I/O, no session handle, and no framework types:
//! just the mapping from raw motion samples to pointer deltas. Everything
//! here is trivially testable with plain assertions.

pub mod mapping;

pub use mapping::TiltMapper;
