//! Entity generators for test data.
//!
//! - [`StreamGenerator`]: Generate time/distance streams from an athlete profile

pub mod stream;

pub use stream::{GeneratedStreams, StreamGenerator};
