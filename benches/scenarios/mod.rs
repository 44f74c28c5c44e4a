//! Real-world scenario benchmarks.
//!
//! Full pipeline passes with the default configuration, the way the
//! frame interrupt drives them.

mod frame;

pub use frame::bench_frame;
