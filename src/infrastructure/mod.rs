pub mod concurrency_gate;

pub use concurrency_gate::{ConcurrencyGate, GatePermit};
