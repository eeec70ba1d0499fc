//! Adapters - Concrete implementations of ports.

// Subprocess invocation of the worker binary
pub mod worker;

// HTTPS credential probes
pub mod openai;
