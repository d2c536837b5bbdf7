//! API route modules.

pub mod interview;
