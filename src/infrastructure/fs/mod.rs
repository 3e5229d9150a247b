//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

#[cfg(test)]
pub(crate) mod faulty;
mod local;

pub use local::{expand_home, LocalFs};
