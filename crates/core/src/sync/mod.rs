//! Sync pipeline: formatter, per-tick service and scheduler plumbing.

mod formatter;
mod scheduler;
mod service;

pub use formatter::*;
pub use scheduler::*;
pub use service::*;
