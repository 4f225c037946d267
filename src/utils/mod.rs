//! Utility modules for ActionLens

pub mod timing;

pub use timing::{format_duration, ScanPhase, ScanTiming, Timer};
