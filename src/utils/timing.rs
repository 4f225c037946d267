//! Timing utilities for scan phases
//!
//! A scan runs in three phases (discovery, fetch and analysis, report assembly);
//! each is measured with a [`Timer`] and recorded in [`ScanTiming`].

use std::fmt;
use std::time::{Duration, Instant};

/// Measures elapsed wall-clock time
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

/// Format a duration for humans: "1.23s", "456ms" or "< 1ms"
pub fn format_duration(duration: Duration) -> String {
    match duration.as_millis() {
        0 => "< 1ms".to_string(),
        millis if millis >= 1000 => format!("{:.2}s", duration.as_secs_f64()),
        millis => format!("{}ms", millis),
    }
}

/// The phases of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Discovery,
    Analysis,
    Assembly,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Discovery => "discovery",
            ScanPhase::Analysis => "analysis",
            ScanPhase::Assembly => "assembly",
        };
        f.write_str(name)
    }
}

/// Durations of each phase of one scan
#[derive(Debug, Clone, Default)]
pub struct ScanTiming {
    phases: Vec<(ScanPhase, Duration)>,
    total: Duration,
}

impl ScanTiming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished phase and log it
    pub fn record(&mut self, phase: ScanPhase, duration: Duration) {
        tracing::debug!(%phase, elapsed = %format_duration(duration), "Phase finished");
        self.phases.push((phase, duration));
    }

    pub fn set_total(&mut self, duration: Duration) {
        self.total = duration;
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn phase(&self, phase: ScanPhase) -> Option<Duration> {
        self.phases
            .iter()
            .find(|(recorded, _)| *recorded == phase)
            .map(|(_, duration)| *duration)
    }

    /// One-line summary such as "discovery 120ms, analysis 1.02s, assembly < 1ms (total 1.14s)"
    pub fn summary(&self) -> String {
        let phases = self
            .phases
            .iter()
            .map(|(phase, duration)| format!("{} {}", phase, format_duration(*duration)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} (total {})", phases, format_duration(self.total))
    }
}
