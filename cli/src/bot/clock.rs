//! # PabloBot Clock Source
//!
//! File: cli/src/bot/clock.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The time, date and day rules embed the current wall-clock time in their
//! replies. The `Clock` trait lets the responder read "now" without calling
//! `chrono::Local::now()` directly, so tests can pin the moment with
//! `FixedClock`.
//!
use chrono::{DateTime, Local};

/// Display format for the time rule, e.g. `02:30 PM`.
pub const TIME_FORMAT: &str = "%I:%M %p";
/// Display format for the date rule, e.g. `15 March 2024`.
pub const DATE_FORMAT: &str = "%d %B %Y";
/// Display format for the day rule, e.g. `Friday`.
pub const DAY_FORMAT: &str = "%A";

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant. Used by tests.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_formats() {
        let moment = Local.with_ymd_and_hms(2024, 3, 15, 14, 30, 0).unwrap();
        let clock = FixedClock(moment);

        assert_eq!(clock.now().format(TIME_FORMAT).to_string(), "02:30 PM");
        assert_eq!(clock.now().format(DATE_FORMAT).to_string(), "15 March 2024");
        assert_eq!(clock.now().format(DAY_FORMAT).to_string(), "Friday");
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
