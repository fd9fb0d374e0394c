/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::str::FromStr;

use anyhow::anyhow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Seconds covered by one unit. Per-second rates are multiplied by this
    /// to express them in the configured rate unit.
    pub fn rate_factor(&self) -> f64 {
        match self {
            TimeUnit::Nanoseconds => 1e-9,
            TimeUnit::Microseconds => 1e-6,
            TimeUnit::Milliseconds => 1e-3,
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
        }
    }

    /// Nanoseconds in one unit.
    pub fn nanos(&self) -> f64 {
        match self {
            TimeUnit::Nanoseconds => 1.0,
            TimeUnit::Microseconds => 1e3,
            TimeUnit::Milliseconds => 1e6,
            TimeUnit::Seconds => 1e9,
            TimeUnit::Minutes => 60e9,
            TimeUnit::Hours => 3600e9,
        }
    }

    /// Raw nanosecond durations are multiplied by this to express them in
    /// the configured duration unit.
    pub fn duration_factor(&self) -> f64 {
        1.0 / self.nanos()
    }
}

impl FromStr for TimeUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nanoseconds" | "nanos" | "ns" => Ok(TimeUnit::Nanoseconds),
            "microseconds" | "micros" | "us" => Ok(TimeUnit::Microseconds),
            "milliseconds" | "millis" | "ms" => Ok(TimeUnit::Milliseconds),
            "seconds" | "s" => Ok(TimeUnit::Seconds),
            "minutes" | "m" => Ok(TimeUnit::Minutes),
            "hours" | "h" => Ok(TimeUnit::Hours),
            _ => Err(anyhow!("unsupported time unit {s}")),
        }
    }
}
