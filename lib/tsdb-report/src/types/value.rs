/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::Number;

#[derive(Debug, Clone, Copy)]
pub enum MetricValue {
    Double(f64),
    Signed(i64),
    Unsigned(u64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Double(f) => *f,
            MetricValue::Signed(i) => *i as f64,
            MetricValue::Unsigned(u) => *u as f64,
        }
    }

    pub fn as_json_number(&self) -> Number {
        match self {
            MetricValue::Double(f) => Number::from_f64(*f).unwrap(),
            MetricValue::Signed(i) => Number::from(*i),
            MetricValue::Unsigned(u) => Number::from(*u),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Double(v)
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Signed(v)
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::Unsigned(v)
    }
}

// Double values compare and hash by bit pattern, so that records holding
// them keep the structural identity a hash set requires.
impl PartialEq for MetricValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MetricValue::Double(a), MetricValue::Double(b)) => a.to_bits() == b.to_bits(),
            (MetricValue::Signed(a), MetricValue::Signed(b)) => a == b,
            (MetricValue::Unsigned(a), MetricValue::Unsigned(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for MetricValue {}

impl Hash for MetricValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            MetricValue::Double(f) => {
                state.write_u8(0);
                state.write_u64(f.to_bits());
            }
            MetricValue::Signed(i) => {
                state.write_u8(1);
                state.write_i64(*i);
            }
            MetricValue::Unsigned(u) => {
                state.write_u8(2);
                state.write_u64(*u);
            }
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Unsigned(u) => f.write_str(itoa::Buffer::new().format(*u)),
            MetricValue::Signed(i) => f.write_str(itoa::Buffer::new().format(*i)),
            MetricValue::Double(v) => f.write_str(ryu::Buffer::new().format(*v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(MetricValue::Unsigned(10).to_string(), "10");
        assert_eq!(MetricValue::Signed(-3).to_string(), "-3");
        assert_eq!(MetricValue::Double(1.5).to_string(), "1.5");
    }

    #[test]
    fn json_number() {
        assert_eq!(MetricValue::Signed(-3).as_json_number(), Number::from(-3));
        assert_eq!(
            MetricValue::Double(1.5).as_json_number(),
            Number::from_f64(1.5).unwrap()
        );
    }

    #[test]
    fn structural_identity() {
        assert_eq!(MetricValue::Double(1.0), MetricValue::Double(1.0));
        assert_ne!(MetricValue::Double(1.0), MetricValue::Signed(1));
        assert_ne!(MetricValue::Signed(1), MetricValue::Unsigned(1));
        assert_eq!(MetricValue::Double(f64::NAN), MetricValue::Double(f64::NAN));
    }
}
