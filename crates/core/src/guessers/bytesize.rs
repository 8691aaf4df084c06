//! Byte counts.
//!
//! Any non-negative integer could be a size in bytes. Tokens with a unit
//! suffix such as `8TiB`, `1.5 MB` or `512K` certainly are.

use tracing::{debug, trace};

use crate::types::{Guess, GuessValue};

/// One row of the unit table: binary and decimal multipliers with their
/// symbols, plus a short alias that always means the binary multiplier.
#[derive(Debug, Clone, Copy)]
pub struct ByteUnit {
    pub binary: u64,
    pub decimal: u64,
    pub symbol: &'static str,
    pub decimal_symbol: &'static str,
    pub alias: &'static str,
}

pub const BYTE_UNITS: [ByteUnit; 6] = [
    ByteUnit {
        binary: 1 << 10,
        decimal: 1_000,
        symbol: "KiB",
        decimal_symbol: "KB",
        alias: "K",
    },
    ByteUnit {
        binary: 1 << 20,
        decimal: 1_000_000,
        symbol: "MiB",
        decimal_symbol: "MB",
        alias: "M",
    },
    ByteUnit {
        binary: 1 << 30,
        decimal: 1_000_000_000,
        symbol: "GiB",
        decimal_symbol: "GB",
        alias: "G",
    },
    ByteUnit {
        binary: 1 << 40,
        decimal: 1_000_000_000_000,
        symbol: "TiB",
        decimal_symbol: "TB",
        alias: "T",
    },
    ByteUnit {
        binary: 1 << 50,
        decimal: 1_000_000_000_000_000,
        symbol: "PiB",
        decimal_symbol: "PB",
        alias: "P",
    },
    ByteUnit {
        binary: 1 << 60,
        decimal: 1_000_000_000_000_000_000,
        symbol: "EiB",
        decimal_symbol: "EB",
        alias: "E",
    },
];

/// Goodness of expressing a count in a unit, given `count / unit`.
#[must_use]
pub fn unit_goodness(quotient: f64) -> i32 {
    if quotient < 0.01 {
        -50
    } else if quotient > 1000.0 {
        -5
    } else if quotient >= 1.0 {
        50
    } else {
        -20
    }
}

/// One line per unit whose decimal quantity is at least one,
/// e.g. `8.0 TiB (8.8 TB)`.
#[must_use]
pub fn byte_breakdown(n: u64) -> Vec<String> {
    BYTE_UNITS
        .iter()
        .filter_map(|u| {
            let binary = n as f64 / u.binary as f64;
            let decimal = n as f64 / u.decimal as f64;
            (decimal >= 1.0).then(|| {
                format!(
                    "{binary:.1} {} ({decimal:.1} {})",
                    u.symbol, u.decimal_symbol
                )
            })
        })
        .collect()
}

/// An integer read as a plain byte count.
#[must_use]
pub fn guess_byte_size(n: u64) -> Guess {
    let goodness = BYTE_UNITS
        .iter()
        .map(|u| unit_goodness(n as f64 / u.binary as f64))
        .max()
        .unwrap_or(0);
    Guess::new(
        format!("{n} bytes"),
        "byte count without explicit unit",
        goodness,
        GuessValue::Bytes(n),
    )
    .with_additional(byte_breakdown(n))
}

/// A number followed by a unit symbol. `None` unless the token carries a
/// known suffix and the rest is a non-negative number.
#[must_use]
pub fn guess_bytes_with_unit(token: &str) -> Option<Guess> {
    let (value, multiplier) = parse_with_unit(token)?;
    let product = value * multiplier as f64;
    // 2^64 is exactly representable, anything at or above it would saturate.
    if product >= u64::MAX as f64 {
        trace!(token, "bytes: rejected - larger than a u64 byte count");
        return None;
    }
    let n = product as u64;
    debug!(token, n, "bytes: matched explicit unit");
    Some(
        Guess::new(
            format!("{n} bytes"),
            "byte count with explicit unit",
            100,
            GuessValue::Bytes(n),
        )
        .with_additional(byte_breakdown(n)),
    )
}

fn parse_with_unit(token: &str) -> Option<(f64, u64)> {
    let (number, multiplier) = BYTE_UNITS.iter().find_map(|u| {
        if let Some(rest) = token.strip_suffix(u.symbol) {
            Some((rest, u.binary))
        } else if let Some(rest) = token.strip_suffix(u.decimal_symbol) {
            Some((rest, u.decimal))
        } else {
            token.strip_suffix(u.alias).map(|rest| (rest, u.binary))
        }
    })?;

    let number = number.trim();
    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some((value, multiplier)),
        Ok(value) => {
            trace!(value, "bytes: rejected - not a non-negative size");
            None
        }
        Err(e) => {
            trace!(number, error = %e, "bytes: rejected - not a number");
            None
        }
    }
}
