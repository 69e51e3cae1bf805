use rust_decimal::Decimal;

/// Currency amount - uses Decimal for fixed-point precision
pub type Money = Decimal;

/// Order volume - a positive real amount
pub type Volume = f64;

/// Point on the simulation timeline, in integer time units
pub type Timestamp = u64;

/// Distance between two points on the simulation timeline
pub type TimeDelta = u64;
