//! Market Maker Configuration
//!
//! Strategy parameters of the HFT market maker and their attribute names.

use crate::attributes::AgentAttributes;
use hftsim_core::{Money, TimeDelta, Volume};
use hftsim_ports::{ConfigError, ConfigResult, ParameterProcessor};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for the market maker agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMakerConfig {
    /// Name of the venue receiving cancellations and placements
    pub exchange: String,

    /// Depth hint attached to every cancellation
    pub depth: u32,

    /// Time between two quote refreshes
    pub wake_interval: TimeDelta,

    /// Estimate of the next period's order flow, in price units.
    /// Compared against the mid-price to predict the side of the next order.
    pub rolling_mean: Money,

    /// Lower bound of the sampled volume on the side opposing predicted flow
    pub volume_min: Volume,

    /// Upper bound of the sampled volume on the side opposing predicted flow
    pub volume_max: Volume,

    /// Fixed volume on the side aligned with predicted flow
    pub volume_minus: Volume,

    /// Distance from mid-price to each quote
    pub half_spread: Money,
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            exchange: String::new(),
            depth: 1,
            wake_interval: 1,
            rolling_mean: Decimal::ZERO,
            volume_min: 1.0,
            volume_max: 1.0,
            volume_minus: 1.0,
            half_spread: dec!(0.01),
        }
    }
}

impl MarketMakerConfig {
    /// Set the venue (builder pattern)
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    /// Set the wake interval (builder pattern)
    pub fn with_wake_interval(mut self, interval: TimeDelta) -> Self {
        self.wake_interval = interval;
        self
    }

    /// Set the rolling mean (builder pattern)
    pub fn with_rolling_mean(mut self, rolling_mean: Money) -> Self {
        self.rolling_mean = rolling_mean;
        self
    }

    /// Set sampled and fixed volumes (builder pattern)
    pub fn with_volumes(mut self, min: Volume, max: Volume, minus: Volume) -> Self {
        self.volume_min = min;
        self.volume_max = max;
        self.volume_minus = minus;
        self
    }

    /// Set the half-spread (builder pattern)
    pub fn with_half_spread(mut self, half_spread: Money) -> Self {
        self.half_spread = half_spread;
        self
    }

    /// Set the cancellation depth hint (builder pattern)
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Overwrite every setting present in `attributes`
    ///
    /// Recognised attributes: `exchange`, `timeStep`, `vMin`, `vMax`,
    /// `vMinus`, `depth`, `rollingMean`, `halfSpread`. Absent attributes keep
    /// their current value. The first malformed value aborts with an error.
    pub fn apply_attributes(
        &mut self,
        attributes: &AgentAttributes,
        parameters: &dyn ParameterProcessor,
    ) -> ConfigResult<()> {
        if let Some(exchange) = attributes.string("exchange", parameters) {
            self.exchange = exchange;
        }
        if let Some(interval) = attributes.parse("timeStep", parameters)? {
            self.wake_interval = interval;
        }
        if let Some(v) = attributes.parse("vMin", parameters)? {
            self.volume_min = v;
        }
        if let Some(v) = attributes.parse("vMax", parameters)? {
            self.volume_max = v;
        }
        if let Some(v) = attributes.parse("vMinus", parameters)? {
            self.volume_minus = v;
        }
        if let Some(depth) = attributes.parse("depth", parameters)? {
            self.depth = depth;
        }
        if let Some(rolling_mean) = attributes.money("rollingMean", parameters)? {
            self.rolling_mean = rolling_mean;
        }
        if let Some(half_spread) = attributes.money("halfSpread", parameters)? {
            self.half_spread = half_spread;
        }
        Ok(())
    }

    /// Check the invariants volume sampling and quoting rely on
    pub fn validate(&self) -> ConfigResult<()> {
        if self.volume_min.is_nan() || self.volume_min <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "vMin must be positive, got {}",
                self.volume_min
            )));
        }
        if !self.volume_max.is_finite() || self.volume_max < self.volume_min {
            return Err(ConfigError::Invalid(format!(
                "vMax ({}) must be finite and not below vMin ({})",
                self.volume_max, self.volume_min
            )));
        }
        if !self.volume_minus.is_finite() || self.volume_minus <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "vMinus must be positive, got {}",
                self.volume_minus
            )));
        }
        if self.half_spread < Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "halfSpread must not be negative, got {}",
                self.half_spread
            )));
        }
        Ok(())
    }
}
