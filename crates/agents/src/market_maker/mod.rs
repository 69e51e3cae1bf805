//! HFT Market Maker Agent
//!
//! Quotes one buy and one sell limit order around its mid-price and refreshes
//! them every wake interval. Each cycle:
//!
//! 1. cancels whatever it still has resting
//! 2. predicts the side of the next incoming order by comparing its rolling
//!    mean against the mid-price
//! 3. quotes a randomly sized order against the predicted flow and a small
//!    fixed-size order with it
//! 4. schedules its next wake-up
//!
//! When the rolling mean carries no signal (zero, or equal to the mid-price)
//! the cycle stops after the cancellations and no wake-up is scheduled. The
//! agent then reports [`AgentStatus::Halted`].

mod config;

pub use config::MarketMakerConfig;

use crate::agent::Agent;
use crate::attributes::AgentAttributes;
use hftsim_core::{Money, OrderDirection, OrderId, Volume};
use hftsim_ports::{
    CancelOrdersCancellation, CancelOrdersPayload, ConfigResult, Message, MessagePayload,
    ParameterProcessor, PlaceOrderLimitPayload, Simulation,
};
use log::{debug, info, warn};
use rand::RngCore;
use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Lifecycle of the market maker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    /// Constructed, running on default parameters
    Uninitialized,
    /// Configuration applied, quoting cycle not started
    Configured,
    /// Waiting for the next scheduled wake-up
    Idle,
    /// Last cycle found no directional signal; no wake-up is pending
    Halted,
}

/// Predicted side of the next incoming order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    NextOrderBuy,
    NextOrderSell,
}

/// HFT market maker
pub struct MarketMakerAgent<R: RngCore = StdRng> {
    name: String,
    config: MarketMakerConfig,
    /// Reference price for quotes and predictions.
    /// Not refreshed by the quoting cycle; see [`Self::set_current_mid_price`].
    current_mid_price: Money,
    outstanding_buy_order: Option<OrderId>,
    outstanding_sell_order: Option<OrderId>,
    status: AgentStatus,
    rng: R,
}

impl MarketMakerAgent<StdRng> {
    /// Create an agent with a reproducible random stream
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> MarketMakerAgent<R> {
    /// Create an agent on default parameters, drawing volumes from `rng`
    pub fn new(name: impl Into<String>, rng: R) -> Self {
        Self {
            name: name.into(),
            config: MarketMakerConfig::default(),
            current_mid_price: dec!(1),
            outstanding_buy_order: None,
            outstanding_sell_order: None,
            status: AgentStatus::Uninitialized,
            rng,
        }
    }

    /// Create an agent from an already built configuration
    pub fn with_config(
        name: impl Into<String>,
        config: MarketMakerConfig,
        rng: R,
    ) -> ConfigResult<Self> {
        config.validate()?;
        let mut agent = Self::new(name, rng);
        agent.config = config;
        agent.status = AgentStatus::Configured;
        Ok(agent)
    }

    pub fn config(&self) -> &MarketMakerConfig {
        &self.config
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        self.status == AgentStatus::Halted
    }

    pub fn current_mid_price(&self) -> Money {
        self.current_mid_price
    }

    /// Refresh the mid-price used by the next quoting cycle
    ///
    /// The quoting cycle itself never observes market data, so this (or an
    /// `EVENT_MID_PRICE` message) is the only way the reference price moves.
    pub fn set_current_mid_price(&mut self, price: Money) {
        debug!(
            "[{}] Mid-price {} -> {}",
            self.name, self.current_mid_price, price
        );
        self.current_mid_price = price;
    }

    pub fn outstanding_buy_order(&self) -> Option<OrderId> {
        self.outstanding_buy_order
    }

    pub fn outstanding_sell_order(&self) -> Option<OrderId> {
        self.outstanding_sell_order
    }

    /// Record a resting order on `direction`
    ///
    /// Returns the different id previously tracked on that side, which is no
    /// longer covered by the next cancel phase.
    pub fn track_order(&mut self, direction: OrderDirection, id: OrderId) -> Option<OrderId> {
        let slot = match direction {
            OrderDirection::Buy => &mut self.outstanding_buy_order,
            OrderDirection::Sell => &mut self.outstanding_sell_order,
        };
        slot.replace(id).filter(|previous| *previous != id)
    }

    /// Stop tracking `id` if it is one of ours
    fn forget_order(&mut self, id: OrderId) {
        if self.outstanding_buy_order == Some(id) {
            self.outstanding_buy_order = None;
        }
        if self.outstanding_sell_order == Some(id) {
            self.outstanding_sell_order = None;
        }
    }

    /// Side of the next incoming order implied by the rolling mean
    pub fn predict(&self) -> Option<Prediction> {
        let rolling_mean = self.config.rolling_mean;
        if rolling_mean <= Decimal::ZERO {
            return None;
        }
        if rolling_mean > self.current_mid_price {
            Some(Prediction::NextOrderBuy)
        } else if rolling_mean < self.current_mid_price {
            Some(Prediction::NextOrderSell)
        } else {
            None
        }
    }

    /// Draw a volume uniformly from `[volume_min, volume_max]`
    pub fn sample_volume(&mut self) -> Volume {
        let (min, max) = (self.config.volume_min, self.config.volume_max);
        if min >= max {
            return min;
        }
        Uniform::new_inclusive(min, max).sample(&mut self.rng)
    }

    /// (sell volume, buy volume) for a prediction
    fn quote_volumes(&mut self, prediction: Prediction) -> (Volume, Volume) {
        let sampled = self.sample_volume();
        match prediction {
            Prediction::NextOrderBuy => (sampled, self.config.volume_minus),
            Prediction::NextOrderSell => (self.config.volume_minus, sampled),
        }
    }

    fn on_simulation_start(&mut self, simulation: &mut dyn Simulation) {
        if self.config.exchange.is_empty() {
            warn!(
                "[{}] No exchange configured, orders will be addressed to an empty name",
                self.name
            );
        }
        info!("[{}] Simulation started, scheduling first quote", self.name);

        let now = simulation.now();
        simulation.dispatch_message(
            now,
            0,
            &self.name,
            &self.name,
            MessagePayload::WakeupForQuoting,
        );
        self.status = AgentStatus::Idle;
    }

    fn on_wakeup(&mut self, simulation: &mut dyn Simulation) {
        let now = simulation.now();

        // Cancel whatever is still resting
        let resting = [
            self.outstanding_buy_order.take(),
            self.outstanding_sell_order.take(),
        ];
        self.send_cancel(simulation, resting.into_iter().flatten());

        // The mid-price is whatever was last set; no market data is read here
        let prediction = match self.predict() {
            Some(p) => p,
            None => {
                warn!(
                    "[{}] No directional signal (rolling mean {} vs mid {}), halting at t={}",
                    self.name, self.config.rolling_mean, self.current_mid_price, now
                );
                self.status = AgentStatus::Halted;
                return;
            }
        };

        let mid = self.current_mid_price;
        let prices = mid
            .checked_add(self.config.half_spread)
            .zip(mid.checked_sub(self.config.half_spread));
        let Some((sell_price, buy_price)) = prices else {
            warn!(
                "[{}] Quotes around mid {} +/- {} overflow, halting at t={}",
                self.name, mid, self.config.half_spread, now
            );
            self.status = AgentStatus::Halted;
            return;
        };
        let (sell_volume, buy_volume) = self.quote_volumes(prediction);

        debug!(
            "[{}] t={} {:?}: sell {:.4}@{} buy {:.4}@{} (mid {})",
            self.name,
            now,
            prediction,
            sell_volume,
            sell_price,
            buy_volume,
            buy_price,
            self.current_mid_price
        );

        simulation.dispatch_message(
            now,
            0,
            &self.name,
            &self.config.exchange,
            MessagePayload::PlaceOrderLimit(PlaceOrderLimitPayload::sell(sell_volume, sell_price)),
        );
        simulation.dispatch_message(
            now,
            0,
            &self.name,
            &self.config.exchange,
            MessagePayload::PlaceOrderLimit(PlaceOrderLimitPayload::buy(buy_volume, buy_price)),
        );

        self.schedule_quoting(simulation);
    }

    /// Send one `CANCEL_ORDERS` batch for `ids`, if there are any
    fn send_cancel(
        &self,
        simulation: &mut dyn Simulation,
        ids: impl IntoIterator<Item = OrderId>,
    ) {
        let mut cancel = CancelOrdersPayload::default();
        for id in ids {
            cancel
                .cancellations
                .push(CancelOrdersCancellation::new(id, self.config.depth));
        }
        if cancel.is_empty() {
            return;
        }
        debug!(
            "[{}] Cancelling {} outstanding order(s)",
            self.name,
            cancel.len()
        );
        let now = simulation.now();
        simulation.dispatch_message(
            now,
            0,
            &self.name,
            &self.config.exchange,
            MessagePayload::CancelOrders(cancel),
        );
    }

    /// A placement was acknowledged by the venue
    ///
    /// An id displaced from its side is cancelled at once. While halted no
    /// cycle will withdraw the order, so it is cancelled instead of tracked.
    fn on_order_acknowledged(
        &mut self,
        simulation: &mut dyn Simulation,
        direction: OrderDirection,
        id: OrderId,
    ) {
        if self.status == AgentStatus::Halted {
            debug!("[{}] Late acknowledgement of {} while halted", self.name, id);
            self.send_cancel(simulation, [id]);
            return;
        }
        if let Some(displaced) = self.track_order(direction, id) {
            debug!(
                "[{}] {} order {} replaced by {} before it was cancelled",
                self.name, direction, displaced, id
            );
            self.send_cancel(simulation, [displaced]);
        }
    }

    fn schedule_quoting(&mut self, simulation: &mut dyn Simulation) {
        let now = simulation.now();
        simulation.dispatch_message(
            now,
            self.config.wake_interval,
            &self.name,
            &self.name,
            MessagePayload::WakeupForQuoting,
        );
        self.status = AgentStatus::Idle;
    }
}

impl<R: RngCore> Agent for MarketMakerAgent<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(
        &mut self,
        attributes: &AgentAttributes,
        parameters: &dyn ParameterProcessor,
    ) -> ConfigResult<()> {
        let mut config = self.config.clone();
        config.apply_attributes(attributes, parameters)?;
        config.validate()?;

        info!(
            "[{}] Configured: exchange={} step={} rolling_mean={} volumes=[{}, {}] minus={} half_spread={} depth={}",
            self.name,
            config.exchange,
            config.wake_interval,
            config.rolling_mean,
            config.volume_min,
            config.volume_max,
            config.volume_minus,
            config.half_spread,
            config.depth
        );

        self.config = config;
        self.status = AgentStatus::Configured;
        Ok(())
    }

    fn receive_message(&mut self, simulation: &mut dyn Simulation, message: &Message) {
        match &message.payload {
            MessagePayload::SimulationStart => self.on_simulation_start(simulation),
            MessagePayload::WakeupForQuoting => self.on_wakeup(simulation),
            MessagePayload::PlaceOrderLimitResponse { id, request } => {
                if message.source == self.config.exchange {
                    self.on_order_acknowledged(simulation, request.direction, *id);
                } else {
                    debug!(
                        "[{}] Ignoring placement response from {}",
                        self.name, message.source
                    );
                }
            }
            MessagePayload::OrderCancelled { id } => self.forget_order(*id),
            MessagePayload::OrderFilled { id, remaining } if *remaining <= 0.0 => {
                self.forget_order(*id)
            }
            MessagePayload::MidPriceUpdate { price } => self.set_current_mid_price(*price),
            _ => {}
        }
    }

    fn agent_type(&self) -> &'static str {
        "MarketMakerAgent"
    }
}
