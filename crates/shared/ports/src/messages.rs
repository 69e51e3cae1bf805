//! Message contract between participants and the scheduler
//!
//! Every message is an envelope addressed by participant name plus a payload
//! drawn from a closed set of kinds. Kinds introduced by a host that this
//! crate does not model travel as [`MessagePayload::Other`].

use hftsim_core::{Money, OrderDirection, OrderId, Timestamp, Volume};
use serde::{Deserialize, Serialize};

/// One cancellation entry: the order to cancel and the venue depth hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrdersCancellation {
    pub id: OrderId,
    pub depth: u32,
}

impl CancelOrdersCancellation {
    pub fn new(id: OrderId, depth: u32) -> Self {
        Self { id, depth }
    }
}

/// Batch of cancellations sent to a venue in one message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrdersPayload {
    pub cancellations: Vec<CancelOrdersCancellation>,
}

impl CancelOrdersPayload {
    pub fn is_empty(&self) -> bool {
        self.cancellations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cancellations.len()
    }
}

/// Limit order placement request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderLimitPayload {
    pub direction: OrderDirection,
    pub volume: Volume,
    pub price: Money,
}

impl PlaceOrderLimitPayload {
    pub fn new(direction: OrderDirection, volume: Volume, price: Money) -> Self {
        Self {
            direction,
            volume,
            price,
        }
    }

    pub fn buy(volume: Volume, price: Money) -> Self {
        Self::new(OrderDirection::Buy, volume, price)
    }

    pub fn sell(volume: Volume, price: Money) -> Self {
        Self::new(OrderDirection::Sell, volume, price)
    }
}

/// Payload of a scheduled message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum MessagePayload {
    /// Broadcast once when the simulation starts
    #[serde(rename = "EVENT_SIMULATION_START")]
    SimulationStart,

    /// Broadcast once when the simulation stops
    #[serde(rename = "EVENT_SIMULATION_STOP")]
    SimulationStop,

    /// Self-addressed timer that triggers a quote refresh
    #[serde(rename = "WAKEUP_FOR_QUOTING")]
    WakeupForQuoting,

    /// Cancellation batch for a venue
    #[serde(rename = "CANCEL_ORDERS")]
    CancelOrders(CancelOrdersPayload),

    /// Limit order placement for a venue
    #[serde(rename = "PLACE_ORDER_LIMIT")]
    PlaceOrderLimit(PlaceOrderLimitPayload),

    /// Venue acknowledgement of a placement, carrying the assigned id
    #[serde(rename = "RESPONSE_PLACE_ORDER_LIMIT")]
    PlaceOrderLimitResponse {
        id: OrderId,
        request: PlaceOrderLimitPayload,
    },

    /// Venue notification that an order left the book by cancellation
    #[serde(rename = "EVENT_ORDER_CANCELLED")]
    OrderCancelled { id: OrderId },

    /// Venue notification of a (partial) fill
    #[serde(rename = "EVENT_ORDER_FILLED")]
    OrderFilled { id: OrderId, remaining: Volume },

    /// Fresh mid-price observation for the receiving participant
    #[serde(rename = "EVENT_MID_PRICE")]
    MidPriceUpdate { price: Money },

    /// A kind defined by the host and unknown to this crate
    #[serde(rename = "OTHER")]
    Other { kind: String },
}

impl MessagePayload {
    /// Wire name of the message kind
    pub fn kind(&self) -> &str {
        match self {
            MessagePayload::SimulationStart => "EVENT_SIMULATION_START",
            MessagePayload::SimulationStop => "EVENT_SIMULATION_STOP",
            MessagePayload::WakeupForQuoting => "WAKEUP_FOR_QUOTING",
            MessagePayload::CancelOrders(_) => "CANCEL_ORDERS",
            MessagePayload::PlaceOrderLimit(_) => "PLACE_ORDER_LIMIT",
            MessagePayload::PlaceOrderLimitResponse { .. } => "RESPONSE_PLACE_ORDER_LIMIT",
            MessagePayload::OrderCancelled { .. } => "EVENT_ORDER_CANCELLED",
            MessagePayload::OrderFilled { .. } => "EVENT_ORDER_FILLED",
            MessagePayload::MidPriceUpdate { .. } => "EVENT_MID_PRICE",
            MessagePayload::Other { kind } => kind,
        }
    }

    pub fn other(kind: impl Into<String>) -> Self {
        MessagePayload::Other { kind: kind.into() }
    }
}

/// Addressed, timestamped message as stored by the scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Time at which the message was dispatched
    pub occurrence: Timestamp,
    /// Time at which the message is delivered
    pub arrival: Timestamp,
    pub source: String,
    pub destination: String,
    pub payload: MessagePayload,
}

impl Message {
    pub fn new(
        occurrence: Timestamp,
        arrival: Timestamp,
        source: impl Into<String>,
        destination: impl Into<String>,
        payload: MessagePayload,
    ) -> Self {
        Self {
            occurrence,
            arrival,
            source: source.into(),
            destination: destination.into(),
            payload,
        }
    }

    pub fn kind(&self) -> &str {
        self.payload.kind()
    }

    /// Delay between dispatch and delivery
    pub fn delay(&self) -> u64 {
        self.arrival.saturating_sub(self.occurrence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_names() {
        assert_eq!(MessagePayload::SimulationStart.kind(), "EVENT_SIMULATION_START");
        assert_eq!(MessagePayload::WakeupForQuoting.kind(), "WAKEUP_FOR_QUOTING");
        assert_eq!(
            MessagePayload::CancelOrders(CancelOrdersPayload::default()).kind(),
            "CANCEL_ORDERS"
        );
        assert_eq!(
            MessagePayload::PlaceOrderLimit(PlaceOrderLimitPayload::buy(1.0, dec!(99))).kind(),
            "PLACE_ORDER_LIMIT"
        );
        assert_eq!(MessagePayload::other("EVENT_TRADE").kind(), "EVENT_TRADE");
    }

    #[test]
    fn test_serde_tag_matches_kind() {
        let payload = MessagePayload::PlaceOrderLimit(PlaceOrderLimitPayload::sell(
            2.5,
            dec!(101),
        ));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "PLACE_ORDER_LIMIT");
        assert_eq!(json["payload"]["direction"], "Sell");

        let json = serde_json::to_value(MessagePayload::WakeupForQuoting).unwrap();
        assert_eq!(json["type"], payload_kind(&MessagePayload::WakeupForQuoting));
    }

    fn payload_kind(payload: &MessagePayload) -> String {
        payload.kind().to_string()
    }

    #[test]
    fn test_message_delay() {
        let msg = Message::new(10, 15, "MM", "MM", MessagePayload::WakeupForQuoting);
        assert_eq!(msg.delay(), 5);
        assert_eq!(msg.kind(), "WAKEUP_FOR_QUOTING");
    }
}
