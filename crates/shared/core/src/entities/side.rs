use serde::{Deserialize, Serialize};

/// Direction of an order (Buy or Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderDirection::Buy => write!(f, "Buy"),
            OrderDirection::Sell => write!(f, "Sell"),
        }
    }
}
