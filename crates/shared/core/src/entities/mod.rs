mod order;
mod side;

pub use order::OrderId;
pub use side::OrderDirection;
