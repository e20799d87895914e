//! Exchange order types.
//!
//! Mirrors the order shape the exchange adapters report, so a bot
//! status snapshot can be written and read back without loss.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────
// Trading pair
// ────────────────────────────────────────────

/// A base/quote currency pair such as `BTC/USDT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    pub base: String,
    pub quote: String,
}

impl TradingPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }
}

impl std::fmt::Display for TradingPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

// ────────────────────────────────────────────
// Enums
// ────────────────────────────────────────────

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type as reported by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    Closed,
    Canceled,
    Expired,
    Rejected,
}

/// Fee charged for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub currency: String,
    pub cost: f64,
    #[serde(default)]
    pub rate: Option<f64>,
}

// ────────────────────────────────────────────
// Order
// ────────────────────────────────────────────

/// An order placed by a bot on an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Exchange-assigned order ID.
    pub id: String,
    pub exchange_id: String,
    pub bot_id: String,
    pub strategy_id: String,
    pub pair: TradingPair,
    /// Creation time (Unix ms).
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: OrderSide,
    pub price: f64,
    pub amount: f64,
    pub cost: f64,
    pub average: Option<f64>,
    pub filled: f64,
    pub remaining: f64,
    pub status: OrderStatus,
    pub fee: Option<Fee>,
    pub trigger_price: Option<f64>,
    pub stop_price: Option<f64>,
    pub take_profit_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_serializes_snake_case() {
        let json = serde_json::to_string(&OrderType::StopLossLimit).unwrap();
        assert_eq!(json, "\"stop_loss_limit\"");
    }

    #[test]
    fn test_trading_pair_display() {
        assert_eq!(TradingPair::new("BTC", "USDT").to_string(), "BTC/USDT");
    }
}
