//! Bot status snapshots and tabular frames.

use serde::{Deserialize, Serialize};

use super::order::Order;
use crate::ports::file_store::Record;

/// Budget the bot is allowed to trade with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotBudget {
    /// Configured upper limit in quote currency.
    pub set_limit: f64,
    /// Limit after reinvested profits and losses.
    pub current_limit: f64,
    /// Amount currently committed to open orders.
    pub used: f64,
    /// Percentage of realised profit added back to the limit.
    pub pct_reinvest_profit: f64,
}

/// A round trip: an entry order and, once closed, its exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub exchange_id: String,
    pub bot_id: String,
    pub strategy_id: String,
    pub size: f64,
    pub entry_order_id: String,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_order_id: Option<String>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub profit: Option<f64>,
}

/// Bot state snapshot, saved after every tick and loaded on restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotStatus {
    pub bot_id: String,
    /// Snapshot time (Unix ms).
    pub timestamp: i64,
    pub budget: BotBudget,
    pub active_orders: Vec<Order>,
    pub archived_orders: Vec<Order>,
    pub active_trades: Vec<Trade>,
    pub closed_trades: Vec<Trade>,
}

impl Record for BotStatus {
    const TYPE_NAME: &'static str = "BotStatus";
}

/// Column-oriented table, e.g. cached candles for a pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataFrame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl DataFrame {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Rows shorter or longer than the header are rejected.
    pub fn push_row(&mut self, row: Vec<serde_json::Value>) -> bool {
        if row.len() != self.columns.len() {
            return false;
        }
        self.rows.push(row);
        true
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Record for DataFrame {
    const TYPE_NAME: &'static str = "DataFrame";
}
