//! Trend direction and the flip signal handed to order execution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the Supertrend: following the lower band (up) or the upper band (down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_trend_up(trend_up: bool) -> Self {
        if trend_up {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Order side an execution collaborator should use for this direction.
    pub fn side(self) -> OrderSide {
        match self {
            Direction::Up => OrderSide::Buy,
            Direction::Down => OrderSide::Sell,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "Buy"),
            OrderSide::Sell => write!(f, "Sell"),
        }
    }
}

/// Emitted only on the cycle where the observed direction changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSignal {
    pub direction: Direction,
}

impl TrendSignal {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn side(&self) -> OrderSide {
        self.direction.side()
    }
}
