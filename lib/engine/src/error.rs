use thiserror::Error;

use crate::board::{Position, Side};

/// 走子被拒绝的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("position {0} is outside the board")]
    InvalidPosition(Position),

    #[error("no piece at {0}")]
    EmptyOrigin(Position),

    #[error("piece at {at} does not belong to {expected:?}")]
    WrongSide { at: Position, expected: Side },

    #[error("{from} cannot move to {to}")]
    IllegalDestination { from: Position, to: Position },
}

/// 引擎配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search depth {0} is out of range")]
    InvalidDepth(u32),

    #[error("cannot parse {key}={value:?}")]
    Parse { key: String, value: String },
}
