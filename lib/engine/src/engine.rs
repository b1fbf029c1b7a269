/* 引擎核心：维护棋盘与走棋方，对外提供走子和 AI 选步 */
use std::env;

use tracing::{info, warn};

use crate::board::{Board, Formation, Move, Position, Side};
use crate::constant::{DEFAULT_DEPTH, MAX_DEPTH};
use crate::error::{ConfigError, MoveError};
use crate::search::{SearchResult, SearchState};

/// 引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// 搜索深度（层数）
    pub depth: u32,
    /// 是否启用 Alpha-Beta 剪枝，不影响选出的走法
    pub alpha_beta: bool,
    /// 根节点是否并行展开
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: DEFAULT_DEPTH,
            alpha_beta: true,
            parallel: false,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Parse {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

impl EngineConfig {
    pub const DEPTH_KEY: &'static str = "JANGGI_DEPTH";
    pub const ALPHA_BETA_KEY: &'static str = "JANGGI_ALPHA_BETA";
    pub const PARALLEL_KEY: &'static str = "JANGGI_PARALLEL";

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(ConfigError::InvalidDepth(self.depth));
        }
        Ok(())
    }

    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();
        if let Some(value) = lookup(Self::DEPTH_KEY) {
            config.depth = value.trim().parse().map_err(|_| ConfigError::Parse {
                key: Self::DEPTH_KEY.to_owned(),
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(Self::ALPHA_BETA_KEY) {
            config.alpha_beta = parse_bool(Self::ALPHA_BETA_KEY, &value)?;
        }
        if let Some(value) = lookup(Self::PARALLEL_KEY) {
            config.parallel = parse_bool(Self::PARALLEL_KEY, &value)?;
        }
        config.validate()?;
        Ok(config)
    }
}

pub struct Engine {
    pub board: Board,
    pub turn: Side,
    pub config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Engine {
            board: Board::init(),
            turn: Side::Han,
            config: EngineConfig::default(),
        }
    }
}

impl Engine {
    pub fn new(formation: Formation, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine {
            board: Board::new(formation),
            turn: Side::Han,
            config,
        })
    }

    pub fn piece_code_at(&self, pos: Position) -> Option<&'static str> {
        self.board.unit_code(pos)
    }

    /// 执行走子：起点必须是当前走棋方的棋子且终点合法，成功后换边
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<Move, MoveError> {
        if let Some(piece) = self.board.piece_at(from) {
            if !piece.belongs_to(self.turn) {
                return Err(MoveError::WrongSide {
                    at: from,
                    expected: self.turn,
                });
            }
        }
        let captured = self.board.try_move(from, to)?;
        let m = Move::new(from, to);
        info!(side = ?self.turn, %m, captured = ?captured.map(|p| p.code()), "move played");
        self.turn = self.turn.next();
        Ok(m)
    }

    pub fn attempt_move(&mut self, from: Position, to: Position) -> bool {
        match self.try_move(from, to) {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, "move rejected");
                false
            }
        }
    }

    /// 为当前走棋方搜索最佳走法，不修改棋盘
    pub fn choose_move(&self) -> Option<Move> {
        self.choose_move_for(self.turn)
    }

    pub fn choose_move_for(&self, side: Side) -> Option<Move> {
        self.search(side).map(|r| r.best_move)
    }

    pub fn search(&self, side: Side) -> Option<SearchResult> {
        SearchState::new(&self.config).search(&self.board, side)
    }

    pub fn evaluate(&self) -> i32 {
        self.board.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::board::*;
    use crate::engine::*;
    use crate::error::{ConfigError, MoveError};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.depth, 3);
        assert!(config.validate().is_ok());
        assert_eq!(EngineConfig::from_lookup(|_| None), Ok(config));
    }

    #[test]
    fn test_config_from_lookup() -> anyhow::Result<()> {
        let vars = HashMap::from([
            ("JANGGI_DEPTH", "2"),
            ("JANGGI_ALPHA_BETA", "off"),
            ("JANGGI_PARALLEL", "true"),
        ]);
        let config = EngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()))?;
        assert_eq!(
            config,
            EngineConfig {
                depth: 2,
                alpha_beta: false,
                parallel: true
            }
        );
        Ok(())
    }

    #[test]
    fn test_config_errors() {
        let bad_depth = EngineConfig::from_lookup(|k| (k == "JANGGI_DEPTH").then(|| "deep".to_owned()));
        assert_eq!(
            bad_depth,
            Err(ConfigError::Parse {
                key: "JANGGI_DEPTH".to_owned(),
                value: "deep".to_owned()
            })
        );
        let zero = EngineConfig::from_lookup(|k| (k == "JANGGI_DEPTH").then(|| "0".to_owned()));
        assert_eq!(zero, Err(ConfigError::InvalidDepth(0)));
        let bad_flag = EngineConfig::from_lookup(|k| (k == "JANGGI_PARALLEL").then(|| "maybe".to_owned()));
        assert!(matches!(bad_flag, Err(ConfigError::Parse { .. })));

        let config = EngineConfig {
            depth: 99,
            ..EngineConfig::default()
        };
        assert!(Engine::new(Formation::Standard, config).is_err());
    }

    #[test]
    fn test_attempt_move_alternates_turn() {
        let mut engine = Engine::default();
        assert_eq!(engine.turn, Side::Han);
        assert!(engine.attempt_move(pos(1, 0), pos(2, 2)));
        assert_eq!(engine.turn, Side::Cho);
        assert_eq!(engine.piece_code_at(pos(2, 2)), Some("HM"));

        // 轮到楚方时不能走汉方棋子
        let before = engine.board.clone();
        assert_eq!(
            engine.try_move(pos(2, 2), pos(3, 4)),
            Err(MoveError::WrongSide {
                at: pos(2, 2),
                expected: Side::Cho
            })
        );
        assert_eq!(engine.board, before);
        assert_eq!(engine.turn, Side::Cho);

        assert!(engine.attempt_move(pos(0, 6), pos(0, 5)));
        assert_eq!(engine.turn, Side::Han);
    }

    #[test]
    fn test_attempt_move_rejected_keeps_state() {
        let mut engine = Engine::default();
        let before = engine.board.clone();
        assert!(!engine.attempt_move(pos(4, 4), pos(4, 5)));
        assert!(!engine.attempt_move(pos(1, 0), pos(3, 1)));
        assert!(!engine.attempt_move(pos(1, 0), pos(1, 11)));
        assert_eq!(engine.board, before);
        assert_eq!(engine.turn, Side::Han);
    }

    #[test]
    fn test_choose_move_is_legal_and_pure() -> anyhow::Result<()> {
        let mut engine = Engine::new(Formation::Standard, EngineConfig::default())?;
        let before = engine.board.clone();
        let m = engine.choose_move().ok_or_else(|| anyhow::anyhow!("no move"))?;
        assert_eq!(engine.board, before);
        assert!(engine.board.is_legal(&m));
        assert!(engine.board.piece_at(m.from).is_some_and(|p| p.belongs_to(Side::Han)));

        // 引擎自己走几步，子数不增加，走棋方交替
        let mut count = engine.board.piece_count();
        for _ in 0..4 {
            let side = engine.turn;
            let m = engine.choose_move().ok_or_else(|| anyhow::anyhow!("no move"))?;
            assert!(engine.attempt_move(m.from, m.to));
            assert_eq!(engine.turn, side.next());
            assert!(engine.board.piece_count() <= count);
            count = engine.board.piece_count();
        }
        Ok(())
    }

    #[test]
    fn test_depth_one_never_loses_material() -> anyhow::Result<()> {
        let config = EngineConfig {
            depth: 1,
            ..EngineConfig::default()
        };
        let engine = Engine::new(Formation::Standard, config)?;
        for side in [Side::Han, Side::Cho] {
            let m = engine.choose_move_for(side).ok_or_else(|| anyhow::anyhow!("no move"))?;
            let after = engine.board.apply(&m);
            assert!(after.material(side) >= engine.board.material(side));
        }
        Ok(())
    }
}
