/*!
 * 장기 (朝鲜象棋) 引擎核心库入口
 *
 * 说明
 * - board: 棋盘、棋子、坐标与走子
 * - constant: 常量与九宫几何表
 * - movegen: 七种棋子的走法生成
 * - search: 固定深度的极小极大搜索
 * - engine: 对外的引擎接口与配置
 * - error: 错误类型
 */
pub mod board;
pub mod constant;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod search;

pub use board::{Board, Formation, Move, Piece, PieceKind, Position, Side};
pub use engine::{Engine, EngineConfig};
pub use error::{ConfigError, MoveError};
pub use search::{SearchResult, SearchState};
