/*
 * Search State Module - 固定深度的极小极大搜索
 *
 * - 评估值以楚方为正：轮到楚方的节点取最大，轮到汉方的节点取最小
 * - 每个分支在自己的棋盘副本上展开，返回时副本自动释放
 * - 可选 Alpha-Beta 剪枝；根节点可用 Rayon 并行展开，结果按生成顺序合并
 * - 同分时取先生成的走法
 */

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::board::{Board, Move, Side};
use crate::constant::{MAX, MIN};
use crate::engine::EngineConfig;

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: u32,
    /// 搜索节点数
    pub nodes: u64,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    pub depth: u32,
    pub alpha_beta: bool,
    pub parallel: bool,
    /// 搜索节点计数器
    pub counter: u64,
}

fn is_maximizing(side: Side) -> bool {
    side == Side::Cho
}

// 对 mover 来说 score 是否比 best 更好，同分不替换
fn improves(maximizing: bool, score: i32, best: i32) -> bool {
    if maximizing {
        score > best
    } else {
        score < best
    }
}

impl SearchState {
    pub fn new(config: &EngineConfig) -> Self {
        SearchState {
            depth: config.depth,
            alpha_beta: config.alpha_beta,
            parallel: config.parallel,
            counter: 0,
        }
    }

    fn child(&self) -> Self {
        SearchState {
            depth: self.depth,
            alpha_beta: self.alpha_beta,
            parallel: false,
            counter: 0,
        }
    }

    /// 为 side 选出最佳走法；无子可走或深度为 0 时返回 None
    pub fn search(&mut self, board: &Board, side: Side) -> Option<SearchResult> {
        self.counter = 1;
        if self.depth == 0 {
            return None;
        }
        let moves = board.generate_move(side);
        if moves.is_empty() {
            debug!(?side, "no legal moves at root");
            return None;
        }

        // 并行时各分支独立搜索，collect 保持原有顺序
        let presearched: Option<Vec<(i32, u64)>> = if self.parallel {
            let template = self.child();
            let depth = self.depth;
            Some(
                moves
                    .par_iter()
                    .map(|m| {
                        let mut worker = template.clone();
                        let score = worker.minimax(&board.apply(m), side.next(), depth - 1, MIN, MAX);
                        (score, worker.counter)
                    })
                    .collect(),
            )
        } else {
            None
        };

        let maximizing = is_maximizing(side);
        let (mut alpha, mut beta) = (MIN, MAX);
        let mut best: Option<(Move, i32)> = None;
        for (i, m) in moves.iter().enumerate() {
            let score = match &presearched {
                Some(results) => {
                    self.counter += results[i].1;
                    results[i].0
                }
                None => self.minimax(&board.apply(m), side.next(), self.depth - 1, alpha, beta),
            };
            trace!(%m, score, "root candidate");

            let better = match best {
                None => true,
                Some((_, best_score)) => improves(maximizing, score, best_score),
            };
            if better {
                best = Some((*m, score));
                if self.alpha_beta {
                    if maximizing {
                        alpha = alpha.max(score);
                    } else {
                        beta = beta.min(score);
                    }
                }
            }
        }

        let (best_move, score) = best?;
        debug!(
            ?side,
            depth = self.depth,
            score,
            nodes = self.counter,
            best = %best_move,
            "search finished"
        );
        Some(SearchResult {
            best_move,
            score,
            depth: self.depth,
            nodes: self.counter,
        })
    }

    // 返回以楚方为正的分数；alpha/beta 只在开启剪枝时收紧
    fn minimax(&mut self, board: &Board, side: Side, depth: u32, mut alpha: i32, mut beta: i32) -> i32 {
        self.counter += 1;
        if depth == 0 {
            return board.evaluate();
        }
        let moves = board.generate_move(side);
        // 无子可走时按静态评估处理
        if moves.is_empty() {
            return board.evaluate();
        }

        let maximizing = is_maximizing(side);
        let mut best = if maximizing { MIN } else { MAX };
        for m in moves {
            let score = self.minimax(&board.apply(&m), side.next(), depth - 1, alpha, beta);
            if maximizing {
                best = best.max(score);
                if self.alpha_beta {
                    alpha = alpha.max(score);
                }
            } else {
                best = best.min(score);
                if self.alpha_beta {
                    beta = beta.min(score);
                }
            }
            if self.alpha_beta && alpha >= beta {
                break;
            }
        }
        best
    }
}
