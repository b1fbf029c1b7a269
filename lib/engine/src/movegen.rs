/*
 * 走法生成
 *
 * - 每种棋子一个生成函数：(棋盘, 起点) -> 目标格子列表
 * - 只生成伪合法走法，不检查将军
 * - 目标格子为空或有敌方棋子时可走
 * - 车、炮沿射线扫描：直线方向到棋盘边界为止，九宫斜线方向只沿斜线
 * - 生成顺序固定，搜索的同分取舍依赖这个顺序
 */

use crate::board::{in_palace, Board, Move, Piece, PieceKind, Position, Side};
use crate::constant::{geometry, has_diagonal, Direction};

// (马腿, 落点)
const HORSE_JUMPS: [(Direction, Direction); 8] = [
    ((0, -1), (-1, -2)),
    ((0, -1), (1, -2)),
    ((1, 0), (2, 1)),
    ((1, 0), (2, -1)),
    ((0, 1), (-1, 2)),
    ((0, 1), (1, 2)),
    ((-1, 0), (-2, 1)),
    ((-1, 0), (-2, -1)),
];

// (第一象腿, 第二象腿, 落点)
const ELEPHANT_JUMPS: [(Direction, Direction, Direction); 8] = [
    ((0, -1), (-1, -2), (-2, -3)),
    ((0, -1), (1, -2), (2, -3)),
    ((1, 0), (2, -1), (3, -2)),
    ((1, 0), (2, 1), (3, 2)),
    ((0, 1), (-1, 2), (-2, 3)),
    ((0, 1), (1, 2), (2, 3)),
    ((-1, 0), (-2, -1), (-3, -2)),
    ((-1, 0), (-2, 1), (-3, 2)),
];

/// 从某点出发的一条射线（不含起点）
struct Ray {
    cur: Position,
    dir: Direction,
    diagonal: bool,
}

impl Iterator for Ray {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let next = self.cur.offset(self.dir.0, self.dir.1);
        let open = if self.diagonal {
            has_diagonal(self.cur, self.dir)
        } else {
            next.is_valid()
        };
        if !open {
            return None;
        }
        self.cur = next;
        Some(next)
    }
}

// 先四个直线方向，再九宫斜线方向
fn rays(from: Position) -> impl Iterator<Item = Ray> {
    let geo = geometry(from);
    let straight = geo.orthogonal.iter().map(move |&dir| Ray {
        cur: from,
        dir,
        diagonal: false,
    });
    let slanted = geo.diagonal.iter().map(move |&dir| Ray {
        cur: from,
        dir,
        diagonal: true,
    });
    straight.chain(slanted)
}

impl Board {
    fn can_land(&self, side: Side, to: Position) -> bool {
        to.is_valid() && self.piece_at(to).map_or(true, |p| p.is_enemy_of(side))
    }

    /// 起点棋子的所有目标格子，起点为空时返回空列表
    pub fn destinations(&self, from: Position) -> Vec<Position> {
        match self.piece_at(from) {
            Some(piece) => self.generate_move_for_piece(piece, from),
            None => vec![],
        }
    }

    pub fn generate_move_for_piece(&self, piece: Piece, from: Position) -> Vec<Position> {
        let mut targets = vec![];
        let side = piece.side;
        match piece.kind {
            PieceKind::General | PieceKind::Guard => self.palace_targets(side, from, &mut targets),
            PieceKind::Chariot => self.chariot_targets(side, from, &mut targets),
            PieceKind::Cannon => self.cannon_targets(side, from, &mut targets),
            PieceKind::Horse => {
                for (leg, jump) in HORSE_JUMPS {
                    let to = from.offset(jump.0, jump.1);
                    if self.is_empty_at(from.offset(leg.0, leg.1)) && self.can_land(side, to) {
                        targets.push(to);
                    }
                }
            }
            PieceKind::Elephant => {
                for (leg1, leg2, jump) in ELEPHANT_JUMPS {
                    let to = from.offset(jump.0, jump.1);
                    if self.is_empty_at(from.offset(leg1.0, leg1.1))
                        && self.is_empty_at(from.offset(leg2.0, leg2.1))
                        && self.can_land(side, to)
                    {
                        targets.push(to);
                    }
                }
            }
            PieceKind::Soldier => self.soldier_targets(side, from, &mut targets),
        }
        targets
    }

    // 将、士：只在本方九宫内走一步，斜走必须沿九宫斜线
    fn palace_targets(&self, side: Side, from: Position, targets: &mut Vec<Position>) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let to = from.offset(dx, dy);
                if !in_palace(to, side) {
                    continue;
                }
                if dx != 0 && dy != 0 && !has_diagonal(from, (dx, dy)) {
                    continue;
                }
                if self.can_land(side, to) {
                    targets.push(to);
                }
            }
        }
    }

    // 车：遇到第一个棋子即停，敌方可吃
    fn chariot_targets(&self, side: Side, from: Position, targets: &mut Vec<Position>) {
        for ray in rays(from) {
            for to in ray {
                match self.piece_at(to) {
                    None => targets.push(to),
                    Some(p) => {
                        if p.is_enemy_of(side) {
                            targets.push(to);
                        }
                        break;
                    }
                }
            }
        }
    }

    // 炮：必须隔一个非炮的棋子（炮架）才能走或吃，不能吃炮
    fn cannon_targets(&self, side: Side, from: Position, targets: &mut Vec<Position>) {
        for ray in rays(from) {
            let mut screened = false;
            for to in ray {
                match self.piece_at(to) {
                    None => {
                        if screened {
                            targets.push(to);
                        }
                    }
                    Some(p) if p.is_cannon() => break,
                    Some(p) => {
                        if !screened {
                            screened = true;
                            continue;
                        }
                        if p.is_enemy_of(side) {
                            targets.push(to);
                        }
                        break;
                    }
                }
            }
        }
    }

    // 兵：左右和向前一步；在敌方九宫内可沿斜线向前
    fn soldier_targets(&self, side: Side, from: Position, targets: &mut Vec<Position>) {
        let forward = side.forward();
        let rows = if forward > 0 { [0, forward] } else { [forward, 0] };
        for dy in rows {
            for dx in -1..=1 {
                let to = from.offset(dx, dy);
                let palace_step = dx != 0
                    && dy == forward
                    && has_diagonal(from, (dx, dy))
                    && in_palace(to, side.next());
                if (from.is_orthogonal_step(to) || palace_step) && self.can_land(side, to) {
                    targets.push(to);
                }
            }
        }
    }

    // 生成某一方的所有走法：行优先遍历棋子，再按各棋子的生成顺序
    pub fn generate_move(&self, side: Side) -> Vec<Move> {
        self.pieces(side)
            .flat_map(|(from, piece)| {
                self.generate_move_for_piece(piece, from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    pub fn is_legal(&self, m: &Move) -> bool {
        self.destinations(m.from).contains(&m.to)
    }
}
