use crate::board::{Position, BOARD_HEIGHT, BOARD_WIDTH};
use std::sync::LazyLock;

pub const MIN: i32 = -99999;
pub const MAX: i32 = 99999;
pub const DEFAULT_DEPTH: u32 = 3;
pub const MAX_DEPTH: u32 = 8;

/// 走子方向 (dx, dy)，y 轴向下（行号增大）
pub type Direction = (i32, i32);

// 直线方向的枚举顺序：上、下、右、左
pub const ORTHOGONAL: [Direction; 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// 每个格子的几何信息：可走的直线方向与九宫斜线方向
#[derive(Debug, Clone, Default)]
pub struct SquareGeometry {
    pub orthogonal: Vec<Direction>,
    pub diagonal: Vec<Direction>,
}

fn palace_center(pos: Position) -> Option<Position> {
    if !(3..=5).contains(&pos.x) {
        return None;
    }
    match pos.y {
        0..=2 => Some(Position::new(4, 1)),
        7..=9 => Some(Position::new(4, 8)),
        _ => None,
    }
}

// 九宫斜线只连接四角与中心
fn palace_diagonal(from: Position, dir: Direction) -> bool {
    let to = from.offset(dir.0, dir.1);
    match (palace_center(from), palace_center(to)) {
        (Some(a), Some(b)) if a == b => from == a || to == a,
        _ => false,
    }
}

pub static GEOMETRY: LazyLock<Vec<SquareGeometry>> = LazyLock::new(|| {
    let mut table = Vec::with_capacity((BOARD_WIDTH * BOARD_HEIGHT) as usize);
    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            let pos = Position::new(x, y);
            let orthogonal = ORTHOGONAL
                .iter()
                .copied()
                .filter(|&(dx, dy)| pos.offset(dx, dy).is_valid())
                .collect();
            let mut diagonal = vec![];
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx != 0 && dy != 0 && palace_diagonal(pos, (dx, dy)) {
                        diagonal.push((dx, dy));
                    }
                }
            }
            table.push(SquareGeometry { orthogonal, diagonal });
        }
    }
    table
});

/// 查询某个格子的几何信息，越界时返回空表
pub fn geometry(pos: Position) -> &'static SquareGeometry {
    static EMPTY: SquareGeometry = SquareGeometry {
        orthogonal: Vec::new(),
        diagonal: Vec::new(),
    };
    match pos.index() {
        Some(idx) => &GEOMETRY[idx],
        None => &EMPTY,
    }
}

/// 是否存在从 pos 沿 dir 的九宫斜线
pub fn has_diagonal(pos: Position, dir: Direction) -> bool {
    geometry(pos).diagonal.contains(&dir)
}
