/*
 * 장기 (朝鲜象棋) 棋盘模块
 *
 * 设计要点
 * - 棋盘尺寸为 9 列 x 10 行，坐标 (x, y)，x 为列、y 为行，均从 0 开始
 * - 汉方 (Han) 在上 (行 0..=3)，楚方 (Cho) 在下 (行 6..=9)
 * - 棋子用 Piece { side, kind } 表示，空格为 None，所属方与棋种各自独立判断
 * - Board 只保存棋子排布；轮到哪一方由 Engine 维护
 * - 搜索时通过 apply 生成独立的新棋盘，分支之间互不影响
 */

use std::fmt;

use crate::error::MoveError;

pub const BOARD_WIDTH: i32 = 9;
pub const BOARD_HEIGHT: i32 = 10;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Side {
    Han,
    Cho,
}

impl Side {
    pub fn next(&self) -> Side {
        match self {
            Side::Han => Side::Cho,
            Side::Cho => Side::Han,
        }
    }

    /// 兵前进方向：汉方行号增大，楚方行号减小
    pub fn forward(&self) -> i32 {
        match self {
            Side::Han => 1,
            Side::Cho => -1,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PieceKind {
    General,  // 将
    Chariot,  // 车
    Horse,    // 马
    Elephant, // 象
    Cannon,   // 炮
    Guard,    // 士
    Soldier,  // 兵
}

impl PieceKind {
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::General => 1000,
            PieceKind::Chariot => 13,
            PieceKind::Horse => 5,
            PieceKind::Elephant => 3,
            PieceKind::Cannon => 7,
            PieceKind::Guard => 3,
            PieceKind::Soldier => 2,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Piece { side, kind }
    }

    pub fn belongs_to(&self, side: Side) -> bool {
        self.side == side
    }

    pub fn is_enemy_of(&self, side: Side) -> bool {
        self.side != side
    }

    pub fn is_cannon(&self) -> bool {
        self.kind == PieceKind::Cannon
    }

    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    /// 两字母代号：首字母为所属方，次字母为棋种
    pub fn code(&self) -> &'static str {
        match (self.side, self.kind) {
            (Side::Han, PieceKind::General) => "HG",
            (Side::Han, PieceKind::Chariot) => "HC",
            (Side::Han, PieceKind::Horse) => "HM",
            (Side::Han, PieceKind::Elephant) => "HS",
            (Side::Han, PieceKind::Cannon) => "HP",
            (Side::Han, PieceKind::Guard) => "Hs",
            (Side::Han, PieceKind::Soldier) => "HJ",
            (Side::Cho, PieceKind::General) => "CG",
            (Side::Cho, PieceKind::Chariot) => "CC",
            (Side::Cho, PieceKind::Horse) => "CM",
            (Side::Cho, PieceKind::Elephant) => "CS",
            (Side::Cho, PieceKind::Cannon) => "CP",
            (Side::Cho, PieceKind::Guard) => "Cs",
            (Side::Cho, PieceKind::Soldier) => "CJ",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl From<(i32, i32)> for Position {
    fn from(value: (i32, i32)) -> Self {
        Position::new(value.0, value.1)
    }
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn is_valid(&self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH && self.y >= 0 && self.y < BOARD_HEIGHT
    }

    /// 行优先的格子序号，越界返回 None
    pub fn index(&self) -> Option<usize> {
        if self.is_valid() {
            Some((self.y * BOARD_WIDTH + self.x) as usize)
        } else {
            None
        }
    }

    /// 是否为上下左右相邻的一步
    pub fn is_orthogonal_step(&self, other: Position) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// 开局阵型，目前只有标准阵型一种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formation {
    #[default]
    Standard,
}

// 棋子是否在本方九宫内
pub fn in_palace(pos: Position, side: Side) -> bool {
    if !(3..=5).contains(&pos.x) {
        return false;
    }
    match side {
        Side::Han => (0..=2).contains(&pos.y),
        Side::Cho => (7..=9).contains(&pos.y),
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    pub cells: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

impl Default for Board {
    fn default() -> Self {
        Board::init()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
        }
    }

    // 标准开局
    pub fn init() -> Self {
        Board::new(Formation::Standard)
    }

    pub fn new(formation: Formation) -> Self {
        use PieceKind::*;

        let mut board = Board::empty();
        match formation {
            Formation::Standard => {
                let han_back = [Chariot, Horse, Elephant, Guard, General, Guard, Elephant, Horse, Chariot];
                let cho_back = [Chariot, Elephant, Horse, Guard, General, Guard, Elephant, Horse, Chariot];
                for (x, kind) in han_back.into_iter().enumerate() {
                    // 将不在底线，而在九宫中心
                    if kind != General {
                        board.set_piece(Position::new(x as i32, 0), Some(Piece::new(Side::Han, kind)));
                    }
                }
                for (x, kind) in cho_back.into_iter().enumerate() {
                    if kind != General {
                        board.set_piece(Position::new(x as i32, 9), Some(Piece::new(Side::Cho, kind)));
                    }
                }
                board.set_piece(Position::new(4, 1), Some(Piece::new(Side::Han, General)));
                board.set_piece(Position::new(4, 8), Some(Piece::new(Side::Cho, General)));
                for x in [1, 7] {
                    board.set_piece(Position::new(x, 2), Some(Piece::new(Side::Han, Cannon)));
                    board.set_piece(Position::new(x, 7), Some(Piece::new(Side::Cho, Cannon)));
                }
                for x in [0, 2, 4, 6, 8] {
                    board.set_piece(Position::new(x, 3), Some(Piece::new(Side::Han, Soldier)));
                    board.set_piece(Position::new(x, 6), Some(Piece::new(Side::Cho, Soldier)));
                }
            }
        }
        board
    }

    pub fn valid(&self, pos: Position) -> bool {
        pos.is_valid()
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.cells[pos.y as usize][pos.x as usize]
        } else {
            None
        }
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        pos.is_valid() && self.piece_at(pos).is_none()
    }

    /// 越界位置直接忽略
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.cells[pos.y as usize][pos.x as usize] = piece;
        }
    }

    /// 显示用代号：越界为 None，空格为 "--"
    pub fn unit_code(&self, pos: Position) -> Option<&'static str> {
        if !pos.is_valid() {
            return None;
        }
        Some(self.piece_at(pos).map_or("--", |p| p.code()))
    }

    // 行优先遍历某一方的所有棋子
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..BOARD_HEIGHT).flat_map(move |y| {
            (0..BOARD_WIDTH).filter_map(move |x| {
                let pos = Position::new(x, y);
                self.piece_at(pos)
                    .filter(|p| p.belongs_to(side))
                    .map(|p| (pos, p))
            })
        })
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    // 落子：起点棋子移到终点，终点原有棋子被吃掉
    // 不做合法性检查，返回被吃的棋子
    fn make_move(&mut self, m: &Move) -> Option<Piece> {
        if !m.from.is_valid() || !m.to.is_valid() {
            return None;
        }
        let piece = self.cells[m.from.y as usize][m.from.x as usize].take();
        std::mem::replace(&mut self.cells[m.to.y as usize][m.to.x as usize], piece)
    }

    /// 生成走子后的新棋盘，原棋盘不变
    pub fn apply(&self, m: &Move) -> Board {
        let mut next = self.clone();
        next.make_move(m);
        next
    }

    /// 检查并执行走子，失败时棋盘保持不变
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<Option<Piece>, MoveError> {
        if !from.is_valid() {
            return Err(MoveError::InvalidPosition(from));
        }
        if !to.is_valid() {
            return Err(MoveError::InvalidPosition(to));
        }
        if self.piece_at(from).is_none() {
            return Err(MoveError::EmptyOrigin(from));
        }
        if !self.destinations(from).contains(&to) {
            return Err(MoveError::IllegalDestination { from, to });
        }
        Ok(self.make_move(&Move::new(from, to)))
    }

    pub fn attempt_move(&mut self, from: Position, to: Position) -> bool {
        self.try_move(from, to).is_ok()
    }

    pub fn material(&self, side: Side) -> i32 {
        self.pieces(side).map(|(_, p)| p.value()).sum()
    }

    // 子力评估：楚方总分减汉方总分，正数表示楚方领先
    pub fn evaluate(&self) -> i32 {
        self.material(Side::Cho) - self.material(Side::Han)
    }
}
