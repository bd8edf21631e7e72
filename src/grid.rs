//! Grid geometry: cells, cardinal directions, wall-aware bounds and dense
//! per-cell tables.
//!
//! Coordinates follow the maze convention: `x` grows to the east, `y` grows to
//! the north, and `(0, 0)` is the south-west corner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The adjacent cell in `direction`, with no bounds or wall checks.
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four cardinal movement directions.
///
/// The no-op "stop" action is deliberately not representable: callers filter
/// it out before the planner sees the legal move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed evaluation order. Ties in action selection resolve to the
    /// earliest direction in this list.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step `(dx, dy)` for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// The two directions at right angles to this one.
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::North | Direction::South => [Direction::East, Direction::West],
            Direction::East | Direction::West => [Direction::North, Direction::South],
        }
    }

    pub const fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub const fn arrow(self) -> char {
        match self {
            Direction::North => '^',
            Direction::South => 'v',
            Direction::East => '>',
            Direction::West => '<',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        };
        f.write_str(name)
    }
}

/// Rectangular grid bounds plus the wall set for one decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    walls: Vec<bool>,
}

impl Grid {
    /// Create a grid of the given size. Walls outside the bounds are ignored.
    pub fn new<I>(width: usize, height: usize, walls: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = Grid {
            width,
            height,
            walls: vec![false; width * height],
        };
        for wall in walls {
            if let Some(idx) = grid.index(wall) {
                grid.walls[idx] = true;
            }
        }
        grid
    }

    /// Derive the bounds from the environment's corner coordinates:
    /// `width = 1 + max x`, `height = 1 + max y`.
    pub fn from_corners<I>(corners: &[Cell], walls: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let width = corners.iter().map(|c| c.x + 1).max().unwrap_or(0).max(0) as usize;
        let height = corners.iter().map(|c| c.y + 1).max().unwrap_or(0).max(0) as usize;
        Self::new(width, height, walls)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Flat index of an in-bounds cell.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        flat_index(self.width, self.height, cell)
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        cell_from_index(self.width, index)
    }

    /// True for an in-bounds wall cell.
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|idx| self.walls[idx])
    }

    /// True when the agent cannot occupy `cell`: a wall or off the grid.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.index(cell).is_none_or(|idx| self.walls[idx])
    }

    /// Destination of a move from `from` in `direction`. Moves into a wall or
    /// off the grid fail silently and leave the agent where it was.
    pub fn step(&self, from: Cell, direction: Direction) -> Cell {
        let to = from.offset(direction);
        if self.is_blocked(to) { from } else { to }
    }

    /// Number of orthogonal neighbours that are walls or off the grid.
    pub fn blocked_neighbours(&self, cell: Cell) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&d| self.is_blocked(cell.offset(d)))
            .count()
    }

    /// Directions whose move from `cell` is not blocked.
    pub fn open_directions(&self, cell: Cell) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| !self.is_blocked(cell.offset(d)))
            .collect()
    }

    /// All non-wall cells.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len())
            .filter(|&idx| !self.walls[idx])
            .map(|idx| self.cell_at(idx))
    }
}

/// Row-major index of `cell` in a `width * height` table.
fn flat_index(width: usize, height: usize, cell: Cell) -> Option<usize> {
    let x = usize::try_from(cell.x).ok().filter(|&x| x < width)?;
    let y = usize::try_from(cell.y).ok().filter(|&y| y < height)?;
    Some(y * width + x)
}

fn cell_from_index(width: usize, index: usize) -> Cell {
    Cell::new((index % width) as i32, (index / width) as i32)
}

/// Dense per-cell table sized `width * height`.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMap<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> CellMap<T> {
    pub fn filled(grid: &Grid, value: T) -> Self {
        CellMap {
            width: grid.width(),
            height: grid.height(),
            data: vec![value; grid.len()],
        }
    }
}

impl<T> CellMap<T> {
    fn index(&self, cell: Cell) -> Option<usize> {
        flat_index(self.width, self.height, cell)
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index(cell).map(|idx| &self.data[idx])
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.index(cell).map(|idx| &mut self.data[idx])
    }

    /// Store `value` at `cell`. Out-of-bounds writes are dropped.
    pub fn set(&mut self, cell: Cell, value: T) {
        if let Some(slot) = self.get_mut(cell) {
            *slot = value;
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Iterate `(cell, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, value)| (cell_from_index(width, idx), value))
    }
}

impl CellMap<f64> {
    /// Value at `cell`, or 0.0 for anything outside the table.
    pub fn value(&self, cell: Cell) -> f64 {
        self.get(cell).copied().unwrap_or(0.0)
    }
}
