//! Common test utilities for the gridplan test suite.
//!
//! Snapshot builders for the small hand-made mazes used across tests.

#![allow(dead_code)]

use gridplan::{Cell, Direction, Hazard, Snapshot};

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Corner list for a `width` x `height` grid.
pub fn corners(width: i32, height: i32) -> Vec<Cell> {
    vec![
        Cell::new(0, 0),
        Cell::new(width - 1, 0),
        Cell::new(0, height - 1),
        Cell::new(width - 1, height - 1),
    ]
}

/// Open grid with no walls, legal moves derived from the bounds.
pub fn open_snapshot(width: i32, height: i32, agent: Cell, food: Vec<Cell>) -> Snapshot {
    let legal = Direction::ALL
        .into_iter()
        .filter(|&d| {
            let next = agent.offset(d);
            next.x >= 0 && next.y >= 0 && next.x < width && next.y < height
        })
        .collect();
    Snapshot {
        agent,
        legal,
        walls: Vec::new(),
        food,
        capsules: Vec::new(),
        hazards: Vec::new(),
        corners: corners(width, height),
    }
}

/// Horizontal corridor of `length` open cells on `y = 1`, walled on every
/// side. The open cells run from `x = 1` to `x = length`.
pub fn corridor_snapshot(length: i32, agent_x: i32) -> Snapshot {
    let width = length + 2;
    let mut walls = Vec::new();
    for x in 0..width {
        walls.push(Cell::new(x, 0));
        walls.push(Cell::new(x, 2));
    }
    walls.push(Cell::new(0, 1));
    walls.push(Cell::new(width - 1, 1));

    let mut legal = Vec::new();
    if agent_x > 1 {
        legal.push(Direction::West);
    }
    if agent_x < length {
        legal.push(Direction::East);
    }

    Snapshot {
        agent: Cell::new(agent_x, 1),
        legal,
        walls,
        food: Vec::new(),
        capsules: Vec::new(),
        hazards: Vec::new(),
        corners: corners(width, 3),
    }
}

pub fn with_hazards(mut snapshot: Snapshot, hazards: Vec<Hazard>) -> Snapshot {
    snapshot.hazards = hazards;
    snapshot
}
