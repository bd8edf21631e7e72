//! Text maze layouts.
//!
//! | char | meaning         |
//! |------|-----------------|
//! | `%`  | wall            |
//! | `.`  | food            |
//! | `o`  | capsule         |
//! | `G`  | hazard (ghost)  |
//! | `P`  | agent           |
//! | ` `  | empty           |
//!
//! The first text row is the top of the maze (largest `y`).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    grid::{Cell, Grid},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub walls: Vec<Cell>,
    pub food: Vec<Cell>,
    pub capsules: Vec<Cell>,
    pub hazards: Vec<Cell>,
    pub agent: Cell,
}

impl Layout {
    /// Parse a layout from text.
    ///
    /// Trailing blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLayout`], [`Error::RaggedLayout`],
    /// [`Error::InvalidLayoutCharacter`] or [`Error::AgentCount`].
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|r| r.trim().is_empty()) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(Error::EmptyLayout);
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut layout = Layout {
            width,
            height,
            walls: Vec::new(),
            food: Vec::new(),
            capsules: Vec::new(),
            hazards: Vec::new(),
            agent: Cell::new(0, 0),
        };
        let mut agents = 0;

        for (row, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(Error::RaggedLayout {
                    row,
                    expected: width,
                    got,
                });
            }
            let y = (height - 1 - row) as i32;
            for (column, character) in line.chars().enumerate() {
                let cell = Cell::new(column as i32, y);
                match character {
                    '%' => layout.walls.push(cell),
                    '.' => layout.food.push(cell),
                    'o' => layout.capsules.push(cell),
                    'G' => layout.hazards.push(cell),
                    'P' => {
                        layout.agent = cell;
                        agents += 1;
                    }
                    ' ' => {}
                    _ => {
                        return Err(Error::InvalidLayoutCharacter {
                            character,
                            row,
                            column,
                        });
                    }
                }
            }
        }

        if agents != 1 {
            return Err(Error::AgentCount { found: agents });
        }
        Ok(layout)
    }

    /// Read and parse a layout file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or any parse error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read layout {}", path.display()),
            source,
        })?;
        Self::parse(&text)
    }

    /// The four corner cells: south-west, south-east, north-west, north-east.
    pub fn corners(&self) -> Vec<Cell> {
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        vec![
            Cell::new(0, 0),
            Cell::new(max_x, 0),
            Cell::new(0, max_y),
            Cell::new(max_x, max_y),
        ]
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height, self.walls.iter().copied())
    }
}
