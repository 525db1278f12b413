use std::fmt;

use crate::games::RandomSource;
use super::types::Cell;

/// Smallest column count that fits the three-segment starting snake left of center.
pub const MIN_COLUMNS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    ZeroBlock,
    ZeroSized { width: u32, height: u32 },
    Misaligned { width: u32, height: u32, block: u32 },
    TooSmall { columns: u32 },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ZeroBlock => write!(f, "block size must be greater than 0"),
            BoardError::ZeroSized { width, height } => {
                write!(f, "board must not be zero-sized (got {}x{})", width, height)
            }
            BoardError::Misaligned { width, height, block } => write!(
                f,
                "board {}x{} is not a multiple of block size {}",
                width, height, block
            ),
            BoardError::TooSmall { columns } => write!(
                f,
                "board has {} columns, at least {} are needed",
                columns, MIN_COLUMNS
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// Immutable grid of `width x height` pixels split into `block`-sized cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    block: u32,
}

impl Board {
    pub fn new(width: u32, height: u32, block: u32) -> Result<Self, BoardError> {
        if block == 0 {
            return Err(BoardError::ZeroBlock);
        }
        if width == 0 || height == 0 {
            return Err(BoardError::ZeroSized { width, height });
        }
        if width % block != 0 || height % block != 0 {
            return Err(BoardError::Misaligned { width, height, block });
        }
        let columns = width / block;
        if columns < MIN_COLUMNS {
            return Err(BoardError::TooSmall { columns });
        }
        Ok(Self { width, height, block })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn block(&self) -> u32 {
        self.block
    }

    pub fn columns(&self) -> u32 {
        self.width / self.block
    }

    pub fn rows(&self) -> u32 {
        self.height / self.block
    }

    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    pub fn is_aligned(&self, cell: Cell) -> bool {
        let block = self.block as i32;
        cell.x.rem_euclid(block) == 0 && cell.y.rem_euclid(block) == 0
    }

    /// Cell at column/row coordinates.
    pub fn cell_at(&self, column: u32, row: u32) -> Cell {
        Cell::new((column * self.block) as i32, (row * self.block) as i32)
    }

    /// Grid-aligned center; for 640x480 at block 20 this is (320, 240).
    pub fn center(&self) -> Cell {
        self.cell_at(self.columns() / 2, self.rows() / 2)
    }

    pub fn random_cell(&self, rng: &mut impl RandomSource) -> Cell {
        let column = rng.next_int(self.columns());
        let row = rng.next_int(self.rows());
        self.cell_at(column, row)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.columns()).map(move |column| self.cell_at(column, row)))
    }
}
