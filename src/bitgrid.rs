//! A dynamically sized bit-packed grid.
//!
//! Boards are `width`×`height` rectangles chosen at run time, stored as one
//! unsigned word `T` per row. The type is `no_std` friendly; the only
//! allocation is the row vector made at construction. Constructors and the
//! basic cell operations are provided.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitGridError {
    /// Requested width exceeds the bit capacity of the row word `T`.
    WidthTooLarge { width: u16, capacity: usize },
    /// Row or column index is outside the grid.
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitGridError::WidthTooLarge { width, capacity } => {
                write!(f, "WidthTooLarge: width={} exceeds T::BITS={}", width, capacity)
            }
            BitGridError::OutOfBounds { row, col } => {
                write!(f, "OutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// A `width`×`height` grid of booleans, each row packed into a word `T`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    width: u16,
    height: u16,
    rows: Vec<T>,
}

impl<T> BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Create an empty grid. Fails with `WidthTooLarge` when a row does not
    /// fit in `T`.
    pub fn new(width: u16, height: u16) -> Result<Self, BitGridError> {
        let capacity = mem::size_of::<T>() * 8;
        if width as usize > capacity {
            return Err(BitGridError::WidthTooLarge { width, capacity });
        }
        Ok(BitGrid {
            width,
            height,
            rows: vec![T::zero(); height as usize],
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns the number of set cells.
    pub fn count_ones(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.is_zero())
    }

    /// Gets the cell at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitGridError> {
        self.check_bounds(row, col)?;
        Ok(((self.rows[row] >> col) & T::one()) != T::zero())
    }

    /// Sets the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitGridError> {
        self.check_bounds(row, col)?;
        self.rows[row] = self.rows[row] | (T::one() << col);
        Ok(())
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), BitGridError> {
        if row >= self.height as usize || col >= self.width as usize {
            Err(BitGridError::OutOfBounds { row, col })
        } else {
            Ok(())
        }
    }

    /// Iterator over the set cells in row-major order.
    pub fn iter_set(&self) -> SetCells<'_, T> {
        SetCells {
            grid: self,
            row: 0,
            col: 0,
        }
    }
}

impl<T> fmt::Debug for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BitGrid<{}> {}x{}:",
            any::type_name::<T>(),
            self.width,
            self.height
        )?;
        fmt::Display::fmt(self, f)
    }
}

impl<T> fmt::Display for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height as usize {
            for c in 0..self.width as usize {
                let cell = if ((self.rows[r] >> c) & T::one()) != T::zero() {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", cell)?;
            }
            if r + 1 < self.height as usize {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set cells of a grid.
pub struct SetCells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    grid: &'a BitGrid<T>,
    row: usize,
    col: usize,
}

impl<'a, T> Iterator for SetCells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.row < self.grid.height as usize {
            let (r, c) = (self.row, self.col);
            self.col += 1;
            if self.col >= self.grid.width as usize {
                self.col = 0;
                self.row += 1;
            }
            if ((self.grid.rows[r] >> c) & T::one()) != T::zero() {
                return Some((r, c));
            }
        }
        None
    }
}

/// Row word wide enough for any board the default limits accept.
pub type Mask = BitGrid<u32>;
