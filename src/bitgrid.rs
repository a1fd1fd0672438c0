//! A fixed-size bit grid using const generics.
//!
//! The type is `no_std` friendly and avoids heap allocations. A `W×H` grid is
//! stored as `W` column words of type `T`, bit `y` of column `x` being cell
//! `(x, y)`. That is the same layout the LED matrix driver consumes, but it is
//! an implementation detail: callers only ever address cells.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by grid operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Requested column height exceeds the capacity of `T`.
    SizeTooLarge { height: usize, capacity: usize },
    /// Column or row index is out of bounds.
    IndexOutOfBounds { x: usize, y: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::SizeTooLarge { height, capacity } => {
                write!(f, "SizeTooLarge: H={} exceeds T::BITS={}", height, capacity)
            }
            GridError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
        }
    }
}

/// A `W`-column by `H`-row boolean grid, one `T` word per column.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitGrid<T, const W: usize, const H: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    columns: [T; W],
}

impl<T, const W: usize, const H: usize> BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn row_mask() -> T {
        if H >= mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << H) - T::one()
        }
    }

    /// Create an empty grid without the size check.
    #[inline]
    pub fn new() -> Self {
        BitGrid {
            columns: [T::zero(); W],
        }
    }

    /// Fallible constructor: `Err(SizeTooLarge)` if `H` rows do not fit in `T`.
    pub fn try_new() -> Result<Self, GridError> {
        let capacity = mem::size_of::<T>() * 8;
        if H > capacity {
            Err(GridError::SizeTooLarge {
                height: H,
                capacity,
            })
        } else {
            Ok(Self::new())
        }
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.columns.iter().map(|c| c.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.is_zero())
    }

    /// Gets the cell at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Result<bool, GridError> {
        self.check_bounds(x, y)?;
        Ok(((self.columns[x] >> y) & T::one()) != T::zero())
    }

    /// Sets the cell at (x, y).
    pub fn set(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.check_bounds(x, y)?;
        self.columns[x] = self.columns[x] | (T::one() << y);
        Ok(())
    }

    /// Clears the cell at (x, y).
    pub fn clear(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.check_bounds(x, y)?;
        self.columns[x] = self.columns[x] & !(T::one() << y);
        Ok(())
    }

    /// Toggles the cell at (x, y).
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.check_bounds(x, y)?;
        self.columns[x] = self.columns[x] ^ (T::one() << y);
        Ok(())
    }

    /// Clears every cell.
    #[inline]
    pub fn clear_all(&mut self) {
        self.columns = [T::zero(); W];
    }

    /// Cells of column `x` as a bitmask, bit `y` being row `y`.
    pub fn column(&self, x: usize) -> Result<T, GridError> {
        if x >= W {
            return Err(GridError::IndexOutOfBounds { x, y: 0 });
        }
        Ok(self.columns[x])
    }

    #[inline]
    fn check_bounds(&self, x: usize, y: usize) -> Result<(), GridError> {
        if x >= W || y >= H {
            Err(GridError::IndexOutOfBounds { x, y })
        } else {
            Ok(())
        }
    }

    /// Builds a grid from an iterator over `(x, y)` cells.
    pub fn from_iter<I>(iter: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new();
        for (x, y) in iter {
            grid.set(x, y)?;
        }
        Ok(grid)
    }

    /// Iterator over the set cells, column by column.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T, W, H> {
        SetBits { grid: self, idx: 0 }
    }

    fn map(self, f: impl Fn(T) -> T) -> Self {
        let mask = Self::row_mask();
        let mut columns = self.columns;
        for c in columns.iter_mut() {
            *c = f(*c) & mask;
        }
        BitGrid { columns }
    }

    fn zip(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        let mut columns = self.columns;
        for (c, r) in columns.iter_mut().zip(rhs.columns) {
            *c = f(*c, r);
        }
        BitGrid { columns }
    }
}

impl<T, const W: usize, const H: usize> Default for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const W: usize, const H: usize> fmt::Debug for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitGrid<{}x{}>[", W, H)?;
        for (x, y) in self.iter_set_bits() {
            write!(f, "({},{})", x, y)?;
        }
        write!(f, "]")
    }
}

/// Row by row, `■` for set cells, matching how the matrix is viewed.
impl<T, const W: usize, const H: usize> fmt::Display for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..H {
            for x in 0..W {
                let on = ((self.columns[x] >> y) & T::one()) != T::zero();
                write!(f, "{} ", if on { '■' } else { '□' })?;
            }
            if y + 1 < H {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set cells of a grid.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T, const W: usize, const H: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    grid: &'a BitGrid<T, W, H>,
    idx: usize,
}

impl<'a, T, const W: usize, const H: usize> Iterator for SetBits<'a, T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < W * H {
            let (x, y) = (self.idx / H, self.idx % H);
            self.idx += 1;
            if ((self.grid.columns[x] >> y) & T::one()) != T::zero() {
                return Some((x, y));
            }
        }
        None
    }
}

impl<T, const W: usize, const H: usize> BitAnd for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a & b)
    }
}

impl<T, const W: usize, const H: usize> BitOr for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a | b)
    }
}

impl<T, const W: usize, const H: usize> BitXor for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a ^ b)
    }
}

/// Inverts every cell; bits above row `H` stay clear.
impl<T, const W: usize, const H: usize> Not for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        self.map(|c| !c)
    }
}

impl<T, const W: usize, const H: usize> BitAndAssign for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<T, const W: usize, const H: usize> BitOrAssign for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl<T, const W: usize, const H: usize> BitXorAssign for BitGrid<T, W, H>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}
