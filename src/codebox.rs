//! The program grid.

use std::ops::{Add, Rem};

use crate::instruction::{Instruction, Scanner, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XY<A> {
    pub x: A,
    pub y: A
}

impl<A> XY<A> {
    pub fn new (x: A, y: A) -> Self {
        XY { x, y }
    }
}

impl<A: Add<Output = A>> Add for XY<A> {
    type Output = Self;
    fn add (self, other: Self) -> Self {
        XY::new(self.x + other.x, self.y + other.y)
    }
}

/// Toroidal remainder: the result always lies in `0..bounds`.
impl Rem for XY<isize> {
    type Output = Self;
    fn rem (self, bounds: Self) -> Self {
        XY::new(self.x.rem_euclid(bounds.x), self.y.rem_euclid(bounds.y))
    }
}

impl<'a> Rem for &'a XY<isize> {
    type Output = XY<isize>;
    fn rem (self, bounds: Self) -> Self::Output {
        *self % *bounds
    }
}

pub type Coord = XY<isize>;

/// A rectangular, immutable grid of symbols addressed with wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebox {
    grid: Vec<Vec<Symbol>>,
    bounds: Coord
}

impl Codebox {
    /// Lexes source text and builds the padded grid.
    pub fn parse (src: &str) -> Self {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        for symbol in Scanner::new(src) {
            match symbol.instruction {
                Instruction::EndOfLine => rows.push(std::mem::take(&mut row)),
                Instruction::EndOfInput => break,
                _ => row.push(symbol),
            }
        }
        // A trailing line break does not open another row.
        if !row.is_empty() {
            rows.push(row);
        }
        Codebox::from_rows(rows)
    }

    /// Right-pads already lexed rows with blanks up to the longest row.
    pub fn from_rows (mut grid: Vec<Vec<Symbol>>) -> Self {
        let width = grid.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in grid.iter_mut() {
            row.resize(width, Symbol::blank());
        }
        let bounds = XY::new(width as isize, grid.len() as isize);
        Codebox { grid, bounds }
    }

    pub fn width (&self) -> isize {
        self.bounds.x
    }

    pub fn height (&self) -> isize {
        self.bounds.y
    }

    pub fn bounds (&self) -> Coord {
        self.bounds
    }

    pub fn is_empty (&self) -> bool {
        self.bounds.x == 0 || self.bounds.y == 0
    }

    /// Whether `coord` addresses a cell without wrapping.
    pub fn contains (&self, coord: &Coord) -> bool {
        (0..self.bounds.x).contains(&coord.x) && (0..self.bounds.y).contains(&coord.y)
    }

    /// The symbol at `coord`, wrapping on every edge. `None` only for an
    /// empty grid.
    pub fn lookup (&self, coord: &Coord) -> Option<Symbol> {
        if self.is_empty() { return None; }
        let coord = coord % &self.bounds;
        let row = self.grid.get(coord.y as usize)?;
        row.get(coord.x as usize).copied()
    }

    pub fn at (&self, x: isize, y: isize) -> Option<Symbol> {
        self.lookup(&XY::new(x, y))
    }

    pub fn rows (&self) -> impl Iterator<Item = &[Symbol]> {
        self.grid.iter().map(|r| r.as_slice())
    }
}
