//! The instruction pointer and its direction of travel.

use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::codebox::{Coord, XY};
use crate::instruction::Mirror;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinal {
    Up, Right, Down, Left
}

impl Cardinal {
    pub fn to_direction (&self) -> Direction {
        match self {
            Cardinal::Up => Direction(XY::new(0, -1)),
            Cardinal::Down => Direction(XY::new(0, 1)),
            Cardinal::Left => Direction(XY::new(-1, 0)),
            Cardinal::Right => Direction(XY::new(1, 0))
        }
    }

    fn from_u8 (i: u8) -> Option<Self> {
        match i {
            0 => Some(Self::Up),
            1 => Some(Self::Right),
            2 => Some(Self::Down),
            3 => Some(Self::Left),
            _ => None
        }
    }
}

impl Distribution<Cardinal> for Standard {
    fn sample<R: Rng + ?Sized> (&self, rng: &mut R) -> Cardinal {
        Cardinal::from_u8(rng.gen_range(0..4)).unwrap_or(Cardinal::Right)
    }
}

/// One of the four unit vectors. Only `Cardinal` and mirror reflection
/// produce values, so a direction is never zero or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction(XY<isize>);

impl Direction {
    pub fn dx (&self) -> isize {
        self.0.x
    }

    pub fn dy (&self) -> isize {
        self.0.y
    }

    pub fn vector (&self) -> XY<isize> {
        self.0
    }

    /// Reflects through a fixed mirror. `Random` leaves the direction as is;
    /// it needs a source of randomness, see [`Cursor::mirror`].
    pub fn reflect (self, mirror: Mirror) -> Self {
        let XY { x: dx, y: dy } = self.0;
        let (x, y) = match mirror {
            Mirror::Forward => (-dy, -dx),
            Mirror::Backward => (dy, dx),
            Mirror::Vertical => (-dx, dy),
            Mirror::Horizontal => (dx, -dy),
            Mirror::Reverse => (-dx, -dy),
            Mirror::Random => (dx, dy),
        };
        Direction(XY::new(x, y))
    }
}

impl From<Cardinal> for Direction {
    fn from (c: Cardinal) -> Self {
        c.to_direction()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub position: Coord,
    pub direction: Direction
}

impl Cursor {
    /// Top-left, heading right.
    pub fn initial () -> Self {
        Cursor {
            position: XY::new(0, 0),
            direction: Cardinal::Right.to_direction()
        }
    }

    /// Steps once along the current direction, wrapping inside `bounds`.
    /// Bounds with a zero dimension leave the position untouched.
    pub fn advance (&mut self, bounds: Coord) {
        if bounds.x == 0 || bounds.y == 0 { return; }
        self.position = (self.position + self.direction.vector()) % bounds;
    }

    pub fn turn (&mut self, cardinal: Cardinal) {
        self.direction = cardinal.to_direction();
    }

    pub fn mirror<R: Rng + ?Sized> (&mut self, mirror: Mirror, rng: &mut R) {
        self.direction = match mirror {
            Mirror::Random => rng.gen::<Cardinal>().to_direction(),
            fixed => self.direction.reflect(fixed),
        };
    }

    /// Moves straight to `target`, wrapping it into `bounds`.
    pub fn jump (&mut self, target: Coord, bounds: Coord) {
        if bounds.x == 0 || bounds.y == 0 { return; }
        self.position = target % bounds;
    }
}
