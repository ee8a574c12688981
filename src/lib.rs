//! An interpreter for ><>, a two-dimensional stack language.
//!
//! Source text is lexed into a [`Codebox`], a padded grid of
//! [`Instruction`]s addressed with wraparound. A [`Session`] walks the grid
//! with a [`Cursor`], executing one cell per step against a stack of
//! [`Stack`]s until the program halts or faults.

pub mod codebox;
pub mod cursor;
pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod io;
pub mod stack;

pub use codebox::{Codebox, Coord, XY};
pub use cursor::{Cardinal, Cursor, Direction};
pub use error::{Error, ErrorKind, Result};
pub use instruction::{Instruction, Mirror, Scanner, Symbol};
pub use interpreter::{Options, Session, Status};
pub use stack::{Stack, Stacks};
