//! Interpreter faults.
//!
//! ><> only has one acceptable error message, so the host prints the same
//! line for every fault and tells them apart through [`ErrorKind::exit_code`].

use std::io;

use thiserror::Error;

use crate::instruction::Symbol;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid instruction {:?} ({:?})", .symbol.raw, .symbol.instruction)]
    InvalidInstruction { symbol: Symbol },

    #[error("stack underflow: needed {required}, had {available}")]
    StackUnderflow { required: usize, available: usize },

    #[error("malformed numeric input: {0:?}")]
    InvalidInput(String),

    #[error("input exhausted")]
    InputExhausted,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn underflow (required: usize, available: usize) -> Self {
        Error::StackUnderflow { required, available }
    }

    pub fn kind (&self) -> ErrorKind {
        match self {
            Error::DivisionByZero => ErrorKind::DivisionByZero,
            Error::InvalidInstruction { .. } => ErrorKind::InvalidInstruction,
            Error::StackUnderflow { .. } => ErrorKind::StackUnderflow,
            Error::InvalidInput(_) | Error::InputExhausted => ErrorKind::InvalidInput,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Flat fault classification carried by a faulted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DivisionByZero,
    InvalidInstruction,
    StackUnderflow,
    InvalidInput,
    Io,
}

impl ErrorKind {
    pub fn exit_code (&self) -> i32 {
        match self {
            ErrorKind::DivisionByZero => 2,
            ErrorKind::InvalidInstruction => 3,
            ErrorKind::StackUnderflow => 4,
            ErrorKind::InvalidInput => 5,
            ErrorKind::Io => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_exit_code () {
        let kinds = [
            ErrorKind::DivisionByZero,
            ErrorKind::InvalidInstruction,
            ErrorKind::StackUnderflow,
            ErrorKind::InvalidInput,
            ErrorKind::Io,
        ];
        let mut codes: Vec<i32> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        // 0 is success and 1 is left for load failures.
        assert!(codes.iter().all(|&c| c > 1));
    }

    #[test]
    fn exhausted_input_is_an_input_fault () {
        assert_eq!(Error::InputExhausted.kind(), ErrorKind::InvalidInput);
        assert_eq!(Error::underflow(2, 1).kind(), ErrorKind::StackUnderflow);
        assert_eq!(Error::underflow(2, 1).to_string(), "stack underflow: needed 2, had 1");
    }
}
