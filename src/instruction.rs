//! Character to instruction classification.
//!
//! Every character of a ><> program is significant, so lexing is a straight
//! table lookup; the only structure is line splitting.

use std::iter::Peekable;
use std::str::Chars;

/// The six mirror kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirror {
    /// `/`
    Forward,
    /// `\`
    Backward,
    /// `|`
    Vertical,
    /// `_`
    Horizontal,
    /// `#`
    Reverse,
    /// `x`
    Random,
}

/// A single grid cell's meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    // Cardinal
    Right,
    Left,
    Down,
    Up,

    Mirror(Mirror),

    // Conditionals
    Skip,
    SkipIf,
    Jump,

    /// `0`-`9` and `a`-`f`, holding the digit's value.
    Digit(u8),

    // Operators
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Lt,
    Gt,

    /// Both `'` and `"`. Either one opens or closes string mode.
    Quote,

    // Stack manipulation
    Duplicate,
    Remove,
    Swap,
    TopShift,
    RShift,
    LShift,
    Reverse,
    Length,
    NewStack,
    Consume,

    // I/O
    OutputChar,
    OutputNum,
    ReadNum,

    // Reflection
    Register,
    Peek,
    Poke,

    Halt,
    Whitespace,
    EndOfLine,
    EndOfInput,
}

impl Instruction {
    /// Classifies a character. Unknown characters are no-ops.
    pub fn from_char (c: char) -> Self {
        use Instruction::*;
        match c {
            '>' => Right,
            '<' => Left,
            'v' => Down,
            '^' => Up,

            '/' => Mirror(self::Mirror::Forward),
            '\\' => Mirror(self::Mirror::Backward),
            '|' => Mirror(self::Mirror::Vertical),
            '_' => Mirror(self::Mirror::Horizontal),
            '#' => Mirror(self::Mirror::Reverse),
            'x' => Mirror(self::Mirror::Random),

            '!' => Skip,
            '?' => SkipIf,
            '.' => Jump,

            '0'..='9' | 'a'..='f' => match c.to_digit(16) {
                Some(v) => Digit(v as u8),
                None => Whitespace,
            },

            '+' => Add,
            '-' => Sub,
            '*' => Mul,
            ',' => Div,
            '%' => Mod,
            '=' => Eq,
            '(' => Lt,
            ')' => Gt,
            '\'' | '"' => Quote,

            ':' => Duplicate,
            '~' => Remove,
            '$' => Swap,
            '@' => TopShift,
            '}' => RShift,
            '{' => LShift,
            'r' => Reverse,
            'l' => Length,
            '[' => NewStack,
            ']' => Consume,

            'o' => OutputChar,
            'n' => OutputNum,
            'i' => ReadNum,

            '&' => Register,
            'g' => Peek,
            'p' => Poke,

            ';' => Halt,
            '\n' => EndOfLine,
            _ => Whitespace,
        }
    }
}

/// An instruction together with the character it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub instruction: Instruction,
    pub raw: char,
}

impl Symbol {
    pub fn new (raw: char) -> Self {
        Symbol { instruction: Instruction::from_char(raw), raw }
    }

    /// The padding cell.
    pub fn blank () -> Self {
        Symbol::new(' ')
    }

    pub fn is (&self, instruction: Instruction) -> bool {
        self.instruction == instruction
    }
}

/// Yields one symbol per character, folding `\r\n` into a single
/// end-of-line, and finishes with exactly one end-of-input symbol.
pub struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new (src: &'a str) -> Self {
        Scanner { chars: src.chars().peekable(), done: false }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Symbol;

    fn next (&mut self) -> Option<Symbol> {
        if self.done { return None; }
        match self.chars.next() {
            Some('\r') if self.chars.peek() == Some(&'\n') => {
                self.chars.next();
                Some(Symbol::new('\n'))
            },
            Some(c) => Some(Symbol::new(c)),
            None => {
                self.done = true;
                Some(Symbol { instruction: Instruction::EndOfInput, raw: '\0' })
            }
        }
    }
}
