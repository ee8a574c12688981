//! The fetch, decode and execute loop.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::codebox::{Codebox, Coord, XY};
use crate::cursor::{Cardinal, Cursor};
use crate::error::{Error, ErrorKind, Result};
use crate::instruction::{Instruction, Symbol};
use crate::io::{format_char, format_number, NumberReader};
use crate::stack::{Stack, Stacks};

/// Per-run settings.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Seed for the random mirror. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Contents of the root stack, bottom first.
    pub initial_stack: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
    Faulted(ErrorKind),
}

/// Whether the pointer still has to take its normal step.
enum Flow {
    Advance,
    Stay,
}

/// One execution of one program. The codebox is only borrowed, so several
/// sessions can run the same grid.
pub struct Session<'a, B, W> {
    codebox: &'a Codebox,
    cursor: Cursor,
    stacks: Stacks,
    string_mode: bool,
    double_jump: bool,
    status: Status,
    scratch: HashMap<Coord, f64>,
    rng: StdRng,
    input: NumberReader<B>,
    output: W,
    steps: u64,
}

impl<'a, B: BufRead, W: Write> Session<'a, B, W> {
    pub fn new (codebox: &'a Codebox, input: B, output: W, options: Options) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session {
            codebox,
            cursor: Cursor::initial(),
            stacks: Stacks::new(Stack::from_values(options.initial_stack)),
            string_mode: false,
            double_jump: false,
            status: Status::Running,
            scratch: HashMap::new(),
            rng,
            input: NumberReader::new(input),
            output,
            steps: 0,
        }
    }

    pub fn status (&self) -> Status {
        self.status
    }

    pub fn cursor (&self) -> &Cursor {
        &self.cursor
    }

    pub fn stacks (&self) -> &Stacks {
        &self.stacks
    }

    /// The active stack.
    pub fn stack (&self) -> &Stack {
        self.stacks.active()
    }

    pub fn string_mode (&self) -> bool {
        self.string_mode
    }

    /// Instructions executed so far.
    pub fn steps (&self) -> u64 {
        self.steps
    }

    pub fn output (&self) -> &W {
        &self.output
    }

    pub fn into_output (self) -> W {
        self.output
    }

    /// Runs until the program halts or faults.
    pub fn run (&mut self) -> Result<()> {
        while self.status == Status::Running {
            self.step()?;
        }
        Ok(())
    }

    /// Runs at most `max_steps` instructions. A `Running` result means the
    /// budget ran out first.
    pub fn run_for (&mut self, max_steps: u64) -> Result<Status> {
        for _ in 0..max_steps {
            if self.status != Status::Running { break; }
            self.step()?;
        }
        Ok(self.status)
    }

    /// Executes the instruction under the cursor and moves on.
    pub fn step (&mut self) -> Result<Status> {
        if self.status != Status::Running { return Ok(self.status); }
        let flow = match self.codebox.lookup(&self.cursor.position) {
            Some(symbol) => {
                trace!(
                    x = self.cursor.position.x,
                    y = self.cursor.position.y,
                    instruction = ?symbol.instruction,
                    "step"
                );
                self.steps += 1;
                self.update(symbol)
            },
            None => {
                debug!("nothing to execute");
                self.halt().map(|_| Flow::Stay)
            }
        };
        match flow {
            Ok(Flow::Advance) => self.move_pointer(),
            Ok(Flow::Stay) => {},
            Err(e) => {
                let kind = e.kind();
                debug!(?kind, error = %e, steps = self.steps, "faulted");
                self.status = Status::Faulted(kind);
                let _ = self.output.flush();
                return Err(e);
            }
        }
        Ok(self.status)
    }

    fn halt (&mut self) -> Result<()> {
        debug!(steps = self.steps, "halted");
        self.status = Status::Halted;
        self.output.flush()?;
        Ok(())
    }

    fn move_pointer (&mut self) {
        let bounds = self.codebox.bounds();
        self.cursor.advance(bounds);
        if self.double_jump {
            self.double_jump = false;
            self.cursor.advance(bounds);
        }
    }

    fn active (&mut self) -> &mut Stack {
        self.stacks.active_mut()
    }

    fn pop (&mut self) -> Result<f64> {
        self.active().pop()
    }

    fn push (&mut self, value: f64) {
        self.active().push(value);
    }

    fn update (&mut self, symbol: Symbol) -> Result<Flow> {
        use Instruction::*;
        if self.string_mode && !symbol.is(Quote) {
            self.push(f64::from(u32::from(symbol.raw)));
            return Ok(Flow::Advance);
        }
        match symbol.instruction {
            Quote => self.string_mode = !self.string_mode,

            Right => self.cursor.turn(Cardinal::Right),
            Left => self.cursor.turn(Cardinal::Left),
            Down => self.cursor.turn(Cardinal::Down),
            Up => self.cursor.turn(Cardinal::Up),
            Mirror(mirror) => self.cursor.mirror(mirror, &mut self.rng),

            Skip => self.double_jump = true,
            SkipIf => {
                if self.pop()? == 0.0 {
                    self.double_jump = true;
                }
            },
            Jump => {
                let y = self.pop()?;
                let x = self.pop()?;
                self.cursor.jump(XY::new(x as isize, y as isize), self.codebox.bounds());
                return Ok(Flow::Stay);
            },

            Digit(d) => self.push(f64::from(d)),

            Add => self.stack_2to1(|x, y| Ok(y + x))?,
            Sub => self.stack_2to1(|x, y| Ok(y - x))?,
            Mul => self.stack_2to1(|x, y| Ok(y * x))?,
            Div => self.stack_2to1(|x, y| {
                if x == 0.0 { return Err(Error::DivisionByZero); }
                Ok(y / x)
            })?,
            // Floored, so the result takes the divisor's sign.
            Mod => self.stack_2to1(|x, y| {
                if x == 0.0 { return Err(Error::DivisionByZero); }
                Ok(y - x * (y / x).floor())
            })?,
            Eq => self.stack_2to1(|x, y| Ok(truth(y == x)))?,
            Lt => self.stack_2to1(|x, y| Ok(truth(y < x)))?,
            Gt => self.stack_2to1(|x, y| Ok(truth(y > x)))?,

            Duplicate => self.active().duplicate()?,
            Remove => { self.pop()?; },
            Swap => self.active().swap()?,
            TopShift => self.active().top_shift()?,
            RShift => self.active().rshift()?,
            LShift => self.active().lshift()?,
            Reverse => self.active().reverse(),
            Length => {
                let len = self.active().len();
                self.push(len as f64);
            },
            NewStack => self.stacks.open()?,
            Consume => self.stacks.close(),

            OutputChar => {
                let v = self.pop()?;
                write!(self.output, "{}", format_char(v))?;
            },
            OutputNum => {
                let v = self.pop()?;
                write!(self.output, "{}", format_number(v))?;
            },
            ReadNum => {
                let v = self.input.read_number()?;
                self.push(v);
            },

            Register => self.active().toggle_register()?,
            Peek => {
                let at = self.pop_coord()?;
                let v = self.peek(&at);
                self.push(v);
            },
            Poke => {
                let at = self.pop_coord()?;
                let v = self.pop()?;
                self.scratch.insert(at, v);
            },

            Halt => {
                self.halt()?;
                return Ok(Flow::Stay);
            },
            Whitespace => {},
            EndOfLine | EndOfInput => return Err(Error::InvalidInstruction { symbol }),
        }
        Ok(Flow::Advance)
    }

    /// Pops `y` then `x`.
    fn pop_coord (&mut self) -> Result<Coord> {
        let y = self.pop()?;
        let x = self.pop()?;
        Ok(XY::new(x as isize, y as isize))
    }

    /// A poked value, else the source character inside the grid, else zero.
    fn peek (&self, at: &Coord) -> f64 {
        if let Some(v) = self.scratch.get(at) {
            return *v;
        }
        if !self.codebox.contains(at) {
            return 0.0;
        }
        self.codebox
            .lookup(at)
            .map(|s| f64::from(u32::from(s.raw)))
            .unwrap_or(0.0)
    }

    /// Pops `x` then `y` and pushes `dyad(x, y)`.
    fn stack_2to1<F: FnOnce(f64, f64) -> Result<f64>> (&mut self, dyad: F) -> Result<()> {
        let args = self.active().pop_n(2)?;
        let v = dyad(args[0], args[1])?;
        self.push(v);
        Ok(())
    }
}

fn truth (b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
