//! Numeric stacks.
//!
//! A [`Stack`] is a `Vec<f64>` with its own single-slot register. A program
//! runs against [`Stacks`], a stack of stacks where only the topmost one is
//! active. Sub-stacks are created by moving a run of elements off the active
//! stack and are merged back by draining them into their parent.
//!
//! Failed operations are not rolled back. An operation that pops several
//! values and then runs short leaves the earlier pops applied.

use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    pool: Vec<f64>,
    register: Option<f64>,
}

impl Stack {
    pub fn new () -> Self {
        Stack::default()
    }

    pub fn from_values (values: Vec<f64>) -> Self {
        Stack { pool: values, register: None }
    }

    /// Bottom to top.
    pub fn values (&self) -> &[f64] {
        &self.pool
    }

    pub fn register (&self) -> Option<f64> {
        self.register
    }

    #[inline]
    pub fn push (&mut self, value: f64) {
        self.pool.push(value);
    }

    pub fn push_n (&mut self, values: &[f64]) {
        self.pool.extend_from_slice(values);
    }

    pub fn pop (&mut self) -> Result<f64> {
        self.pool.pop().ok_or_else(|| Error::underflow(1, 0))
    }

    /// Pops `n` values, most recent first.
    pub fn pop_n (&mut self, n: usize) -> Result<Vec<f64>> {
        let available = self.pool.len();
        let mut vals = Vec::with_capacity(n);
        for _ in 0..n {
            match self.pool.pop() {
                Some(v) => vals.push(v),
                None => return Err(Error::underflow(n, available)),
            }
        }
        Ok(vals)
    }

    pub fn pop_all (&mut self) -> Vec<f64> {
        let mut vals = std::mem::take(&mut self.pool);
        vals.reverse();
        vals
    }

    fn require (&self, n: usize) -> Result<()> {
        if self.pool.len() < n {
            Err(Error::underflow(n, self.pool.len()))
        } else {
            Ok(())
        }
    }

    pub fn duplicate (&mut self) -> Result<()> {
        let top = self.pop()?;
        self.push_n(&[top, top]);
        Ok(())
    }

    pub fn swap (&mut self) -> Result<()> {
        self.require(2)?;
        let len = self.pool.len();
        self.pool.swap(len - 1, len - 2);
        Ok(())
    }

    /// `[a, b, c, d]` becomes `[d, a, b, c]`.
    pub fn rshift (&mut self) -> Result<()> {
        self.require(1)?;
        self.pool.rotate_right(1);
        Ok(())
    }

    /// `[a, b, c, d]` becomes `[b, c, d, a]`.
    pub fn lshift (&mut self) -> Result<()> {
        self.require(1)?;
        self.pool.rotate_left(1);
        Ok(())
    }

    /// Moves the top element two places down: `[1, 2, 3, 4]` becomes
    /// `[1, 4, 2, 3]`.
    pub fn top_shift (&mut self) -> Result<()> {
        let mut top = self.pop_n(3)?;
        top.reverse();
        top.rotate_right(1);
        self.push_n(&top);
        Ok(())
    }

    pub fn reverse (&mut self) {
        self.pool.reverse();
    }

    pub fn len (&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty (&self) -> bool {
        self.pool.is_empty()
    }

    pub fn clear (&mut self) {
        self.pool.clear();
    }

    /// Pops a count `n` and moves the top `n` elements, in order, into a
    /// fresh stack.
    pub fn split_off (&mut self) -> Result<Stack> {
        let count = self.pop()?;
        let available = self.pool.len();
        if count < 0.0 || count.trunc() > available as f64 {
            return Err(Error::underflow(count.max(0.0) as usize, available));
        }
        let at = available - count as usize;
        Ok(Stack::from_values(self.pool.split_off(at)))
    }

    /// Appends every element of `child`, keeping its bottom-to-top order.
    /// The child's register is discarded with it.
    pub fn consume (&mut self, mut child: Stack) {
        self.pool.append(&mut child.pool);
    }

    /// Stores the top value in an empty register, or pushes and clears a
    /// full one.
    pub fn toggle_register (&mut self) -> Result<()> {
        match self.register.take() {
            Some(v) => self.push(v),
            None => self.register = Some(self.pop()?),
        }
        Ok(())
    }
}

/// The stack of stacks. Never empty; the last entry is the active stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Stacks {
    stacks: Vec<Stack>,
}

impl Default for Stacks {
    fn default () -> Self {
        Stacks::new(Stack::new())
    }
}

impl Stacks {
    pub fn new (root: Stack) -> Self {
        Stacks { stacks: vec![root] }
    }

    pub fn depth (&self) -> usize {
        self.stacks.len()
    }

    pub fn active (&self) -> &Stack {
        // `stacks` always holds the root.
        &self.stacks[self.stacks.len() - 1]
    }

    pub fn active_mut (&mut self) -> &mut Stack {
        let last = self.stacks.len() - 1;
        &mut self.stacks[last]
    }

    /// `[`: splits a new active stack off the current one.
    pub fn open (&mut self) -> Result<()> {
        let child = self.active_mut().split_off()?;
        debug!(size = child.len(), depth = self.stacks.len() + 1, "opened sub-stack");
        self.stacks.push(child);
        Ok(())
    }

    /// `]`: merges the active stack into its parent. On the root this
    /// replaces it with an empty stack.
    pub fn close (&mut self) {
        if self.stacks.len() == 1 {
            debug!("closed root stack");
            self.stacks[0] = Stack::new();
            return;
        }
        if let Some(child) = self.stacks.pop() {
            debug!(size = child.len(), depth = self.stacks.len(), "consumed sub-stack");
            self.active_mut().consume(child);
        }
    }
}
