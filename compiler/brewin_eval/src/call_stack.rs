//! Activation records and the call stack.
//!
//! The interpreter never recurses on the host stack: a Brewin call pushes
//! an `Activation` and redirects the instruction pointer, a return pops it
//! and resumes at the recorded position. The depth limit therefore only
//! bounds memory, and overflow is reported as a regular error.

use brewin_ir::{Keyword, LineNo, Name, ReturnType, StringInterner};

use crate::environment::Environment;
use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError, EvalResult};

/// A block opened in an activation and not yet closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenBlock {
    /// A `while` body; holds the header line to jump back to.
    Loop(LineNo),
    /// An `if` or `else` body.
    Branch,
}

impl OpenBlock {
    /// Keyword that opens this kind of block.
    pub fn opener(self) -> Keyword {
        match self {
            OpenBlock::Loop(_) => Keyword::While,
            OpenBlock::Branch => Keyword::If,
        }
    }
}

/// One running function or closure.
pub struct Activation {
    /// Function name (`lambda` for closures).
    pub name: Name,
    /// Header line of the function being executed.
    pub header: LineNo,
    pub return_type: ReturnType,
    /// Where the caller continues; `None` for the entry function.
    pub resume: Option<LineNo>,
    pub env: Environment,
    /// Blocks currently open in this activation, innermost last.
    blocks: Vec<OpenBlock>,
}

impl Activation {
    pub fn new(
        name: Name,
        header: LineNo,
        return_type: ReturnType,
        resume: Option<LineNo>,
        env: Environment,
    ) -> Self {
        Activation {
            name,
            header,
            return_type,
            resume,
            env,
            blocks: Vec::new(),
        }
    }

    #[inline]
    pub fn is_entry(&self) -> bool {
        self.resume.is_none()
    }

    pub fn open_block(&mut self, block: OpenBlock) {
        self.blocks.push(block);
    }

    /// Close the innermost block, which must be a loop.
    ///
    /// Returns the loop header, or `None` (leaving the stack untouched)
    /// when the innermost block is not a loop.
    pub fn close_loop(&mut self) -> Option<LineNo> {
        match self.blocks.last() {
            Some(&OpenBlock::Loop(header)) => {
                self.blocks.pop();
                Some(header)
            }
            _ => None,
        }
    }

    /// Close the innermost block, which must be a branch.
    pub fn close_branch(&mut self) -> bool {
        if self.blocks.last() == Some(&OpenBlock::Branch) {
            self.blocks.pop();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn innermost_block(&self) -> Option<OpenBlock> {
        self.blocks.last().copied()
    }
}

/// Stack of activations; the last one is executing.
pub struct CallStack {
    frames: Vec<Activation>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push an activation, checking the depth limit.
    ///
    /// The activation is NOT pushed on overflow.
    pub fn push(&mut self, activation: Activation) -> EvalResult<()> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(stack_overflow(max));
            }
        }
        tracing::debug!(
            depth = self.depth() + 1,
            header = %activation.header,
            "push activation"
        );
        self.frames.push(activation);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Activation> {
        let popped = self.frames.pop();
        if let Some(activation) = &popped {
            tracing::debug!(depth = self.frames.len(), header = %activation.header, "pop activation");
        }
        popped
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn current(&self) -> Option<&Activation> {
        self.frames.last()
    }

    #[inline]
    pub fn current_mut(&mut self) -> Option<&mut Activation> {
        self.frames.last_mut()
    }

    /// The activation that called the current one.
    pub fn caller_mut(&mut self) -> Option<&mut Activation> {
        let len = self.frames.len();
        if len < 2 {
            return None;
        }
        self.frames.get_mut(len - 2)
    }

    /// Snapshot the stack, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|a| BacktraceFrame {
                name: interner.lookup(a.name).to_string(),
                line: a.header,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace from this call stack to an error.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}
