//! Branches and loops.
//!
//! Targets are found by scanning the statement table each time; block
//! scopes are entered on the way into a body and left at its closer.

use brewin_ir::{Keyword, Statement};

use super::{Flow, Interpreter};
use crate::call_stack::OpenBlock;
use crate::errors::{missing_operands, unexpected_closer, EvalResult};
use crate::resolver::{find_branch, find_loop_end};

impl Interpreter<'_> {
    pub(crate) fn exec_if(&mut self, stmt: &Statement) -> EvalResult<Flow> {
        let condition = stmt.args();
        if condition.is_empty() {
            return Err(missing_operands(Keyword::If));
        }
        if self.eval_condition(condition)? {
            self.enter_block(OpenBlock::Branch);
            return Ok(Flow::Next);
        }
        let targets = find_branch(self.program, self.ip)?;
        match targets.else_line {
            Some(else_line) => {
                self.enter_block(OpenBlock::Branch);
                Ok(Flow::Jump(else_line.next()))
            }
            None => Ok(Flow::Jump(targets.end.next())),
        }
    }

    /// Reached at the end of a taken `if` body: skip the `else` body.
    pub(crate) fn exec_else(&mut self) -> EvalResult<Flow> {
        if !self.frame_mut().close_branch() {
            return Err(unexpected_closer(Keyword::Else));
        }
        let targets = find_branch(self.program, self.ip)?;
        self.leave_block();
        Ok(Flow::Jump(targets.end.next()))
    }

    pub(crate) fn exec_endif(&mut self) -> EvalResult<Flow> {
        if !self.frame_mut().close_branch() {
            return Err(unexpected_closer(Keyword::EndIf));
        }
        self.leave_block();
        Ok(Flow::Next)
    }

    /// Evaluated on entry and again after every iteration.
    pub(crate) fn exec_while(&mut self, stmt: &Statement) -> EvalResult<Flow> {
        let condition = stmt.args();
        if condition.is_empty() {
            return Err(missing_operands(Keyword::While));
        }
        if self.eval_condition(condition)? {
            let header = self.ip;
            self.enter_block(OpenBlock::Loop(header));
            return Ok(Flow::Next);
        }
        let end = find_loop_end(self.program, self.ip)?;
        Ok(Flow::Jump(end.next()))
    }

    pub(crate) fn exec_endwhile(&mut self) -> EvalResult<Flow> {
        let header = self
            .frame_mut()
            .close_loop()
            .ok_or_else(|| unexpected_closer(Keyword::EndWhile))?;
        self.leave_block();
        Ok(Flow::Jump(header))
    }

    fn enter_block(&mut self, block: OpenBlock) {
        let has_block_scopes = self.level.has_block_scopes();
        let frame = self.frame_mut();
        frame.open_block(block);
        if has_block_scopes {
            frame.env.push_scope();
        }
    }

    fn leave_block(&mut self) {
        if self.level.has_block_scopes() {
            self.frame_mut().env.pop_scope();
        }
    }
}
