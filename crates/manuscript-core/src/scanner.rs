//! Single-step bidirectional cursor over a token slice.

use crate::token::Token;

/// Iteration state over a borrowed token slice.
///
/// `back` undoes exactly one step; it is a saturating decrement, not an undo
/// stack. Renderers use it to hand a terminating macro back to an outer loop.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Return the token at the current position and advance past it.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Step back by one token, stopping at the start.
    #[inline]
    pub fn back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Index of the token `next` would return.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
