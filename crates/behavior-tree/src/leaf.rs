//! Leaf nodes backed by plain functions.
//!
//! Leaves are generic over the function type rather than the context, so a
//! `fn` item whose signature is generic over lifetimes produces a `'static`
//! node even when the context borrows.

use crate::{Behavior, Status};

/// Runs a function that may mutate the context and reports its status.
pub struct Action<F> {
    run: F,
}

impl<F> Action<F> {
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<C, F> Behavior<C> for Action<F>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.run)(ctx)
    }
}

/// Evaluates a read-only predicate.
pub struct Condition<F> {
    check: F,
}

impl<F> Condition<F> {
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<C, F> Behavior<C> for Condition<F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from((self.check)(ctx))
    }
}
