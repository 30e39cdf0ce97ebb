//! Single-child decorators.

use crate::{Behavior, Status};

/// Flips its child's status.
pub struct Inverter<B> {
    child: B,
}

impl<B> Inverter<B> {
    pub fn new(child: B) -> Self {
        Self { child }
    }
}

impl<C, B: Behavior<C>> Behavior<C> for Inverter<B> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }
}

/// Runs its child for the side effect and always reports `Failure`.
///
/// Inside a selector the next branch still gets its turn, which is how a
/// faction call or a help request rides along with the real decision.
pub struct AlwaysFail<B> {
    child: B,
}

impl<B> AlwaysFail<B> {
    pub fn new(child: B) -> Self {
        Self { child }
    }
}

impl<C, B: Behavior<C>> Behavior<C> for AlwaysFail<B> {
    fn tick(&self, ctx: &mut C) -> Status {
        let _ = self.child.tick(ctx);
        Status::Failure
    }
}
