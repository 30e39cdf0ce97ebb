//! The node trait and its boxed form.

use crate::Status;

/// A node evaluated against a mutable context `C`.
///
/// Conditions only read the context; actions may issue orders through it.
pub trait Behavior<C>: Send + Sync {
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Boxed node that may borrow data for `'b`.
///
/// Composites store their children as `Node`s, so a tree built for a
/// short-lived context type only has to live as long as that context.
pub type Node<'b, C> = Box<dyn Behavior<C> + 'b>;

impl<C> Behavior<C> for Box<dyn Behavior<C> + '_> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
