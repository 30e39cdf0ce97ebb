//! Sequence and selector.
//!
//! A think cycle is mostly a priority list: the first branch that claims the
//! cycle wins and the rest never run. That is a [`Selector`]. A branch that
//! needs every step to hold is a [`Sequence`].

use crate::{Behavior, Node, Status};

/// Ticks children left to right and stops at the first `Failure`.
///
/// Succeeds only if every child succeeded.
pub struct Sequence<'b, C> {
    children: Vec<Node<'b, C>>,
}

impl<'b, C> Sequence<'b, C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Node<'b, C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if !child.tick(ctx).is_success() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Ticks children left to right and stops at the first `Success`.
///
/// Fails only if every child failed.
pub struct Selector<'b, C> {
    children: Vec<Node<'b, C>>,
}

impl<'b, C> Selector<'b, C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Node<'b, C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}
