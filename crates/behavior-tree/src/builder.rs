//! Builder utilities for ergonomic behavior tree construction.
//!
//! Instead of writing verbose `Box::new(Selector::new(vec![...]))`, use
//! shorter functions like `selector(vec![...])`. Every builder returns a
//! [`Node`] so results nest directly.

use crate::{Action, AlwaysFail, Condition, Inverter, Node, Selector, Sequence, Status};

/// Creates a sequence node.
#[inline]
pub fn sequence<'b, C: 'b>(children: Vec<Node<'b, C>>) -> Node<'b, C> {
    Box::new(Sequence::new(children))
}

/// Creates a selector node.
#[inline]
pub fn selector<'b, C: 'b>(children: Vec<Node<'b, C>>) -> Node<'b, C> {
    Box::new(Selector::new(children))
}

/// Creates an inverter node.
#[inline]
pub fn inverter<'b, C: 'b>(child: Node<'b, C>) -> Node<'b, C> {
    Box::new(Inverter::new(child))
}

/// Creates an always-fail node.
#[inline]
pub fn always_fail<'b, C: 'b>(child: Node<'b, C>) -> Node<'b, C> {
    Box::new(AlwaysFail::new(child))
}

/// Creates an action leaf.
#[inline]
pub fn action<'b, C, F>(run: F) -> Node<'b, C>
where
    F: Fn(&mut C) -> Status + Send + Sync + 'b,
{
    Box::new(Action::new(run))
}

/// Creates a condition leaf.
#[inline]
pub fn condition<'b, C, F>(check: F) -> Node<'b, C>
where
    F: Fn(&C) -> bool + Send + Sync + 'b,
{
    Box::new(Condition::new(check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Behavior;

    struct Steps<'a> {
        budget: i32,
        trace: &'a mut Vec<&'static str>,
    }

    fn has_budget(ctx: &Steps<'_>) -> bool {
        ctx.budget > 0
    }

    fn spend(ctx: &mut Steps<'_>) -> Status {
        ctx.budget -= 1;
        ctx.trace.push("spend");
        Status::Success
    }

    fn note(ctx: &mut Steps<'_>) -> Status {
        ctx.trace.push("note");
        Status::Success
    }

    fn rest(ctx: &mut Steps<'_>) -> Status {
        ctx.trace.push("rest");
        Status::Success
    }

    #[test]
    fn nested_tree_over_borrowing_context() {
        let mut trace = Vec::new();
        {
            let mut ctx = Steps {
                budget: 1,
                trace: &mut trace,
            };
            let tree: Node<'_, Steps<'_>> = selector(vec![
                always_fail(action(note)),
                sequence(vec![condition(has_budget), action(spend)]),
                sequence(vec![inverter(condition(has_budget)), action(rest)]),
            ]);

            assert!(tree.tick(&mut ctx).is_success());
            assert!(tree.tick(&mut ctx).is_success());
        }
        assert_eq!(trace, vec!["note", "spend", "note", "rest"]);
    }
}
