//! Status returned by behavior nodes.

/// Outcome of ticking one node.
///
/// There is no running state: a condition answers at once, and an action
/// either claims the think cycle by issuing its orders or declines so the
/// next branch can try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Condition held, or the action claimed the cycle.
    Success,
    /// Condition did not hold, or the action declined.
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

/// `true` claims the cycle. Cast attempts and helper predicates return
/// `bool`, so leaves convert with `.into()`.
impl From<bool> for Status {
    #[inline]
    fn from(claimed: bool) -> Self {
        if claimed {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bool_maps_true_to_success() {
        assert_eq!(Status::from(true), Status::Success);
        assert_eq!(Status::from(false), Status::Failure);
        assert!(Status::from(false).invert().is_success());
    }
}
