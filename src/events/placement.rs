use egui::Pos2;

use crate::node::{NodeId, Placement};

use super::store::NodeStore;

/// The placement query's answer, interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum PlacementDecision {
    /// Pointer is not over a drop target.
    NoTarget,

    /// Drop allowed here.
    Valid(Placement),

    /// Drop not allowed here; shown as a rejection, never committed.
    Rejected(Placement),
}

impl PlacementDecision {
    pub(super) fn from_query(placement: Option<Placement>) -> Self {
        match placement {
            None => Self::NoTarget,
            Some(p) if p.is_valid() => Self::Valid(p),
            Some(p) => Self::Rejected(p),
        }
    }

    pub(super) fn into_placement(self) -> Option<Placement> {
        match self {
            Self::NoTarget => None,
            Self::Valid(p) | Self::Rejected(p) => Some(p),
        }
    }
}

pub(super) fn resolve_placement<S: NodeStore + ?Sized>(
    store: &S,
    dragged: &NodeId,
    target: &NodeId,
    pointer: Pos2,
) -> PlacementDecision {
    PlacementDecision::from_query(store.drop_placeholder(dragged, target, pointer))
}

/// The move to commit at drop for this placeholder, if any: `(parent, index)`.
pub(super) fn commit_target(placeholder: Option<&Placement>) -> Option<(NodeId, usize)> {
    let placement = placeholder.filter(|p| p.is_valid())?;
    Some((placement.parent.clone(), placement.resolved_index()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DropPosition;

    #[test]
    fn error_is_rejection() {
        let p = Placement::new("p", 0, DropPosition::Before).with_error("locked");
        assert!(matches!(
            PlacementDecision::from_query(Some(p)),
            PlacementDecision::Rejected(_)
        ));
        assert_eq!(PlacementDecision::from_query(None), PlacementDecision::NoTarget);
    }

    #[test]
    fn commit_target_skips_rejections() {
        let ok = Placement::new("p", 2, DropPosition::After);
        assert_eq!(commit_target(Some(&ok)), Some(("p".into(), 3)));
        assert_eq!(commit_target(Some(&ok.clone().with_error("no"))), None);
        assert_eq!(commit_target(None), None);
    }
}
