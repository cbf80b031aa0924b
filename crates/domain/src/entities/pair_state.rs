//! Resolution state of the pickup/dropoff pair

use serde::{Deserialize, Serialize};

/// Which endpoints currently have a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairState {
    /// Neither endpoint resolved
    #[default]
    Empty,
    /// Only pickup resolved
    PickupOnly,
    /// Only dropoff resolved
    DropoffOnly,
    /// Both resolved; a route can be requested
    BothResolved,
}

impl PairState {
    /// Derive the state from endpoint presence
    #[must_use]
    pub const fn from_presence(pickup: bool, dropoff: bool) -> Self {
        match (pickup, dropoff) {
            (false, false) => Self::Empty,
            (true, false) => Self::PickupOnly,
            (false, true) => Self::DropoffOnly,
            (true, true) => Self::BothResolved,
        }
    }

    /// Whether a route estimate may exist in this state
    #[must_use]
    pub const fn is_routable(self) -> bool {
        matches!(self, Self::BothResolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_maps_to_states() {
        assert_eq!(PairState::from_presence(false, false), PairState::Empty);
        assert_eq!(PairState::from_presence(true, false), PairState::PickupOnly);
        assert_eq!(PairState::from_presence(false, true), PairState::DropoffOnly);
        assert_eq!(PairState::from_presence(true, true), PairState::BothResolved);
    }

    #[test]
    fn only_both_resolved_is_routable() {
        assert!(PairState::BothResolved.is_routable());
        assert!(!PairState::PickupOnly.is_routable());
        assert!(!PairState::Empty.is_routable());
    }
}
