//! Trip station selection.
//!
//! The map lets a user click candidate stations to choose where a trip
//! starts and ends. The selection is an immutable value; every change
//! goes through [`reduce`], which returns the next state.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Station};

/// Which end of the trip an action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

/// A change to the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SelectionAction {
    /// A station was clicked: fills the first empty endpoint.
    Pick(Station),
    /// Clear one endpoint.
    Undo(Endpoint),
    /// Clear both endpoints.
    Reset,
}

/// Start and end stations chosen so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripSelection {
    pub start: Option<Station>,
    pub end: Option<Station>,
}

impl TripSelection {
    /// Both endpoints are chosen, so routes can be requested.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Whether the selection card should be shown.
    pub fn show_card(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Coordinates of both endpoints, once complete.
    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Some((start.coordinate, end.coordinate)),
            _ => None,
        }
    }
}

/// Apply an action to a selection, returning the new selection.
///
/// Picking when both endpoints are already set leaves the selection
/// unchanged; the user has to undo one side first.
pub fn reduce(state: &TripSelection, action: SelectionAction) -> TripSelection {
    let mut next = state.clone();
    match action {
        SelectionAction::Pick(station) => {
            if next.start.is_none() {
                next.start = Some(station);
            } else if next.end.is_none() {
                next.end = Some(station);
            }
        }
        SelectionAction::Undo(Endpoint::Start) => next.start = None,
        SelectionAction::Undo(Endpoint::End) => next.end = None,
        SelectionAction::Reset => next = TripSelection::default(),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    fn station(id: &str) -> Station {
        Station::new(
            StationId::parse(id).unwrap(),
            format!("Station {id}"),
            Coordinate::new(-118.25, 34.05).unwrap(),
        )
    }

    #[test]
    fn picks_fill_start_then_end() {
        let s0 = TripSelection::default();
        assert!(!s0.show_card());

        let s1 = reduce(&s0, SelectionAction::Pick(station("1")));
        assert_eq!(s1.start, Some(station("1")));
        assert!(s1.end.is_none());
        assert!(s1.show_card());
        assert!(!s1.is_complete());

        let s2 = reduce(&s1, SelectionAction::Pick(station("2")));
        assert_eq!(s2.end, Some(station("2")));
        assert!(s2.is_complete());
        assert!(s2.endpoints().is_some());

        // Original states are untouched
        assert!(s0.start.is_none());
        assert!(s1.end.is_none());
    }

    #[test]
    fn pick_when_full_is_ignored() {
        let full = TripSelection {
            start: Some(station("1")),
            end: Some(station("2")),
        };
        let next = reduce(&full, SelectionAction::Pick(station("3")));
        assert_eq!(next, full);
    }

    #[test]
    fn undo_start_then_pick_refills_start() {
        let full = TripSelection {
            start: Some(station("1")),
            end: Some(station("2")),
        };

        let undone = reduce(&full, SelectionAction::Undo(Endpoint::Start));
        assert!(undone.start.is_none());
        assert_eq!(undone.end, Some(station("2")));
        assert!(undone.show_card());

        let refilled = reduce(&undone, SelectionAction::Pick(station("3")));
        assert_eq!(refilled.start, Some(station("3")));
    }

    #[test]
    fn reset_clears_everything() {
        let full = TripSelection {
            start: Some(station("1")),
            end: Some(station("2")),
        };
        let cleared = reduce(&full, SelectionAction::Reset);
        assert_eq!(cleared, TripSelection::default());
        assert!(cleared.endpoints().is_none());
    }

    #[test]
    fn action_json_shape() {
        let action: SelectionAction =
            serde_json::from_str(r#"{"type":"undo","value":"end"}"#).unwrap();
        assert_eq!(action, SelectionAction::Undo(Endpoint::End));

        let action: SelectionAction = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
        assert_eq!(action, SelectionAction::Reset);
    }
}
