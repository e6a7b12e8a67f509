//! Secret santa pairing: every participant gives to exactly one other participant and
//! receives from exactly one, while avoiding earlier years' pairings and configured exclusions.

pub mod assignment;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod history;
pub mod notification;
pub mod participant;
pub mod roster;

pub use assignment::{Assignment, Violation};
pub use constraints::{
    Constraints, ExclusionPair, ExclusionSet, Forbidden, GroupRule, PastAssignment,
};
pub use engine::{check_feasibility, generate, DrawBudget, PairingEngine};
pub use error::{HistoryError, PairingError, RosterError};
pub use participant::{Participant, ParticipantId, Roster};
