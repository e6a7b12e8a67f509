use std::collections::{BTreeMap, BTreeSet};

use crate::constraints::{Constraints, Forbidden, PastAssignment};
use crate::participant::{ParticipantId, Roster};

/// A complete giver -> recipient mapping over a roster.
///
/// Only [`crate::PairingEngine`] builds these, and only after [`Assignment::verify`]
/// passed, so every value of this type satisfies all constraints it was generated under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pairs: BTreeMap<ParticipantId, ParticipantId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingGiver(ParticipantId),
    UnknownParticipant(ParticipantId),
    RecipientTwice(ParticipantId),
    Forbidden {
        giver: ParticipantId,
        recipient: ParticipantId,
        reason: Forbidden,
    },
}

impl Assignment {
    pub(crate) const fn new_unchecked(pairs: BTreeMap<ParticipantId, ParticipantId>) -> Self {
        Self { pairs }
    }

    /// All violations of `pairs` against the roster and constraints. Empty means valid.
    pub(crate) fn verify(
        pairs: &BTreeMap<ParticipantId, ParticipantId>,
        roster: &Roster,
        constraints: &Constraints,
    ) -> Vec<Violation> {
        let ids = roster.id_set();
        let mut violations: Vec<Violation> = ids
            .iter()
            .filter(|id| !pairs.contains_key(**id))
            .map(|id| Violation::MissingGiver((*id).clone()))
            .collect();

        let mut received = BTreeSet::new();
        for (giver, recipient) in pairs {
            for id in [giver, recipient] {
                if !ids.contains(id) {
                    violations.push(Violation::UnknownParticipant(id.clone()));
                }
            }
            if !received.insert(recipient) {
                violations.push(Violation::RecipientTwice(recipient.clone()));
            }
            if let Some(reason) = constraints.check(giver, recipient) {
                violations.push(Violation::Forbidden {
                    giver: giver.clone(),
                    recipient: recipient.clone(),
                    reason,
                });
            }
        }
        violations
    }

    #[must_use]
    pub fn recipient_of(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.pairs.get(giver)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantId)> {
        self.pairs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Splits the assignment into giving cycles, each starting at its smallest id.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<&ParticipantId>> {
        let mut seen = BTreeSet::new();
        let mut cycles = Vec::new();
        for start in self.pairs.keys() {
            if seen.contains(start) {
                continue;
            }
            let mut cycle = Vec::new();
            let mut current = start;
            while seen.insert(current) {
                cycle.push(current);
                match self.pairs.get(current) {
                    Some(next) => current = next,
                    None => break,
                }
            }
            cycles.push(cycle);
        }
        cycles
    }

    #[must_use]
    pub fn to_record(&self, year: Option<i32>) -> PastAssignment {
        PastAssignment {
            year,
            pairings: self.pairs.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type IntoIter = std::collections::btree_map::Iter<'a, ParticipantId, ParticipantId>;
    type Item = (&'a ParticipantId, &'a ParticipantId);

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
