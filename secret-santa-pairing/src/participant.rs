// names come from a hand-written roster file, so they are normalized before anything compares them

use core::fmt::{self, Display};
use core::ops::Deref;
use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Trims and lower-cases `name`. Returns `None` if nothing is left.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(Self(name.to_lowercase()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for ParticipantId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(RosterError::EmptyIdentifier { line: None })
    }
}

impl From<ParticipantId> for String {
    fn from(value: ParticipantId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    /// Where a notification would be delivered. Never interpreted here.
    pub address: String,
}

impl Participant {
    pub fn new(name: &str, address: impl Into<String>) -> Result<Self, RosterError> {
        Ok(Self {
            id: ParticipantId::new(name).ok_or(RosterError::EmptyIdentifier { line: None })?,
            address: address.into(),
        })
    }
}

/// A validated list of participants: at least two, no duplicate ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub const MIN_LEN: usize = 2;

    pub fn new(participants: Vec<Participant>) -> Result<Self, RosterError> {
        if participants.is_empty() {
            return Err(RosterError::Empty);
        }
        if let Some(id) = participants
            .iter()
            .map(|participant| &participant.id)
            .duplicates()
            .next()
        {
            return Err(RosterError::Duplicate { id: id.clone() });
        }
        if participants.len() < Self::MIN_LEN {
            return Err(RosterError::TooSmall {
                len: participants.len(),
            });
        }
        Ok(Self { participants })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false, a roster holds at least [`Roster::MIN_LEN`] participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> {
        self.participants.iter().map(|participant| &participant.id)
    }

    #[must_use]
    pub fn id_set(&self) -> BTreeSet<&ParticipantId> {
        self.ids().collect()
    }

    #[must_use]
    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| &participant.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }
}

impl<'a> IntoIterator for &'a Roster {
    type IntoIter = core::slice::Iter<'a, Participant>;
    type Item = &'a Participant;

    fn into_iter(self) -> Self::IntoIter {
        self.participants.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str) -> Participant {
        Participant::new(name, format!("{name}@example.com")).unwrap()
    }

    #[test]
    fn ids_are_trimmed_and_lowercased() {
        assert_eq!(ParticipantId::new("  Alice ").unwrap().as_str(), "alice");
        assert_eq!(ParticipantId::new("   "), None);
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert_eq!(Roster::new(vec![]), Err(RosterError::Empty));
    }

    #[test]
    fn single_participant_is_rejected() {
        assert_eq!(
            Roster::new(vec![participant("alice")]),
            Err(RosterError::TooSmall { len: 1 })
        );
    }

    #[test]
    fn duplicates_differing_only_in_case_are_rejected() {
        let result = Roster::new(vec![
            participant("alice"),
            participant("bob"),
            participant("ALICE"),
        ]);
        assert_eq!(
            result,
            Err(RosterError::Duplicate {
                id: ParticipantId::new("alice").unwrap()
            })
        );
    }

    #[test]
    fn lookup_by_id() {
        let roster = Roster::new(vec![participant("alice"), participant("bob")]).unwrap();
        let bob = ParticipantId::new("Bob").unwrap();
        assert_eq!(roster.get(&bob).unwrap().address, "bob@example.com");
        assert!(!roster.contains(&ParticipantId::new("carol").unwrap()));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn ids_deserialize_normalized() {
        let id: ParticipantId = serde_json::from_str("\" Carol\"").unwrap();
        assert_eq!(id.as_str(), "carol");
        assert!(serde_json::from_str::<ParticipantId>("\"  \"").is_err());
    }
}
