use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::PairingError;
use crate::participant::ParticipantId;

/// One completed run: who gave to whom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub pairings: BTreeMap<ParticipantId, ParticipantId>,
}

impl PastAssignment {
    #[must_use]
    pub fn new(pairings: BTreeMap<ParticipantId, ParticipantId>) -> Self {
        Self {
            year: None,
            pairings,
        }
    }

    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// Unordered pair, `(a, b)` and `(b, a)` are the same exclusion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExclusionPair(ParticipantId, ParticipantId);

impl ExclusionPair {
    pub fn new(a: ParticipantId, b: ParticipantId) -> Result<Self, PairingError> {
        match a.cmp(&b) {
            core::cmp::Ordering::Less => Ok(Self(a, b)),
            core::cmp::Ordering::Greater => Ok(Self(b, a)),
            core::cmp::Ordering::Equal => Err(PairingError::InvalidExclusion { id: a }),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        &self.0 == id || &self.1 == id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<ExclusionPair>);

impl ExclusionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the pair was already excluded.
    pub fn insert(&mut self, a: ParticipantId, b: ParticipantId) -> Result<bool, PairingError> {
        Ok(self.0.insert(ExclusionPair::new(a, b)?))
    }

    #[must_use]
    pub fn forbids(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        self.0
            .iter()
            .any(|pair| pair.contains(a) && pair.contains(b) && a != b)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExclusionPair> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<(ParticipantId, ParticipantId)>> for ExclusionSet {
    type Error = PairingError;

    fn try_from(pairs: Vec<(ParticipantId, ParticipantId)>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        for (a, b) in pairs {
            set.insert(a, b)?;
        }
        Ok(set)
    }
}

/// Restricted givers that are members of the group never give to another member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule {
    pub name: String,
    pub members: BTreeSet<ParticipantId>,
    /// `None` restricts every member.
    pub restricted_givers: Option<BTreeSet<ParticipantId>>,
}

impl GroupRule {
    #[must_use]
    pub fn forbids(&self, giver: &ParticipantId, recipient: &ParticipantId) -> bool {
        let restricted = self
            .restricted_givers
            .as_ref()
            .map_or(true, |givers| givers.contains(giver));
        restricted && self.members.contains(giver) && self.members.contains(recipient)
    }
}

/// Why a giver may not be assigned a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forbidden {
    SelfMatch,
    History,
    Excluded,
    Group,
}

/// Everything besides the roster that restricts who may give to whom.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    previous: BTreeMap<ParticipantId, BTreeSet<ParticipantId>>,
    exclusions: ExclusionSet,
    groups: Vec<GroupRule>,
}

impl Constraints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record counts, not only the most recent one.
    #[must_use]
    pub fn with_history<'a>(
        mut self,
        history: impl IntoIterator<Item = &'a PastAssignment>,
    ) -> Self {
        let pairs = history
            .into_iter()
            .flat_map(|record| record.pairings.iter())
            .map(|(giver, recipient)| (giver.clone(), recipient.clone()));
        for (giver, recipients) in group_pairs(pairs) {
            self.previous.entry(giver).or_default().extend(recipients);
        }
        self
    }

    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: GroupRule) -> Self {
        self.groups.push(group);
        self
    }

    #[must_use]
    pub fn previous_recipients(&self, giver: &ParticipantId) -> Option<&BTreeSet<ParticipantId>> {
        self.previous.get(giver)
    }

    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    #[must_use]
    pub fn groups(&self) -> &[GroupRule] {
        &self.groups
    }

    /// The first rule that forbids `giver -> recipient`, if any.
    #[must_use]
    pub fn check(&self, giver: &ParticipantId, recipient: &ParticipantId) -> Option<Forbidden> {
        if giver == recipient {
            Some(Forbidden::SelfMatch)
        } else if self
            .previous
            .get(giver)
            .is_some_and(|previous| previous.contains(recipient))
        {
            Some(Forbidden::History)
        } else if self.exclusions.forbids(giver, recipient) {
            Some(Forbidden::Excluded)
        } else if self.groups.iter().any(|group| group.forbids(giver, recipient)) {
            Some(Forbidden::Group)
        } else {
            None
        }
    }

    #[must_use]
    pub fn allows(&self, giver: &ParticipantId, recipient: &ParticipantId) -> bool {
        self.check(giver, recipient).is_none()
    }
}

fn group_pairs<A, B, I>(items: I) -> BTreeMap<A, Vec<B>>
where
    A: Ord,
    I: IntoIterator<Item = (A, B)>,
{
    items
        .into_iter()
        .fold(BTreeMap::new(), |mut acc, (key, value)| {
            acc.entry(key).or_default().push(value);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name).unwrap()
    }

    fn record(pairs: &[(&str, &str)]) -> PastAssignment {
        PastAssignment::new(pairs.iter().map(|(a, b)| (id(a), id(b))).collect())
    }

    #[test]
    fn exclusion_pairs_are_unordered() {
        assert_eq!(
            ExclusionPair::new(id("bob"), id("alice")).unwrap(),
            ExclusionPair::new(id("alice"), id("bob")).unwrap()
        );
        let mut set = ExclusionSet::new();
        assert!(set.insert(id("alice"), id("bob")).unwrap());
        assert!(!set.insert(id("bob"), id("alice")).unwrap());
        assert_eq!(set.len(), 1);
        assert!(set.forbids(&id("bob"), &id("alice")));
        assert!(!set.forbids(&id("bob"), &id("carol")));
    }

    #[test]
    fn self_exclusion_is_rejected() {
        assert_eq!(
            ExclusionPair::new(id("alice"), id("Alice")),
            Err(PairingError::InvalidExclusion { id: id("alice") })
        );
    }

    #[test]
    fn history_from_every_year_is_excluded() {
        let constraints = Constraints::new().with_history(&[
            record(&[("alice", "bob"), ("bob", "alice")]),
            record(&[("alice", "carol"), ("carol", "alice")]),
        ]);
        assert_eq!(
            constraints.check(&id("alice"), &id("bob")),
            Some(Forbidden::History)
        );
        assert_eq!(
            constraints.check(&id("alice"), &id("carol")),
            Some(Forbidden::History)
        );
        // history is directional
        assert!(constraints.allows(&id("bob"), &id("carol")));
        assert!(constraints.allows(&id("carol"), &id("bob")));
        assert_eq!(constraints.previous_recipients(&id("alice")).unwrap().len(), 2);
    }

    #[test]
    fn self_match_is_reported_first() {
        let constraints = Constraints::new().with_history(&[record(&[("alice", "alice")])]);
        assert_eq!(
            constraints.check(&id("alice"), &id("alice")),
            Some(Forbidden::SelfMatch)
        );
    }

    #[test]
    fn exclusions_apply_in_both_directions() {
        let exclusions =
            ExclusionSet::try_from(vec![(id("iris"), id("susan"))]).unwrap();
        let constraints = Constraints::new().with_exclusions(exclusions);
        assert_eq!(
            constraints.check(&id("iris"), &id("susan")),
            Some(Forbidden::Excluded)
        );
        assert_eq!(
            constraints.check(&id("susan"), &id("iris")),
            Some(Forbidden::Excluded)
        );
    }

    #[test]
    fn group_rule_only_restricts_listed_givers() {
        let group = GroupRule {
            name: "rigged".to_owned(),
            members: [id("victoria"), id("iris"), id("susan")].into(),
            restricted_givers: Some([id("susan")].into()),
        };
        let constraints = Constraints::new().with_group(group);
        assert_eq!(
            constraints.check(&id("susan"), &id("iris")),
            Some(Forbidden::Group)
        );
        assert!(constraints.allows(&id("iris"), &id("susan")));
        assert!(constraints.allows(&id("susan"), &id("bob")));
    }

    #[test]
    fn group_rule_without_givers_restricts_all_members() {
        let group = GroupRule {
            name: "household".to_owned(),
            members: [id("ana"), id("eric")].into(),
            restricted_givers: None,
        };
        assert!(group.forbids(&id("ana"), &id("eric")));
        assert!(group.forbids(&id("eric"), &id("ana")));
        assert!(!group.forbids(&id("eric"), &id("josh")));
    }
}
