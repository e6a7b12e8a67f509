use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::assignment::Assignment;
use crate::constraints::Constraints;
use crate::error::PairingError;
use crate::participant::{Participant, ParticipantId, Roster};

/// How many random draws a single giver gets before the whole run is thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawBudget {
    /// Scales with the roster: `roster.len() * n`.
    PerParticipant(usize),
    Fixed(usize),
}

impl DrawBudget {
    #[must_use]
    pub const fn for_roster(self, roster_len: usize) -> usize {
        match self {
            Self::PerParticipant(n) => roster_len.saturating_mul(n),
            Self::Fixed(n) => n,
        }
    }
}

impl Default for DrawBudget {
    fn default() -> Self {
        Self::PerParticipant(50)
    }
}

/// Randomized greedy pairing with bounded redraws and bounded restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingEngine {
    pub draws: DrawBudget,
    /// Full runs after the first one.
    pub max_restarts: usize,
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self {
            draws: DrawBudget::default(),
            max_restarts: 100,
        }
    }
}

enum RunOutcome {
    Complete(BTreeMap<ParticipantId, ParticipantId>),
    Stuck(ParticipantId),
}

impl PairingEngine {
    #[must_use]
    pub const fn new(draws: DrawBudget, max_restarts: usize) -> Self {
        Self {
            draws,
            max_restarts,
        }
    }

    /// Validates `participants` as a [`Roster`] first, then [`PairingEngine::generate`].
    pub fn generate_from_participants<R: Rng + ?Sized>(
        &self,
        participants: Vec<Participant>,
        constraints: &Constraints,
        rng: &mut R,
    ) -> Result<Assignment, PairingError> {
        let roster = Roster::new(participants)?;
        self.generate(&roster, constraints, rng)
    }

    /// Assigns every participant exactly one recipient.
    ///
    /// Nobody gets themselves, nobody is received twice, and no pair forbidden by `constraints`
    /// is used. The only side effect is consuming randomness from `rng`.
    #[instrument(skip_all, fields(participants = roster.len()))]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        constraints: &Constraints,
        rng: &mut R,
    ) -> Result<Assignment, PairingError> {
        let draws = self.draws.for_roster(roster.len());
        if draws == 0 {
            return Err(PairingError::EmptyDrawBudget);
        }
        check_feasibility(roster, constraints)?;

        let mut stuck_counts: BTreeMap<ParticipantId, usize> = BTreeMap::new();
        let attempts = self.max_restarts.saturating_add(1);

        for attempt in 1..=attempts {
            match run(roster, constraints, draws, rng) {
                RunOutcome::Complete(pairs) => {
                    let violations = Assignment::verify(&pairs, roster, constraints);
                    if violations.is_empty() {
                        info!(attempt, "found pairing");
                        return Ok(Assignment::new_unchecked(pairs));
                    }
                    warn!(attempt, ?violations, "discarding inconsistent run");
                }
                RunOutcome::Stuck(giver) => {
                    debug!(attempt, %giver, "no recipient left, restarting");
                    *stuck_counts.entry(giver).or_default() += 1;
                }
            }
        }

        let stuck = stuck_counts
            .into_iter()
            .sorted_by(|(left_id, left), (right_id, right)| {
                right.cmp(left).then_with(|| left_id.cmp(right_id))
            })
            .map(|(id, _)| id)
            .collect_vec();
        warn!(attempts, ?stuck, "giving up");
        Err(PairingError::PairingInfeasible { attempts, stuck })
    }
}

/// [`PairingEngine::generate`] with the default budgets.
pub fn generate<R: Rng + ?Sized>(
    roster: &Roster,
    constraints: &Constraints,
    rng: &mut R,
) -> Result<Assignment, PairingError> {
    PairingEngine::default().generate(roster, constraints, rng)
}

/// Fails fast when some giver has no allowed recipient at all, or some participant
/// is not an allowed recipient for anybody. Passing this does not guarantee a solution.
pub fn check_feasibility(roster: &Roster, constraints: &Constraints) -> Result<(), PairingError> {
    let without_recipient = roster
        .ids()
        .filter(|giver| !roster.ids().any(|recipient| constraints.allows(giver, recipient)));
    let without_giver = roster
        .ids()
        .filter(|recipient| !roster.ids().any(|giver| constraints.allows(giver, recipient)));
    let stuck: BTreeSet<ParticipantId> = without_recipient.chain(without_giver).cloned().collect();

    if stuck.is_empty() {
        Ok(())
    } else {
        warn!(?stuck, "participants without any allowed partner");
        Err(PairingError::PairingInfeasible {
            attempts: 0,
            stuck: stuck.into_iter().collect(),
        })
    }
}

fn run<R: Rng + ?Sized>(
    roster: &Roster,
    constraints: &Constraints,
    draws: usize,
    rng: &mut R,
) -> RunOutcome {
    let mut givers = roster.ids().collect_vec();
    givers.shuffle(rng);

    let mut claimed: BTreeSet<&ParticipantId> = BTreeSet::new();
    let mut pairs = BTreeMap::new();

    for giver in givers {
        let recipient = (0..draws)
            .filter_map(|_| roster.as_slice().choose(rng))
            .map(|candidate| &candidate.id)
            .find(|candidate| !claimed.contains(candidate) && constraints.allows(giver, candidate));

        let Some(recipient) = recipient else {
            return RunOutcome::Stuck(giver.clone());
        };
        claimed.insert(recipient);
        pairs.insert(giver.clone(), recipient.clone());
    }

    RunOutcome::Complete(pairs)
}
