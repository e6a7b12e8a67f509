use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use secret_santa_config::{Config, GroupConfig};
use secret_santa_pairing::history::HistoryFile;
use secret_santa_pairing::roster::parse_roster;
use secret_santa_pairing::{
    Constraints, DrawBudget, ExclusionSet, GroupRule, PairingEngine, ParticipantId, Roster,
    RosterError,
};
use tracing::{debug, warn};

use crate::error::AppError;

pub fn read_to_string(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_owned(),
        source,
    })
}

pub fn write(path: &Path, contents: &str) -> Result<(), AppError> {
    fs::write(path, contents).map_err(|source| AppError::Write {
        path: path.to_owned(),
        source,
    })
}

pub fn load_roster(path: &Path) -> Result<Roster, AppError> {
    Ok(parse_roster(&read_to_string(path)?)?)
}

/// A missing history file means this is the first year.
pub fn load_history(path: &Path) -> Result<HistoryFile, AppError> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(HistoryFile::from_json(&json)?),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no history yet");
            Ok(HistoryFile::default())
        }
        Err(source) => Err(AppError::Read {
            path: path.to_owned(),
            source,
        }),
    }
}

pub const fn engine(config: &Config) -> PairingEngine {
    PairingEngine::new(
        DrawBudget::PerParticipant(config.draws_per_participant),
        config.max_restarts,
    )
}

fn participant_id(name: &str) -> Result<ParticipantId, RosterError> {
    ParticipantId::new(name).ok_or(RosterError::EmptyIdentifier { line: None })
}

/// Names that are not on this year's roster are skipped with a warning.
fn known_ids<'a>(
    roster: &Roster,
    names: impl IntoIterator<Item = &'a String>,
) -> Result<BTreeSet<ParticipantId>, RosterError> {
    let mut ids = BTreeSet::new();
    for name in names {
        let id = participant_id(name)?;
        if roster.contains(&id) {
            ids.insert(id);
        } else {
            warn!(%id, "not on the roster, ignoring");
        }
    }
    Ok(ids)
}

fn group_rule(roster: &Roster, group: &GroupConfig) -> Result<GroupRule, RosterError> {
    Ok(GroupRule {
        name: group.name.clone(),
        members: known_ids(roster, &group.members)?,
        restricted_givers: group
            .restricted_givers
            .as_ref()
            .map(|givers| known_ids(roster, givers))
            .transpose()?,
    })
}

pub fn build_constraints(
    config: &Config,
    roster: &Roster,
    history: &HistoryFile,
) -> Result<Constraints, AppError> {
    let mut exclusions = ExclusionSet::new();
    for (a, b) in &config.exclusions {
        let (a, b) = (participant_id(a)?, participant_id(b)?);
        if roster.contains(&a) && roster.contains(&b) {
            exclusions.insert(a, b)?;
        } else {
            warn!(%a, %b, "exclusion names someone not on the roster, ignoring");
        }
    }

    let mut constraints = Constraints::new()
        .with_history(history.records())
        .with_exclusions(exclusions);
    for group in &config.groups {
        constraints = constraints.with_group(group_rule(roster, group)?);
    }
    debug!(
        records = history.records().len(),
        exclusions = constraints.exclusions().len(),
        groups = constraints.groups().len(),
        "built constraints"
    );
    Ok(constraints)
}
