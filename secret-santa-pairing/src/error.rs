use crate::participant::ParticipantId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("the roster is empty")]
    Empty,
    #[error("the roster needs at least two participants but has {len}")]
    TooSmall { len: usize },
    #[error("participant {id} is listed more than once")]
    Duplicate { id: ParticipantId },
    #[error("empty participant name{}", .line.map(|line| format!(" on line {line}")).unwrap_or_default())]
    EmptyIdentifier { line: Option<usize> },
    #[error("line {line} is not of the form `name,address`")]
    MalformedLine { line: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PairingError {
    #[error("invalid roster: {0}")]
    InvalidRoster(#[from] RosterError),
    #[error("the draw budget must allow at least one draw per giver")]
    EmptyDrawBudget,
    #[error("{id} can not be excluded from pairing with themselves")]
    InvalidExclusion { id: ParticipantId },
    #[error(
        "no valid pairing found after {attempts} attempts, constraints too strict for: {}",
        format_ids(.stuck)
    )]
    PairingInfeasible {
        attempts: usize,
        /// Participants that could not be placed, most troublesome first.
        stuck: Vec<ParticipantId>,
    },
}

fn format_ids(ids: &[ParticipantId]) -> String {
    if ids.is_empty() {
        return "(no single participant)".to_owned();
    }
    ids.iter()
        .map(ParticipantId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(thiserror::Error, Debug)]
pub enum HistoryError {
    #[error("history json error: {0}")]
    Json(#[from] serde_json::Error),
}
