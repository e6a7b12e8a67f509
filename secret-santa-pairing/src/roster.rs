//! Reads the plain text participant list: one `name,address` per line.
//!
//! Blank lines and lines starting with `#` are ignored.

use tracing::debug;

use crate::error::RosterError;
use crate::participant::{Participant, ParticipantId, Roster};

pub fn parse_participants(text: &str) -> Result<Vec<Participant>, RosterError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_number, line)| parse_line(line_number, line))
        .collect()
}

/// [`parse_participants`] followed by [`Roster::new`].
pub fn parse_roster(text: &str) -> Result<Roster, RosterError> {
    let participants = parse_participants(text)?;
    debug!(participants = participants.len(), "parsed roster");
    Roster::new(participants)
}

fn parse_line(line_number: usize, line: &str) -> Result<Participant, RosterError> {
    let Some((name, address)) = line.split_once(',') else {
        return Err(RosterError::MalformedLine { line: line_number });
    };
    let address = address.trim();
    if address.is_empty() || address.contains(',') {
        return Err(RosterError::MalformedLine { line: line_number });
    }
    let id = ParticipantId::new(name).ok_or(RosterError::EmptyIdentifier {
        line: Some(line_number),
    })?;
    Ok(Participant {
        id,
        address: address.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines() {
        let roster = parse_roster(
            "# friends\nRyan,ryan@example.com\n\n  josh , josh@example.com \r\niris,iris@example.com\n",
        )
        .unwrap();
        let ids = roster.ids().map(ParticipantId::as_str).collect::<Vec<_>>();
        assert_eq!(ids, ["ryan", "josh", "iris"]);
        assert_eq!(roster.as_slice()[1].address, "josh@example.com");
    }

    #[test]
    fn missing_comma_reports_line() {
        assert_eq!(
            parse_participants("alice,a@example.com\nbob\n"),
            Err(RosterError::MalformedLine { line: 2 })
        );
    }

    #[test]
    fn extra_field_is_malformed() {
        assert_eq!(
            parse_participants("alice,a@example.com,extra"),
            Err(RosterError::MalformedLine { line: 1 })
        );
    }

    #[test]
    fn empty_name_reports_line() {
        assert_eq!(
            parse_participants("\n , nobody@example.com"),
            Err(RosterError::EmptyIdentifier { line: Some(2) })
        );
    }

    #[test]
    fn duplicate_is_caught_after_parsing() {
        assert!(matches!(
            parse_roster("alice,a@example.com\nAlice,b@example.com"),
            Err(RosterError::Duplicate { .. })
        ));
    }
}
