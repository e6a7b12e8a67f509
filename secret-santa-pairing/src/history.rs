//! The pairing record file, `{"ssn": [{"year": 2024, "pairings": {"giver": "recipient"}}]}`.

use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::constraints::PastAssignment;
use crate::error::HistoryError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFile {
    #[serde(rename = "ssn", default)]
    pub records: Vec<PastAssignment>,
}

impl HistoryFile {
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn push(&mut self, assignment: &Assignment, year: Option<i32>) {
        self.records.push(assignment.to_record(year));
    }

    #[must_use]
    pub fn records(&self) -> &[PastAssignment] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::ParticipantId;

    #[test]
    fn reads_record_file() {
        let history = HistoryFile::from_json(
            r#"{"ssn": [
                {"year": 2023, "pairings": {"Josh": "victoria", "iris": "ana"}},
                {"pairings": {"josh": "iris"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(history.records().len(), 2);
        assert_eq!(history.records()[0].year, Some(2023));
        assert_eq!(history.records()[1].year, None);
        let josh = ParticipantId::new("josh").unwrap();
        assert_eq!(
            history.records()[0].pairings.get(&josh).map(ParticipantId::as_str),
            Some("victoria")
        );
    }

    #[test]
    fn missing_list_is_empty_history() {
        assert_eq!(HistoryFile::from_json("{}").unwrap(), HistoryFile::default());
    }

    #[test]
    fn rejects_blank_names() {
        assert!(HistoryFile::from_json(r#"{"ssn": [{"pairings": {" ": "ana"}}]}"#).is_err());
    }
}
