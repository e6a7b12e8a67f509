use crate::assignment::Assignment;
use crate::participant::Roster;

pub const SUBJECT: &str = "Secret Santa Pairings!!! <3";

/// The message a giver receives. Delivering it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// One notification per giver, in giver order.
#[must_use]
pub fn notifications(roster: &Roster, assignment: &Assignment) -> Vec<Notification> {
    assignment
        .iter()
        .filter_map(|(giver, recipient)| {
            let participant = roster.get(giver)?;
            Some(Notification {
                to: participant.address.clone(),
                subject: SUBJECT.to_owned(),
                body: format!("Hi {giver}, you have: {recipient}"),
            })
        })
        .collect()
}
