use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The team data document, as uploaded by users.
///
/// Maps keep their document order, which matters when several records
/// concern the same student and event: the last one read wins.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TeamData {
    pub events: Vec<String>,
    pub students: Vec<String>,
    #[serde(default)]
    pub tournaments: IndexMap<String, Tournament>,
    #[serde(rename = "test-offs", default)]
    pub test_offs: IndexMap<String, TestOff>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Tournament {
    #[serde(
        rename = "tournament-date",
        alias = "date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default)]
    pub weight: f64,
    /// Team name, then event name.
    #[serde(default)]
    pub teams: IndexMap<String, IndexMap<String, Option<TournamentEntry>>>,
}

/// Result of one team in one event of a tournament.
///
/// Every field is optional at this level so that a single broken entry can be
/// skipped instead of rejecting the whole document.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TournamentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partners: Option<Value>,
    #[serde(
        rename = "event-placement",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub placement: Option<Value>,
    #[serde(
        rename = "event-total-competing-teams",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_teams: Option<Value>,
}

/// A non-negative integer small enough for a `u32`, or `None` for anything
/// else (missing, string, fraction, negative number).
fn as_count(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

impl TournamentEntry {
    /// Names of the partners, if `partners` is a list of strings.
    pub fn partner_names(&self) -> Option<Vec<&str>> {
        match &self.partners {
            Some(Value::Array(partners)) => partners.iter().map(Value::as_str).collect(),
            _ => None,
        }
    }

    pub fn placement(&self) -> Option<u32> {
        as_count(self.placement.as_ref())
    }

    pub fn total_teams(&self) -> Option<u32> {
        as_count(self.total_teams.as_ref())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TestOff {
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub events: Vec<TestOffEvent>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TestOffEvent {
    #[serde(rename = "event-name")]
    pub name: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Participant {
    #[serde(
        rename = "student-name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub student: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Value>,
}

impl Participant {
    pub fn placement(&self) -> Option<u32> {
        as_count(self.placement.as_ref())
    }
}
