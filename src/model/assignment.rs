use serde::{Deserialize, Serialize};

/// Students selected for one event of one team.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Assignment {
    pub task: String,
    pub agents: Vec<String>,
    pub cost: f64,
    pub team: String,
}

impl Assignment {
    /// Whether the same student appears more than once in the roster.
    pub fn has_duplicates(&self) -> bool {
        self.agents
            .iter()
            .enumerate()
            .any(|(i, a)| self.agents[..i].contains(a))
    }
}

#[test]
fn test_serialized_shape() {
    let a = Assignment {
        task: "Anatomy".into(),
        agents: vec!["Jane Doe".into(), "Bob Doe".into()],
        cost: 2.5,
        team: "Team 1".into(),
    };
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        r#"{"task":"Anatomy","agents":["Jane Doe","Bob Doe"],"cost":2.5,"team":"Team 1"}"#
    );
    assert!(!a.has_duplicates());
    let a = Assignment {
        agents: vec!["Jane Doe".into(), "Jane Doe".into()],
        ..a
    };
    assert!(a.has_duplicates());
}
