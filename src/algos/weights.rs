use crate::error::{RecordSource, SkippedRecord};
use crate::model::{Agent, TeamData};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Cost of an event for a student about whom nothing is known.
pub const BASELINE_COST: f64 = 2.0;

#[derive(Clone, Copy, Debug)]
struct TestOffResult {
    placement: u32,
    weight: f64,
}

#[derive(Clone, Copy, Debug)]
struct TournamentResult {
    placement: u32,
    total_teams: u32,
    weight: f64,
}

/// Results indexed by student then by event. Later records overwrite earlier
/// ones for the same student and event.
type Index<'a, T> = HashMap<&'a str, HashMap<&'a str, T>>;

/// Agents built from the historical records, with the records that had to be
/// ignored.
#[derive(Debug)]
pub struct Weighting {
    pub agents: Vec<Agent>,
    pub skipped: Vec<SkippedRecord>,
}

/// Compute the weights indexed by student then by event (less is better).
pub fn compute_weights(data: &TeamData) -> Weighting {
    let mut skipped = Vec::new();
    let test_offs = index_test_offs(data, &mut skipped);
    let tournaments = index_tournaments(data, &mut skipped);
    let field_sizes = test_off_field_sizes(data);
    let agents = data
        .students
        .iter()
        .map(|student| {
            let weights = data
                .events
                .iter()
                .map(|event| {
                    let test_score = lookup(&test_offs, student, event).map_or(0.0, |r| {
                        let participants = field_sizes.get(event.as_str()).copied().unwrap_or(1);
                        weighted_score(normalized_placement(r.placement, participants), r.weight)
                    });
                    let tournament_score = lookup(&tournaments, student, event).map_or(0.0, |r| {
                        weighted_score(normalized_placement(r.placement, r.total_teams), r.weight)
                    });
                    event_cost(tournament_score, test_score)
                })
                .collect();
            Agent::new(student.clone(), weights)
        })
        .collect::<Vec<_>>();
    debug!(
        students = agents.len(),
        events = data.events.len(),
        skipped = skipped.len(),
        "weights computed"
    );
    Weighting { agents, skipped }
}

/// `1 - placement / field`: 1 is unreachable, first place out of many gets close.
pub fn normalized_placement(placement: u32, field: u32) -> f64 {
    1.0 - f64::from(placement) / f64::from(field)
}

/// Weighted mean of a single score, or 0 when the source carries no weight.
fn weighted_score(normalized: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        normalized * weight / weight
    } else {
        0.0
    }
}

/// Combine both scores into a cost between 0 (best) and 2 (no data).
pub fn event_cost(tournament_score: f64, test_score: f64) -> f64 {
    BASELINE_COST - (tournament_score + test_score)
}

fn lookup<'a, T: Copy>(index: &Index<'a, T>, student: &str, event: &str) -> Option<T> {
    index
        .get(student)
        .and_then(|events| events.get(event))
        .copied()
}

fn skip(skipped: &mut Vec<SkippedRecord>, source: RecordSource, event: &str, reason: String) {
    let record = SkippedRecord {
        source,
        event: event.to_owned(),
        reason,
    };
    warn!(record = %record, "skipping malformed record");
    skipped.push(record);
}

fn index_test_offs<'a>(
    data: &'a TeamData,
    skipped: &mut Vec<SkippedRecord>,
) -> Index<'a, TestOffResult> {
    let mut index: Index<'a, TestOffResult> = HashMap::new();
    for (name, test_off) in &data.test_offs {
        for event in &test_off.events {
            for participant in &event.participants {
                let source = || RecordSource::TestOff {
                    test_off: name.clone(),
                };
                let Some(student) = participant.student.as_deref() else {
                    skip(skipped, source(), &event.name, "missing student name".into());
                    continue;
                };
                match participant.placement() {
                    Some(placement) if placement >= 1 => {
                        index.entry(student).or_default().insert(
                            event.name.as_str(),
                            TestOffResult {
                                placement,
                                weight: test_off.weight,
                            },
                        );
                    }
                    _ => skip(
                        skipped,
                        source(),
                        &event.name,
                        format!("missing or invalid placement for {student}"),
                    ),
                }
            }
        }
    }
    index
}

fn index_tournaments<'a>(
    data: &'a TeamData,
    skipped: &mut Vec<SkippedRecord>,
) -> Index<'a, TournamentResult> {
    let mut index: Index<'a, TournamentResult> = HashMap::new();
    for (name, tournament) in &data.tournaments {
        for (team, events) in &tournament.teams {
            for (event, entry) in events {
                let source = || RecordSource::Tournament {
                    tournament: name.clone(),
                    team: team.clone(),
                };
                let Some((entry, partners)) = entry
                    .as_ref()
                    .and_then(|e| e.partner_names().map(|partners| (e, partners)))
                else {
                    skip(
                        skipped,
                        source(),
                        event,
                        "missing or invalid partners field".into(),
                    );
                    continue;
                };
                let (placement, total_teams) = match (entry.placement(), entry.total_teams()) {
                    (Some(placement), Some(total)) if placement >= 1 && placement <= total => {
                        (placement, total)
                    }
                    (Some(placement), Some(total)) => {
                        skip(
                            skipped,
                            source(),
                            event,
                            format!("placement {placement} out of {total} competing teams"),
                        );
                        continue;
                    }
                    _ => {
                        skip(
                            skipped,
                            source(),
                            event,
                            "missing or invalid placement or total competing teams".into(),
                        );
                        continue;
                    }
                };
                for partner in partners {
                    index.entry(partner).or_default().insert(
                        event.as_str(),
                        TournamentResult {
                            placement,
                            total_teams,
                            weight: tournament.weight,
                        },
                    );
                }
            }
        }
    }
    index
}

/// Number of participants of the first test-off event bearing each name.
fn test_off_field_sizes(data: &TeamData) -> HashMap<&str, u32> {
    let mut sizes = HashMap::new();
    for event in data.test_offs.values().flat_map(|t| &t.events) {
        sizes
            .entry(event.name.as_str())
            .or_insert_with(|| u32::try_from(event.participants.len()).unwrap_or(u32::MAX).max(1));
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team_data(value: serde_json::Value) -> TeamData {
        serde_json::from_value(value).unwrap()
    }

    fn weights_of(weighting: &Weighting, student: &str) -> Vec<f64> {
        weighting
            .agents
            .iter()
            .find(|a| a.student == student)
            .unwrap()
            .weights
            .clone()
    }

    #[test]
    fn test_no_data_is_baseline() {
        let w = compute_weights(&team_data(json!({
            "events": ["Anatomy", "Codebusters", "Optics"],
            "students": ["Jane Doe", "Bob Doe"],
            "tournaments": {},
            "test-offs": {}
        })));
        assert_eq!(w.agents.len(), 2);
        assert_eq!(w.agents[0].student, "Jane Doe");
        assert_eq!(w.agents[1].student, "Bob Doe");
        for agent in &w.agents {
            assert_eq!(agent.weights, vec![2.0, 2.0, 2.0]);
        }
        assert!(w.skipped.is_empty());
    }

    #[test]
    fn test_perfect_scores_cost_nothing() {
        // A normalized placement of 1 needs a placement of 0, which is never
        // accepted, so a cost of 0 is only a limit.
        assert_eq!(event_cost(1.0, 1.0), 0.0);
        assert_eq!(event_cost(0.0, 0.0), BASELINE_COST);
        assert_eq!(normalized_placement(1, 4), 0.75);
    }

    #[test]
    fn test_first_place_in_a_large_field_costs_almost_nothing() {
        let participants = (1..=1000)
            .map(|p| json!({"student-name": format!("Student {p}"), "placement": p}))
            .collect::<Vec<_>>();
        let w = compute_weights(&team_data(json!({
            "events": ["Optics"],
            "students": ["Student 1"],
            "tournaments": {"nationals": {"weight": 1, "teams": {"a-team": {"Optics": {
                "partners": ["Student 1"],
                "event-placement": 1,
                "event-total-competing-teams": 1000
            }}}}},
            "test-offs": {"fall": {"weight": 1, "events": [
                {"event-name": "Optics", "participants": participants}
            ]}}
        })));
        let cost = weights_of(&w, "Student 1")[0];
        assert!(cost > 0.0 && cost < 0.01, "cost is {cost}");
    }

    #[test]
    fn test_both_sources() {
        let w = compute_weights(&team_data(json!({
            "events": ["Anatomy", "Optics"],
            "students": ["Jane Doe", "Bob Doe"],
            "tournaments": {
                "regionals": {
                    "tournament-date": "2024-02-10",
                    "weight": 0.5,
                    "teams": {
                        "a-team": {
                            "Anatomy": {
                                "partners": ["Jane Doe"],
                                "event-placement": 1,
                                "event-total-competing-teams": 4
                            }
                        }
                    }
                }
            },
            "test-offs": {
                "fall": {
                    "weight": 0.25,
                    "events": [{
                        "event-name": "Anatomy",
                        "participants": [
                            {"student-name": "Bob Doe", "placement": 1},
                            {"student-name": "Jane Doe", "placement": 2},
                            {"student-name": "Someone Else", "placement": 3},
                            {"student-name": "Another One", "placement": 4}
                        ]
                    }]
                }
            }
        })));
        // 2 - (1 - 1/4) - (1 - 2/4)
        assert_eq!(weights_of(&w, "Jane Doe"), vec![0.75, 2.0]);
        // 2 - (1 - 1/4)
        assert_eq!(weights_of(&w, "Bob Doe"), vec![1.25, 2.0]);
    }

    #[test]
    fn test_last_record_wins() {
        let w = compute_weights(&team_data(json!({
            "events": ["Optics"],
            "students": ["Jane Doe"],
            "tournaments": {
                "invitational": {
                    "weight": 1,
                    "teams": {"a-team": {"Optics": {
                        "partners": ["Jane Doe"],
                        "event-placement": 1,
                        "event-total-competing-teams": 2
                    }}}
                },
                "regionals": {
                    "weight": 1,
                    "teams": {"a-team": {"Optics": {
                        "partners": ["Jane Doe"],
                        "event-placement": 3,
                        "event-total-competing-teams": 4
                    }}}
                }
            }
        })));
        // Only the regionals result (1 - 3/4) is taken into account.
        assert_eq!(weights_of(&w, "Jane Doe"), vec![1.75]);
    }

    #[test]
    fn test_field_size_of_first_matching_test_off() {
        let w = compute_weights(&team_data(json!({
            "events": ["Optics"],
            "students": ["Jane Doe"],
            "test-offs": {
                "fall": {"weight": 1, "events": [{
                    "event-name": "Optics",
                    "participants": [
                        {"student-name": "Bob Doe", "placement": 1},
                        {"student-name": "Eve Doe", "placement": 2}
                    ]
                }]},
                "winter": {"weight": 1, "events": [{
                    "event-name": "Optics",
                    "participants": [
                        {"student-name": "Jane Doe", "placement": 1},
                        {"student-name": "Bob Doe", "placement": 2},
                        {"student-name": "Eve Doe", "placement": 3},
                        {"student-name": "Joe Doe", "placement": 4}
                    ]
                }]}
            }
        })));
        // Placement 1 from winter, divided by the two fall participants.
        assert_eq!(weights_of(&w, "Jane Doe"), vec![1.5]);
    }

    #[test]
    fn test_missing_partners_is_skipped() {
        let w = compute_weights(&team_data(json!({
            "events": ["X", "Y"],
            "students": ["Jane Doe", "Bob Doe"],
            "tournaments": {
                "regionals": {
                    "weight": 1,
                    "teams": {"a-team": {
                        "X": {"event-placement": 1, "event-total-competing-teams": 10},
                        "Y": {
                            "partners": ["Jane Doe"],
                            "event-placement": 1,
                            "event-total-competing-teams": 2
                        }
                    }}
                }
            }
        })));
        assert_eq!(w.skipped.len(), 1);
        assert_eq!(w.skipped[0].event, "X");
        assert_eq!(weights_of(&w, "Jane Doe"), vec![2.0, 1.5]);
        assert_eq!(weights_of(&w, "Bob Doe"), vec![2.0, 2.0]);
    }

    #[test]
    fn test_malformed_records() {
        let w = compute_weights(&team_data(json!({
            "events": ["X"],
            "students": ["Jane Doe"],
            "tournaments": {
                "regionals": {
                    "weight": 1,
                    "teams": {
                        "a-team": {"X": null},
                        "b-team": {"X": {"partners": "Jane Doe", "event-placement": 1, "event-total-competing-teams": 2}},
                        "c-team": {"X": {"partners": ["Jane Doe"], "event-placement": 5, "event-total-competing-teams": 2}},
                        "d-team": {"X": {"partners": ["Jane Doe"], "event-placement": 1}}
                    }
                }
            },
            "test-offs": {
                "fall": {"weight": 1, "events": [{
                    "event-name": "X",
                    "participants": [{"placement": 1}, {"student-name": "Jane Doe", "placement": 0}]
                }]}
            }
        })));
        assert_eq!(w.skipped.len(), 6);
        assert_eq!(weights_of(&w, "Jane Doe"), vec![2.0]);
    }

    #[test]
    fn test_wrongly_typed_placements_are_skipped() {
        let w = compute_weights(&team_data(json!({
            "events": ["X", "Y", "Z"],
            "students": ["Jane Doe", "Bob Doe"],
            "tournaments": {
                "regionals": {
                    "weight": 1,
                    "teams": {"a-team": {
                        "X": {"partners": ["Jane Doe"], "event-placement": "1", "event-total-competing-teams": 2},
                        "Y": {"partners": ["Jane Doe"], "event-placement": 1, "event-total-competing-teams": 2}
                    }}
                }
            },
            "test-offs": {
                "fall": {"weight": 1, "events": [{
                    "event-name": "Z",
                    "participants": [
                        {"student-name": "Jane Doe", "placement": 1.5},
                        {"student-name": "Bob Doe", "placement": 1}
                    ]
                }]}
            }
        })));
        assert_eq!(w.skipped.len(), 2);
        assert_eq!(w.skipped[0].event, "Z");
        assert_eq!(w.skipped[1].event, "X");
        assert_eq!(weights_of(&w, "Jane Doe"), vec![2.0, 1.5, 2.0]);
        // 2 - (1 - 1/2)
        assert_eq!(weights_of(&w, "Bob Doe"), vec![2.0, 2.0, 1.5]);
    }

    #[test]
    fn test_weightless_sources_are_ignored() {
        let w = compute_weights(&team_data(json!({
            "events": ["X"],
            "students": ["Jane Doe"],
            "tournaments": {
                "scrimmage": {
                    "weight": 0,
                    "teams": {"a-team": {"X": {
                        "partners": ["Jane Doe"],
                        "event-placement": 1,
                        "event-total-competing-teams": 2
                    }}}
                }
            }
        })));
        assert_eq!(weights_of(&w, "Jane Doe"), vec![2.0]);
    }
}
