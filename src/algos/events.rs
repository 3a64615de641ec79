use crate::error::SolverError;
use crate::model::{Agent, Assignment};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::{debug, trace};

/// Events which need three students instead of two.
pub const THREE_PERSON_EVENTS: [&str; 2] = ["Codebusters", "Experimental Design"];

/// Number of students required by every event.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadcountPolicy {
    default: usize,
    events: HashMap<String, usize>,
}

impl HeadcountPolicy {
    /// A policy requiring `default` students for every event.
    pub fn new(default: usize) -> Self {
        Self {
            default,
            events: HashMap::new(),
        }
    }

    pub fn with_event(mut self, event: impl Into<String>, headcount: usize) -> Self {
        self.events.insert(event.into(), headcount);
        self
    }

    pub fn required(&self, event: &str) -> usize {
        self.events.get(event).copied().unwrap_or(self.default)
    }
}

impl Default for HeadcountPolicy {
    fn default() -> Self {
        THREE_PERSON_EVENTS
            .iter()
            .fold(Self::new(2), |policy, event| policy.with_event(*event, 3))
    }
}

/// A team member considered for an event. The greatest candidate has the
/// smallest weight, and the earliest position among equal weights.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    weight: f64,
    position: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Cheapest agent of the whole team for an event, the first one on ties.
fn cheapest(agents: &[&Agent], event: usize) -> Option<Candidate> {
    agents
        .iter()
        .enumerate()
        .map(|(position, agent)| Candidate {
            weight: agent.weights[event],
            position,
        })
        .min_by(|a, b| a.weight.total_cmp(&b.weight))
}

/// Select, for every event, the cheapest members of a team.
///
/// Events are processed independently: the same student may be selected for
/// any number of events. When the team has fewer members than an event
/// requires, the cheapest member is selected again until the roster is full.
pub fn assign_tasks(
    agents: &[&Agent],
    events: &[String],
    team: &str,
    headcounts: &HeadcountPolicy,
) -> Result<Vec<Assignment>, SolverError> {
    if let Some(agent) = agents.iter().find(|a| a.weights.len() != events.len()) {
        return Err(SolverError::failure(format!(
            "{agent} has {} weights for {} events",
            agent.weights.len(),
            events.len()
        )));
    }
    let mut assignments = Vec::with_capacity(events.len());
    for (i, event) in events.iter().enumerate() {
        let required = headcounts.required(event);
        let mut heap = agents
            .iter()
            .enumerate()
            .map(|(position, agent)| Candidate {
                weight: agent.weights[i],
                position,
            })
            .collect::<BinaryHeap<_>>();
        let mut selected = Vec::with_capacity(required);
        while selected.len() < required {
            let Some(candidate) = heap.pop() else { break };
            selected.push(candidate);
        }
        while selected.len() < required {
            let fallback = cheapest(agents, i).ok_or_else(|| {
                SolverError::failure(format!("{team} has no students to assign to {event}"))
            })?;
            debug!(
                team,
                event = %event,
                student = %agents[fallback.position],
                required,
                "not enough students in team, selecting the cheapest one again"
            );
            selected.push(fallback);
        }
        let assignment = Assignment {
            task: event.clone(),
            agents: selected
                .iter()
                .map(|c| agents[c.position].student.clone())
                .collect(),
            cost: selected.iter().map(|c| c.weight).sum(),
            team: team.to_owned(),
        };
        trace!(
            team,
            event = %event,
            agents = ?assignment.agents,
            cost = assignment.cost,
            "event assigned"
        );
        assignments.push(assignment);
    }
    Ok(assignments)
}
