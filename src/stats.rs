use crate::model::Assignment;
use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub struct TeamCost {
    pub team: String,
    pub events: usize,
    pub seats: usize,
    pub total: f64,
}

impl TeamCost {
    pub fn mean(&self) -> f64 {
        if self.seats == 0 {
            0.0
        } else {
            self.total / self.seats as f64
        }
    }
}

/// Number of events every student has been selected for, in student order.
/// A student selected twice for the same event counts twice.
pub fn events_per_student<'a>(
    students: &'a [String],
    assignments: &[Assignment],
) -> Vec<(&'a str, usize)> {
    let mut counts = students
        .iter()
        .map(|s| (s.as_str(), 0))
        .collect::<IndexMap<_, _>>();
    for student in assignments.iter().flat_map(|a| &a.agents) {
        if let Some(count) = counts.get_mut(student.as_str()) {
            *count += 1;
        }
    }
    counts.into_iter().collect()
}

/// Students who have not been selected for any event.
pub fn idle_students<'a>(students: &'a [String], assignments: &[Assignment]) -> Vec<&'a str> {
    events_per_student(students, assignments)
        .into_iter()
        .filter_map(|(s, n)| (n == 0).then_some(s))
        .collect()
}

/// Costs per team, in team order.
pub fn team_costs(assignments: &[Assignment]) -> Vec<TeamCost> {
    let mut costs: IndexMap<&str, TeamCost> = IndexMap::new();
    for a in assignments {
        let cost = costs.entry(a.team.as_str()).or_insert_with(|| TeamCost {
            team: a.team.clone(),
            events: 0,
            seats: 0,
            total: 0.0,
        });
        cost.events += 1;
        cost.seats += a.agents.len();
        cost.total += a.cost;
    }
    costs.into_values().collect()
}
