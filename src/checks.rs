use crate::algos::HeadcountPolicy;
use crate::error::SolverError;
use crate::model::Assignment;
use crate::solver::team_name;
use tracing::warn;

pub fn check_duplicates(assignments: &[Assignment]) {
    for a in assignments.iter().filter(|a| a.has_duplicates()) {
        warn!(
            team = %a.team,
            event = %a.task,
            agents = ?a.agents,
            "student selected more than once for the same event"
        );
    }
}

/// Ensure that every team got one assignment per event, in event order, each
/// with as many students as the event requires.
pub fn ensure_complete(
    assignments: &[Assignment],
    events: &[String],
    teams: usize,
    headcounts: &HeadcountPolicy,
) -> Result<(), SolverError> {
    if assignments.len() != teams * events.len() {
        return Err(SolverError::failure(format!(
            "{} assignments for {teams} teams and {} events",
            assignments.len(),
            events.len()
        )));
    }
    if events.is_empty() {
        return Ok(());
    }
    for (index, chunk) in assignments.chunks(events.len()).enumerate() {
        let team = team_name(index);
        for (a, event) in chunk.iter().zip(events) {
            if a.team != team || &a.task != event {
                return Err(SolverError::failure(format!(
                    "found {} for {} where {event} for {team} was expected",
                    a.task, a.team
                )));
            }
            let required = headcounts.required(event);
            if a.agents.len() != required {
                return Err(SolverError::failure(format!(
                    "{team} has {} students for {event} instead of {required}",
                    a.agents.len()
                )));
            }
        }
    }
    Ok(())
}
