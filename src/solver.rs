use crate::algos::{
    DEFAULT_TEAM_SIZE, HeadcountPolicy, Weighting, assign_tasks, compute_weights, divide_teams,
};
use crate::checks;
use crate::error::{SkippedRecord, SolverError};
use crate::model::{Agent, Assignment, TeamData};
use tracing::{info, instrument};

/// Tunable parts of the computation.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub team_size: usize,
    pub headcounts: HeadcountPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            headcounts: HeadcountPolicy::default(),
        }
    }
}

#[derive(Debug)]
pub struct Solution {
    /// Team 1's assignments in event order, then team 2's, and so on.
    pub assignments: Vec<Assignment>,
    /// Historical records which were ignored.
    pub skipped: Vec<SkippedRecord>,
    /// Number of teams which were actually formed.
    pub teams: usize,
}

pub fn team_name(index: usize) -> String {
    format!("Team {}", index + 1)
}

/// Compute the assignments of `team_count` teams from the team data.
#[instrument(skip(data, settings), fields(team_size = settings.team_size))]
pub fn compute(
    data: &TeamData,
    team_count: usize,
    settings: &Settings,
) -> Result<Solution, SolverError> {
    if team_count == 0 {
        return Err(SolverError::invalid("the number of teams must be at least 1"));
    }
    if settings.team_size == 0 {
        return Err(SolverError::invalid("the team size must be at least 1"));
    }
    let Weighting { agents, skipped } = compute_weights(data);
    let (assignments, teams) = assign_teams(&agents, &data.events, team_count, settings)?;
    checks::ensure_complete(&assignments, &data.events, teams, &settings.headcounts)?;
    checks::check_duplicates(&assignments);
    info!(
        teams,
        assignments = assignments.len(),
        skipped = skipped.len(),
        "assignments computed"
    );
    Ok(Solution {
        assignments,
        skipped,
        teams,
    })
}

/// Divide agents into teams and assign events within every team. Returns the
/// assignments and the number of teams formed.
pub fn assign_teams(
    agents: &[Agent],
    events: &[String],
    team_count: usize,
    settings: &Settings,
) -> Result<(Vec<Assignment>, usize), SolverError> {
    let teams = divide_teams(agents, team_count, settings.team_size)?;
    info!(
        students = agents.len(),
        requested = team_count,
        formed = teams.len(),
        "students divided into teams"
    );
    let mut assignments = Vec::with_capacity(teams.len() * events.len());
    for (index, team) in teams.iter().enumerate() {
        assignments.extend(assign_tasks(
            team,
            events,
            &team_name(index),
            &settings.headcounts,
        )?);
    }
    Ok((assignments, teams.len()))
}
