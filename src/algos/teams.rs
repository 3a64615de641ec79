use crate::error::SolverError;
use crate::model::Agent;

/// Members per team when nothing else is configured.
pub const DEFAULT_TEAM_SIZE: usize = 15;

/// Agents of one team, best first.
pub type Team<'a> = Vec<&'a Agent>;

/// Divide agents into at most `team_count` teams of `team_size` members,
/// the agents with the lowest average weight going to the first teams.
///
/// Agents with the same average keep their original relative order. The last
/// team may be smaller than the others, and no empty team is ever returned.
pub fn divide_teams(
    agents: &[Agent],
    team_count: usize,
    team_size: usize,
) -> Result<Vec<Team<'_>>, SolverError> {
    if team_size == 0 {
        return Err(SolverError::invalid("the team size must be at least 1"));
    }
    let mut sorted = agents
        .iter()
        .map(|agent| (agent, agent.average_weight()))
        .collect::<Vec<_>>();
    // sort_by is stable
    sorted.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    Ok(sorted
        .chunks(team_size)
        .take(team_count)
        .map(|chunk| chunk.iter().map(|&(agent, _)| agent).collect())
        .collect())
}
