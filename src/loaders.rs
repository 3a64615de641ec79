use crate::error::SolverError;
use crate::model::TeamData;
use eyre::{Result, WrapErr};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, trace};

/// What to compute: the team data, and the number of teams if the document
/// carries one.
#[derive(Debug)]
pub struct Request {
    pub data: TeamData,
    pub team_count: Option<usize>,
}

/// Load a request from a file, or from standard input if the path is `-`.
pub fn load(path: &Path) -> Result<Request> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .wrap_err("cannot read team data from standard input")?;
        content
    } else {
        fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read team data from {}", path.display()))?
    };
    let request = parse_request(&content)?;
    debug!(
        events = request.data.events.len(),
        students = request.data.students.len(),
        tournaments = request.data.tournaments.len(),
        test_offs = request.data.test_offs.len(),
        "team data loaded"
    );
    Ok(request)
}

/// Parse either a request envelope `{"data": ..., "teamCount": n}` or a bare
/// team data document.
pub fn parse_request(content: &str) -> Result<Request, SolverError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| SolverError::invalid(format!("cannot parse JSON: {e}")))?;
    let Value::Object(mut object) = value else {
        return Err(SolverError::invalid("expected a JSON object"));
    };
    if !object.contains_key("data") && !object.contains_key("teamCount") {
        trace!("bare team data document");
        return Ok(Request {
            data: parse_team_data(Value::Object(object))?,
            team_count: None,
        });
    }
    let data = take(&mut object, "data").ok_or_else(|| SolverError::invalid("missing data"))?;
    let team_count = take(&mut object, "teamCount")
        .ok_or_else(|| SolverError::invalid("missing teamCount"))?;
    let team_count = team_count
        .as_u64()
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            SolverError::invalid(format!(
                "teamCount must be a positive integer, not {team_count}"
            ))
        })?;
    Ok(Request {
        data: parse_team_data(data)?,
        team_count: Some(team_count),
    })
}

/// Remove a field, treating `null` as missing.
fn take(object: &mut Map<String, Value>, key: &str) -> Option<Value> {
    object.remove(key).filter(|v| !v.is_null())
}

pub fn parse_team_data(value: Value) -> Result<TeamData, SolverError> {
    if !value.get("events").is_some_and(Value::is_array) {
        return Err(SolverError::invalid("invalid data format: events must be a list"));
    }
    serde_json::from_value(value)
        .map_err(|e| SolverError::invalid(format!("invalid data format: {e}")))
}
