use crate::display;
use crate::model::Assignment;
use clap::ValueEnum;
use eyre::Result;
use std::io::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human readable, grouped by team
    #[default]
    Table,
    /// The list of assignments as JSON
    Json,
    /// One line per assignment
    Csv,
}

pub fn write_assignments<W: Write>(
    out: &mut W,
    assignments: &[Assignment],
    format: Format,
) -> Result<()> {
    match format {
        Format::Table => display::display_details(out, assignments)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, assignments)?;
            writeln!(out)?;
        }
        Format::Csv => write_csv(out, assignments)?,
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, assignments: &[Assignment]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["team", "task", "agents", "cost"])?;
    for a in assignments {
        writer.write_record([
            a.team.as_str(),
            a.task.as_str(),
            a.agents.join("; ").as_str(),
            a.cost.to_string().as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignments() -> Vec<Assignment> {
        vec![Assignment {
            task: "Experimental Design".into(),
            agents: vec!["Jane Doe".into(), "Bob Doe".into(), "Eve Doe".into()],
            cost: 4.25,
            team: "Team 1".into(),
        }]
    }

    #[test]
    fn test_json() {
        let mut out = Vec::new();
        write_assignments(&mut out, &assignments(), Format::Json).unwrap();
        let back: Vec<Assignment> = serde_json::from_slice(&out).unwrap();
        assert_eq!(back, assignments());
    }

    #[test]
    fn test_csv() {
        let mut out = Vec::new();
        write_assignments(&mut out, &assignments(), Format::Csv).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "team,task,agents,cost\nTeam 1,Experimental Design,Jane Doe; Bob Doe; Eve Doe,4.25\n"
        );
    }
}
