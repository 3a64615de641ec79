use crate::error::SkippedRecord;
use crate::model::Assignment;
use crate::stats;
use std::io::{self, Write};

/// Print every team with the students selected for each event.
pub fn display_details<W: Write>(out: &mut W, assignments: &[Assignment]) -> io::Result<()> {
    let mut current = None;
    for a in assignments {
        if current != Some(a.team.as_str()) {
            if current.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "{}:", a.team)?;
            current = Some(a.team.as_str());
        }
        writeln!(
            out,
            "  - {}: {} (cost {:.2})",
            a.task,
            a.agents.join(", "),
            a.cost
        )?;
    }
    Ok(())
}

pub fn display_stats<W: Write>(
    out: &mut W,
    students: &[String],
    assignments: &[Assignment],
) -> io::Result<()> {
    writeln!(out, "Team costs (total/mean per seat):")?;
    for cost in stats::team_costs(assignments) {
        writeln!(
            out,
            "  - {}: {:.2}/{:.2} over {} events",
            cost.team,
            cost.total,
            cost.mean(),
            cost.events
        )?;
    }
    let mut counts = stats::events_per_student(students, assignments)
        .into_iter()
        .filter(|&(_, n)| n > 0)
        .collect::<Vec<_>>();
    counts.sort_by_key(|&(s, n)| (std::cmp::Reverse(n), s));
    if !counts.is_empty() {
        writeln!(out, "Events per student:")?;
        for (student, n) in counts {
            writeln!(out, "  - {student}: {n}")?;
        }
    }
    let idle = stats::idle_students(students, assignments);
    if !idle.is_empty() {
        writeln!(out, "Students without any event:")?;
        for student in idle {
            writeln!(out, "  - {student}")?;
        }
    }
    Ok(())
}

pub fn display_skipped<W: Write>(out: &mut W, skipped: &[SkippedRecord]) -> io::Result<()> {
    if !skipped.is_empty() {
        writeln!(out, "Skipped records:")?;
        for record in skipped {
            writeln!(out, "  - {record}")?;
        }
    }
    Ok(())
}
