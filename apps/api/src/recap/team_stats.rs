//! Per-team fact extraction.
//!
//! Thresholds below decide what counts as a notable stat line. They are exact
//! cutoffs: the boundary values themselves are not notable.

use std::fmt;

use serde_json::Value;

use crate::recap::fields::Fields;
use crate::recap::Fact;

const FG_PCT_HIGH: f64 = 0.5;
const FG_PCT_LOW: f64 = 0.4;
const THREE_PCT_HIGH: f64 = 0.4;
const THREE_PCT_LOW: f64 = 0.25;
/// A cold three-point night only matters with real volume behind it.
const THREE_MADE_MIN_FOR_COLD: i64 = 5;
const FAST_BREAK_MIN: i64 = 15;
const POINTS_OFF_TURNOVERS_MIN: i64 = 15;

/// Which side of the floor a team record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn label(&self) -> &'static str {
        match self {
            Venue::Home => "Home",
            Venue::Away => "Away",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `"{city} {name}"` with surrounding whitespace removed.
pub fn team_display_name(team: &Value) -> String {
    format!("{} {}", team.str_or_empty("teamCity"), team.str_or_empty("teamName"))
        .trim()
        .to_string()
}

/// Extracts the ordered facts for one team.
///
/// The venue only attributes the record; both sides go through the same rules.
/// When the `statistics` mapping is absent only the score line is produced.
pub fn extract_team_facts(team: &Value, venue: Venue) -> Vec<Fact> {
    let name = team_display_name(team);
    tracing::trace!(team = %name, venue = %venue, "extracting team facts");

    let mut facts = vec![Fact::new(format!(
        "{name}: {} points",
        team.int_or_zero("score")
    ))];

    let Some(stats) = team.section("statistics") else {
        return facts;
    };

    let bench_points = stats.int_or_zero("benchPoints");
    if bench_points > 0 {
        facts.push(Fact::new(format!("{name} bench: {bench_points} points")));
    }

    let biggest_lead = stats.int_or_zero("biggestLead");
    if biggest_lead > 0 {
        facts.push(Fact::new(format!(
            "{name} biggest lead: {biggest_lead} {} ({})",
            point_word(biggest_lead.unsigned_abs()),
            stats.str_or_empty("biggestLeadScore")
        )));
    }

    facts.push(Fact::new(format!(
        "{name} rebounds: {} total ({} offensive, {} defensive)",
        stats.int_or_zero("reboundsTotal"),
        stats.int_or_zero("reboundsOffensive"),
        stats.int_or_zero("reboundsDefensive")
    )));

    facts.push(Fact::new(format!(
        "{name} turnovers: {}",
        stats.int_or_zero("turnoversTotal")
    )));

    let fg_pct = stats.float_or_zero("fieldGoalsPercentage");
    if is_notable_field_goal_pct(fg_pct) {
        facts.push(Fact::new(format!(
            "{name} field goal percentage: {}",
            format_percentage(fg_pct)
        )));
    }

    let three_pct = stats.float_or_zero("threePointersPercentage");
    let three_made = stats.int_or_zero("threePointersMade");
    if is_notable_three_point_line(three_pct, three_made) {
        facts.push(Fact::new(format!(
            "{name} three-pointers: {three_made} made ({})",
            format_percentage(three_pct)
        )));
    }

    let fast_break = stats.int_or_zero("pointsFastBreak");
    if fast_break >= FAST_BREAK_MIN {
        facts.push(Fact::new(format!("{name} fast break points: {fast_break}")));
    }

    let off_turnovers = stats.int_or_zero("pointsFromTurnovers");
    if off_turnovers >= POINTS_OFF_TURNOVERS_MIN {
        facts.push(Fact::new(format!(
            "{name} points off turnovers: {off_turnovers}"
        )));
    }

    facts
}

pub fn is_notable_field_goal_pct(pct: f64) -> bool {
    pct > FG_PCT_HIGH || pct < FG_PCT_LOW
}

pub fn is_notable_three_point_line(pct: f64, made: i64) -> bool {
    pct > THREE_PCT_HIGH || (pct < THREE_PCT_LOW && made > THREE_MADE_MIN_FOR_COLD)
}

/// `"point"` for exactly one, `"points"` otherwise (including zero).
pub fn point_word(n: u64) -> &'static str {
    if n == 1 {
        "point"
    } else {
        "points"
    }
}

/// Renders a 0..1 ratio as a percentage with one decimal place.
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
