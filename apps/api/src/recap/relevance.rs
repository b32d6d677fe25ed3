//! Relevance filter: reduces a raw box score to the ordered fact list.
//!
//! Order: time of day → venue → sellout → home team → away team → context.

use serde_json::Value;

use crate::recap::fields::Fields;
use crate::recap::game_context::calculate_game_context;
use crate::recap::team_stats::{extract_team_facts, Venue};
use crate::recap::time_of_day::classify;
use crate::recap::Fact;

/// Extracts the relevant facts from a full box-score record.
///
/// A record without a `game` section yields no facts. Team lines are produced
/// for every team record present; context lines need both.
pub fn filter_relevant_statistics(record: &Value) -> Vec<Fact> {
    let Some(game) = record.section("game") else {
        tracing::debug!("box score has no game section");
        return Vec::new();
    };

    let mut facts = Vec::new();

    let tip_off = game.str_or_empty("gameTimeLocal");
    if !tip_off.is_empty() {
        facts.push(Fact::new(format!("Game was played in the {}", classify(tip_off))));
    }

    if let Some(arena) = game.section("arena") {
        let name = arena.str_or_empty("arenaName");
        let city = arena.str_or_empty("arenaCity");
        if !name.is_empty() && !city.is_empty() {
            facts.push(Fact::new(format!("Venue: {name} in {city}")));
        }
    }

    if is_sellout(game.get("sellout")) {
        facts.push(Fact::new("Arena was sold out"));
    }

    let home = game.section("homeTeam");
    let away = game.section("awayTeam");

    if let Some(home) = home {
        facts.extend(extract_team_facts(home, Venue::Home));
    }
    if let Some(away) = away {
        facts.extend(extract_team_facts(away, Venue::Away));
    }
    if let (Some(home), Some(away)) = (home, away) {
        facts.extend(calculate_game_context(home, away));
    }

    tracing::debug!(count = facts.len(), "relevant facts extracted");
    facts
}

/// The upstream feed flags sellouts as `"1"`; a literal `true` is accepted too.
/// Integer `1` or `"true"` are not sellouts.
fn is_sellout(flag: Option<&Value>) -> bool {
    match flag {
        Some(Value::String(s)) => s == "1",
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}
