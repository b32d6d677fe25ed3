//! Game-level context facts comparing the two teams.

use serde_json::Value;

use crate::recap::fields::Fields;
use crate::recap::team_stats::{point_word, Venue};
use crate::recap::Fact;

const CLOSE_GAME_MAX: u64 = 5;
const BLOWOUT_MIN: u64 = 11;
const BACK_AND_FORTH_MIN: i64 = 6;
const REBOUND_MARGIN_MIN: u64 = 10;
const TURNOVER_MARGIN_MIN: u64 = 5;

/// Point differential, lead changes, rebounding and turnover edges.
///
/// Missing statistics read as zero. An exact tie on a dimension gives a
/// margin of zero and emits nothing for it. Margins are unsigned so extreme
/// upstream values cannot overflow.
pub fn calculate_game_context(home: &Value, away: &Value) -> Vec<Fact> {
    let mut facts = Vec::new();
    let home_stats = stats_of(home);
    let away_stats = stats_of(away);

    let diff = home.int_or_zero("score").abs_diff(away.int_or_zero("score"));
    let band = if diff <= CLOSE_GAME_MAX {
        " (close game)"
    } else if diff < BLOWOUT_MIN {
        ""
    } else {
        " (blowout)"
    };
    facts.push(Fact::new(format!(
        "Game was decided by {diff} {}{band}",
        point_word(diff)
    )));

    let lead_changes = home_stats.int_or_zero("leadChanges");
    if lead_changes >= BACK_AND_FORTH_MIN {
        facts.push(Fact::new(format!(
            "Game featured {lead_changes} lead changes (back-and-forth)"
        )));
    } else if lead_changes > 0 {
        facts.push(Fact::new(format!("Game had {lead_changes} lead change(s)")));
    }

    let home_rebounds = home_stats.int_or_zero("reboundsTotal");
    let away_rebounds = away_stats.int_or_zero("reboundsTotal");
    let rebound_margin = home_rebounds.abs_diff(away_rebounds);
    if rebound_margin >= REBOUND_MARGIN_MIN {
        let leader = if home_rebounds > away_rebounds {
            Venue::Home
        } else {
            Venue::Away
        };
        facts.push(Fact::new(format!(
            "{leader} team dominated rebounding (+{rebound_margin} rebounds)"
        )));
    }

    let home_turnovers = home_stats.int_or_zero("turnoversTotal");
    let away_turnovers = away_stats.int_or_zero("turnoversTotal");
    let turnover_margin = home_turnovers.abs_diff(away_turnovers);
    if turnover_margin >= TURNOVER_MARGIN_MIN {
        let cleaner = if home_turnovers < away_turnovers {
            Venue::Home
        } else {
            Venue::Away
        };
        facts.push(Fact::new(format!(
            "{cleaner} team had {turnover_margin} fewer turnovers"
        )));
    }

    facts
}

fn stats_of(team: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    team.section("statistics").unwrap_or(&EMPTY)
}
