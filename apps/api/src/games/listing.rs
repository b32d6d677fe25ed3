//! Maps the raw scoreboard document to the front-end game listing.

use chrono::NaiveDate;
use serde_json::Value;

use crate::games::models::{Game, GameStatus};
use crate::recap::fields::Fields;

/// Builds the listing from `scoreboard.games[]`. Games without an id are skipped.
pub fn games_from_scoreboard(raw: &Value) -> Vec<Game> {
    let Some(scoreboard) = raw.section("scoreboard") else {
        return Vec::new();
    };
    let date = display_date(scoreboard.str_or_empty("gameDate"));

    scoreboard
        .get("games")
        .and_then(Value::as_array)
        .map(|games| {
            games
                .iter()
                .filter_map(|game| game_from_entry(game, &date))
                .collect()
        })
        .unwrap_or_default()
}

fn game_from_entry(entry: &Value, date: &str) -> Option<Game> {
    let id = entry.str_or_empty("gameId");
    if id.is_empty() {
        return None;
    }

    let status = GameStatus::from_code(entry.int_or_zero("gameStatus"));
    let home = entry.section("homeTeam");
    let away = entry.section("awayTeam");
    let score = |team: Option<&Value>| match status {
        GameStatus::Scheduled => None,
        _ => Some(team.map(|t| t.int_or_zero("score")).unwrap_or(0)),
    };

    Some(Game {
        id: id.to_string(),
        away_team: away.map(|t| t.str_or_empty("teamName")).unwrap_or("").to_string(),
        home_team: home.map(|t| t.str_or_empty("teamName")).unwrap_or("").to_string(),
        away_score: score(away),
        home_score: score(home),
        date: date.to_string(),
        status,
    })
}

/// `2024-01-15` → `January 15, 2024`; anything else is returned as given.
pub fn display_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%B %d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scoreboard() -> Value {
        json!({
            "scoreboard": {
                "gameDate": "2024-01-15",
                "games": [
                    {
                        "gameId": "0022300561",
                        "gameStatus": 3,
                        "homeTeam": { "teamName": "Warriors", "score": 115 },
                        "awayTeam": { "teamName": "Lakers", "score": 108 }
                    },
                    {
                        "gameId": "0022300562",
                        "gameStatus": 1,
                        "homeTeam": { "teamName": "Heat", "score": 0 },
                        "awayTeam": { "teamName": "Celtics", "score": 0 }
                    },
                    {
                        "gameId": "0022300563",
                        "gameStatus": 2,
                        "homeTeam": { "teamName": "Suns", "score": 60 },
                        "awayTeam": { "teamName": "Nuggets", "score": 64 }
                    },
                    { "gameStatus": 3 }
                ]
            }
        })
    }

    #[test]
    fn test_listing_maps_status_and_scores() {
        let games = games_from_scoreboard(&scoreboard());
        assert_eq!(games.len(), 3);

        assert_eq!(
            games[0],
            Game {
                id: "0022300561".into(),
                away_team: "Lakers".into(),
                home_team: "Warriors".into(),
                away_score: Some(108),
                home_score: Some(115),
                date: "January 15, 2024".into(),
                status: GameStatus::Finished,
            }
        );
        assert_eq!(games[1].status, GameStatus::Scheduled);
        assert_eq!(games[1].home_score, None);
        assert_eq!(games[2].status, GameStatus::InProgress);
        assert_eq!(games[2].away_score, Some(64));
    }

    #[test]
    fn test_scheduled_game_serializes_null_scores() {
        let games = games_from_scoreboard(&scoreboard());
        let value = serde_json::to_value(&games[1]).unwrap();
        assert_eq!(value["status"], "scheduled");
        assert_eq!(value["homeTeam"], "Heat");
        assert!(value["homeScore"].is_null());
    }

    #[test]
    fn test_missing_scoreboard_is_empty() {
        assert!(games_from_scoreboard(&json!({})).is_empty());
        assert!(games_from_scoreboard(&json!({ "scoreboard": {} })).is_empty());
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-01-05"), "January 05, 2024");
        assert_eq!(display_date("today"), "today");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GameStatus::from_code(1), GameStatus::Scheduled);
        assert_eq!(GameStatus::from_code(2), GameStatus::InProgress);
        assert_eq!(GameStatus::from_code(3), GameStatus::Finished);
        assert_eq!(GameStatus::from_code(0), GameStatus::Scheduled);
    }
}
