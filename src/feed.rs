use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::{Lazy, OnceCell};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::fixtures::Fixture;
use crate::standings::{OverallRecord, StandingsEntry, Team};

const API_BASE: &str = "https://v3.football.api-sports.io";
const API_HOST: &str = "v3.football.api-sports.io";
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_LEAGUE: u32 = 39;
pub const DEFAULT_SEASON: u32 = 2025;

static CLIENT: OnceCell<Client> = OnceCell::new();

// .env.local wins over .env; both are optional.
static ENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
});

/// Which league table and season the feed pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueConfig {
    pub league: u32,
    pub season: u32,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            league: DEFAULT_LEAGUE,
            season: DEFAULT_SEASON,
        }
    }
}

impl LeagueConfig {
    pub fn from_env() -> Self {
        Lazy::force(&ENV_LOADED);
        let league = env::var("WHATIF_LEAGUE")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_LEAGUE);
        let season = env::var("WHATIF_SEASON")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SEASON);
        Self { league, season }
    }
}

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

fn api_key() -> Result<String> {
    Lazy::force(&ENV_LOADED);
    let key = env::var("API_FOOTBALL_KEY").context("API_FOOTBALL_KEY missing")?;
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(anyhow::anyhow!("API_FOOTBALL_KEY empty"));
    }
    Ok(key)
}

fn get(path: &str, params: &[(&str, String)]) -> Result<String> {
    let client = http_client()?;
    let key = api_key()?;
    client
        .get(format!("{API_BASE}/{path}"))
        .query(params)
        .header("x-rapidapi-key", key)
        .header("x-rapidapi-host", API_HOST)
        .send()
        .with_context(|| format!("{path} request failed"))?
        .text()
        .with_context(|| format!("{path} body read failed"))
}

fn parse_body(raw: &str) -> Result<Option<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

pub fn fetch_standings(config: LeagueConfig) -> Result<Vec<StandingsEntry>> {
    let body = get(
        "standings",
        &[
            ("league", config.league.to_string()),
            ("season", config.season.to_string()),
        ],
    )?;
    parse_standings_json(&body)
}

pub fn fetch_upcoming_fixtures(config: LeagueConfig, next: u32) -> Result<Vec<Fixture>> {
    let body = get(
        "fixtures",
        &[
            ("league", config.league.to_string()),
            ("season", config.season.to_string()),
            ("next", next.to_string()),
        ],
    )?;
    parse_fixtures_json(&body)
}

pub fn fetch_round_fixtures(config: LeagueConfig, round: &str) -> Result<Vec<Fixture>> {
    let body = get(
        "fixtures",
        &[
            ("league", config.league.to_string()),
            ("season", config.season.to_string()),
            ("round", round.to_string()),
        ],
    )?;
    parse_fixtures_json(&body)
}

/// The team's next few games across the season, not limited to one
/// round.
pub fn fetch_team_fixtures(team_id: u32, next: u32) -> Result<Vec<Fixture>> {
    let body = get(
        "fixtures",
        &[("team", team_id.to_string()), ("next", next.to_string())],
    )?;
    parse_fixtures_json(&body)
}

pub fn fetch_rounds(config: LeagueConfig) -> Result<Vec<String>> {
    let body = get(
        "fixtures/rounds",
        &[
            ("league", config.league.to_string()),
            ("season", config.season.to_string()),
            ("current", "false".to_string()),
        ],
    )?;
    parse_rounds_json(&body)
}

pub fn fetch_current_round(config: LeagueConfig) -> Result<Option<String>> {
    let body = get(
        "fixtures/rounds",
        &[
            ("league", config.league.to_string()),
            ("season", config.season.to_string()),
            ("current", "true".to_string()),
        ],
    )?;
    Ok(parse_rounds_json(&body)?.into_iter().next())
}

/// Pulls the table rows out of a standings payload. An empty or `null`
/// body, or one without the `response[0].league.standings[0]` spine,
/// yields an empty table; rows missing a team id, name or points are
/// skipped.
pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingsEntry>> {
    let Some(v) = parse_body(raw).context("invalid standings json")? else {
        return Ok(Vec::new());
    };
    let Some(rows) = v
        .get("response")
        .and_then(|x| x.get(0))
        .and_then(|x| x.get("league"))
        .and_then(|x| x.get("standings"))
        .and_then(|x| x.get(0))
        .and_then(|x| x.as_array())
    else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for row in rows {
        match parse_standings_row(row) {
            Some(entry) => out.push(entry),
            None => debug!("skipping malformed standings row"),
        }
    }
    Ok(out)
}

fn parse_standings_row(v: &Value) -> Option<StandingsEntry> {
    let team = v.get("team")?;
    let id = team.get("id")?.as_u64()? as u32;
    let name = team.get("name")?.as_str()?.to_string();
    let points = v.get("points")?.as_i64()? as i32;

    let rank = v.get("rank").and_then(|x| x.as_u64()).unwrap_or(0) as u32;
    let goals_diff = v.get("goalsDiff").and_then(|x| x.as_i64()).unwrap_or(0) as i32;
    let form = v
        .get("form")
        .and_then(|x| x.as_str())
        .map(|s| s.to_string());

    let overall = v.get("all");
    let goals = overall.and_then(|a| a.get("goals"));
    let count = |node: Option<&Value>, key: &str| {
        node.and_then(|n| n.get(key))
            .and_then(|x| x.as_u64())
            .unwrap_or(0) as u32
    };
    let all = OverallRecord {
        played: count(overall, "played"),
        win: count(overall, "win"),
        draw: count(overall, "draw"),
        lose: count(overall, "lose"),
        goals_for: count(goals, "for"),
        goals_against: count(goals, "against"),
    };

    Some(StandingsEntry {
        team: Team { id, name },
        rank,
        points,
        goals_diff,
        all,
        form,
    })
}

/// Pulls fixtures out of a fixtures payload, skipping rows without an
/// id or a full pair of teams.
pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let Some(v) = parse_body(raw).context("invalid fixtures json")? else {
        return Ok(Vec::new());
    };
    let Some(rows) = v.get("response").and_then(|x| x.as_array()) else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for row in rows {
        match parse_fixture(row) {
            Some(fixture) => out.push(fixture),
            None => debug!("skipping malformed fixture row"),
        }
    }
    Ok(out)
}

fn parse_fixture(v: &Value) -> Option<Fixture> {
    let meta = v.get("fixture")?;
    let id = meta.get("id")?.as_u64()?;
    let kickoff = meta
        .get("date")
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string();
    let status = meta
        .get("status")
        .and_then(|s| s.get("short"))
        .and_then(|x| x.as_str())
        .unwrap_or("NS")
        .to_string();
    let round = v
        .get("league")
        .and_then(|l| l.get("round"))
        .and_then(|x| x.as_str())
        .unwrap_or_default()
        .to_string();

    let teams = v.get("teams")?;
    let home = parse_team(teams.get("home")?)?;
    let away = parse_team(teams.get("away")?)?;

    Some(Fixture {
        id,
        kickoff,
        status,
        round,
        home,
        away,
    })
}

fn parse_team(v: &Value) -> Option<Team> {
    Some(Team {
        id: v.get("id")?.as_u64()? as u32,
        name: v.get("name")?.as_str()?.to_string(),
    })
}

pub fn parse_rounds_json(raw: &str) -> Result<Vec<String>> {
    let Some(v) = parse_body(raw).context("invalid rounds json")? else {
        return Ok(Vec::new());
    };
    Ok(v.get("response")
        .and_then(|x| x.as_array())
        .map(|rows| {
            rows.iter()
                .filter_map(|r| r.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default())
}
