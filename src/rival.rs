use serde::{Deserialize, Serialize};

use crate::difficulty::{UNKNOWN_OPPONENT_RANK, difficulty_rating};
use crate::fixtures::Fixture;
use crate::standings::{StandingsEntry, Team, find_entry, team_rank};
use crate::store::{Store, load_typed, rival_key, save_typed};

const RIVAL_HARD_CUT: f64 = 7.0;
const RIVAL_EASY_CUT: f64 = 4.0;

/// A result this round that would hurt the tracked rival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HurtRivalScenario {
    pub fixture: Fixture,
    pub recommendation: String,
    pub reason: String,
}

/// One game in the rival's upcoming run. Difficulty here is rank and
/// venue only; the rival's opponents' form is left out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalFixture {
    pub fixture: Fixture,
    pub is_home: bool,
    pub opponent_rank: u32,
    pub opponent_points: i32,
    pub difficulty: f64,
}

/// How the points gap could move over the rival's run: everything goes
/// your way, one swing game, or everything goes theirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapProjection {
    pub best: i32,
    pub realistic: i32,
    pub worst: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RivalReport {
    pub team_rank: u32,
    pub team_points: i32,
    pub rival_rank: u32,
    pub rival_points: i32,
    /// Positive when the tracked team is ahead.
    pub points_gap: i32,
    pub hurt_scenarios: Vec<HurtRivalScenario>,
    pub rival_run: Vec<RivalFixture>,
    pub hard_games: u32,
    pub medium_games: u32,
    pub easy_games: u32,
    pub projection: GapProjection,
}

/// Sizes up the tracked rival: the current gap, who to root for this
/// round, how rough the rival's run looks and where the gap could land.
/// `None` when either side is missing from the table.
pub fn rival_report(
    target_id: u32,
    rival_id: u32,
    standings: &[StandingsEntry],
    round_fixtures: &[Fixture],
    rival_fixtures: &[Fixture],
) -> Option<RivalReport> {
    let target = find_entry(standings, target_id)?;
    let rival = find_entry(standings, rival_id)?;
    let points_gap = target.points - rival.points;

    let hurt_scenarios: Vec<HurtRivalScenario> = round_fixtures
        .iter()
        .filter(|f| !f.is_settled() && f.involves(rival_id))
        .filter_map(|f| {
            let opponent = f.opponent_of(rival_id)?;
            let reason = if points_gap < 0 {
                format!(
                    "{} dropping points lets {} close the gap",
                    rival.team.name, target.team.name
                )
            } else {
                format!(
                    "{} dropping points lets {} extend the lead",
                    rival.team.name, target.team.name
                )
            };
            Some(HurtRivalScenario {
                fixture: f.clone(),
                recommendation: format!("{} WIN", opponent.name),
                reason,
            })
        })
        .collect();

    let rival_run: Vec<RivalFixture> = rival_fixtures
        .iter()
        .filter(|f| !f.is_settled() && f.involves(rival_id))
        .filter_map(|f| {
            let opponent = f.opponent_of(rival_id)?;
            let entry = find_entry(standings, opponent.id);
            let opponent_rank = match entry {
                Some(_) => team_rank(standings, opponent.id),
                None => UNKNOWN_OPPONENT_RANK,
            };
            let is_home = f.home.id == rival_id;
            Some(RivalFixture {
                fixture: f.clone(),
                is_home,
                opponent_rank,
                opponent_points: entry.map(|e| e.points).unwrap_or(0),
                difficulty: difficulty_rating(opponent_rank, is_home, None),
            })
        })
        .collect();

    let swing = rival_run.len() as i32 * 3;
    Some(RivalReport {
        team_rank: team_rank(standings, target_id),
        team_points: target.points,
        rival_rank: team_rank(standings, rival_id),
        rival_points: rival.points,
        points_gap,
        hard_games: rival_run.iter().filter(|g| g.difficulty >= RIVAL_HARD_CUT).count() as u32,
        medium_games: rival_run
            .iter()
            .filter(|g| g.difficulty >= RIVAL_EASY_CUT && g.difficulty < RIVAL_HARD_CUT)
            .count() as u32,
        easy_games: rival_run.iter().filter(|g| g.difficulty < RIVAL_EASY_CUT).count() as u32,
        projection: GapProjection {
            best: points_gap + swing,
            realistic: points_gap + 3,
            worst: points_gap - swing,
        },
        hurt_scenarios,
        rival_run,
    })
}

pub fn saved_rival(store: &dyn Store, team_id: u32) -> Option<Team> {
    load_typed(store, &rival_key(team_id))
}

pub fn save_rival(store: &mut dyn Store, team_id: u32, rival: &Team) {
    save_typed(store, &rival_key(team_id), rival);
}

pub fn clear_rival(store: &mut dyn Store, team_id: u32) {
    store.delete(&rival_key(team_id));
}
