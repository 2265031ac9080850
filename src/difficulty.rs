use serde::{Deserialize, Serialize};

use crate::fixtures::Fixture;
use crate::standings::{StandingsEntry, Team, find_entry, form_points, team_rank};

/// Rank assumed for an opponent missing from the table. Keeps a gap in
/// the feed from reading as an easy game.
pub const UNKNOWN_OPPONENT_RANK: u32 = 10;

const HOT_FORM_POINTS: f64 = 12.0;
const COLD_FORM_POINTS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLabel {
    VeryEasy,
    Easy,
    Medium,
    Hard,
    VeryHard,
}

/// Difficulty of one game on a 1 to 10 scale. Base score follows the
/// opponent's rank tier, away trips cost an extra point while home games
/// shave half a point, and an opponent on a hot or cold run moves the
/// score one more point. A rank of 0 reads as unknown.
pub fn difficulty_rating(opponent_rank: u32, is_home: bool, opponent_form: Option<&str>) -> f64 {
    let rank = if opponent_rank == 0 {
        UNKNOWN_OPPONENT_RANK
    } else {
        opponent_rank
    };
    let mut rating: f64 = match rank {
        1..=2 => 10.0,
        3..=4 => 9.0,
        5..=6 => 8.0,
        7..=10 => 6.0,
        11..=14 => 4.0,
        15..=17 => 3.0,
        _ => 2.0,
    };
    if is_home {
        rating -= 0.5;
    } else {
        rating += 1.0;
    }
    if let Some(form) = opponent_form {
        let fp = form_points(form);
        if fp >= HOT_FORM_POINTS {
            rating += 1.0;
        } else if fp <= COLD_FORM_POINTS {
            rating -= 1.0;
        }
    }
    rating.clamp(1.0, 10.0)
}

pub fn difficulty_label(rating: f64) -> DifficultyLabel {
    if rating >= 8.5 {
        DifficultyLabel::VeryHard
    } else if rating >= 7.0 {
        DifficultyLabel::Hard
    } else if rating >= 5.0 {
        DifficultyLabel::Medium
    } else if rating >= 3.0 {
        DifficultyLabel::Easy
    } else {
        DifficultyLabel::VeryEasy
    }
}

/// One upcoming game for the team under review, scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedFixture {
    pub fixture: Fixture,
    pub is_home: bool,
    pub opponent: Team,
    pub opponent_rank: u32,
    pub opponent_points: i32,
    pub opponent_goals_diff: i32,
    pub rating: f64,
    pub label: DifficultyLabel,
}

/// Scores the team's pending fixtures in order. Fixtures not involving
/// the team are ignored; an opponent absent from the table is scored at
/// the unknown rank with a blank record.
pub fn rate_run(team_id: u32, standings: &[StandingsEntry], fixtures: &[Fixture]) -> Vec<RatedFixture> {
    fixtures
        .iter()
        .filter(|f| !f.is_settled() && f.involves(team_id))
        .filter_map(|f| {
            let opponent = f.opponent_of(team_id)?.clone();
            let entry = find_entry(standings, opponent.id);
            let opponent_rank = match entry {
                Some(_) => team_rank(standings, opponent.id),
                None => UNKNOWN_OPPONENT_RANK,
            };
            let is_home = f.home.id == team_id;
            let rating = difficulty_rating(
                opponent_rank,
                is_home,
                entry.and_then(|e| e.form.as_deref()),
            );
            Some(RatedFixture {
                fixture: f.clone(),
                is_home,
                opponent,
                opponent_rank,
                opponent_points: entry.map(|e| e.points).unwrap_or(0),
                opponent_goals_diff: entry.map(|e| e.goals_diff).unwrap_or(0),
                rating,
                label: difficulty_label(rating),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub average: f64,
    pub label: DifficultyLabel,
    pub hard: u32,
    pub medium: u32,
    pub easy: u32,
    pub home: u32,
    pub away: u32,
    pub best_case_points: u32,
    pub expected_points: u32,
    pub worst_case_points: u32,
}

/// Rolls a rated run up into counts and a points forecast. The expected
/// haul gives each game a win chance that fades with difficulty, floored
/// at 10 percent, plus a flat quarter point for the draw share. An empty
/// run reports zeros.
pub fn summarize_run(run: &[RatedFixture]) -> RunSummary {
    if run.is_empty() {
        return RunSummary {
            average: 0.0,
            label: difficulty_label(0.0),
            hard: 0,
            medium: 0,
            easy: 0,
            home: 0,
            away: 0,
            best_case_points: 0,
            expected_points: 0,
            worst_case_points: 0,
        };
    }

    let average = run.iter().map(|r| r.rating).sum::<f64>() / run.len() as f64;
    let mut expected = 0.0;
    for rated in run {
        let win_chance = (1.0 - rated.rating / 12.0).max(0.1);
        expected += win_chance * 3.0 + 0.25;
    }

    RunSummary {
        average,
        label: difficulty_label(average),
        hard: run.iter().filter(|r| r.rating >= 7.0).count() as u32,
        medium: run.iter().filter(|r| r.rating >= 5.0 && r.rating < 7.0).count() as u32,
        easy: run.iter().filter(|r| r.rating < 5.0).count() as u32,
        home: run.iter().filter(|r| r.is_home).count() as u32,
        away: run.iter().filter(|r| !r.is_home).count() as u32,
        best_case_points: run.len() as u32 * 3,
        expected_points: expected.round() as u32,
        worst_case_points: 0,
    }
}
