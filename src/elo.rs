use serde::{Deserialize, Serialize};

use crate::standings::{StandingsEntry, form_points};

const BASE_RATING: f64 = 2000.0;
const RANK_STEP: f64 = 40.0;
const POINTS_WEIGHT: f64 = 50.0;
const GD_WEIGHT: f64 = 2.0;
const FORM_WEIGHT: f64 = 10.0;
const FORM_BASELINE: f64 = 7.5;
const HOME_ADVANTAGE: f64 = 65.0;
const WIN_PROB_FLOOR: f64 = 0.05;
const WIN_PROB_CEIL: f64 = 0.85;

/// Probabilities for one pending match, in whole percent. The three
/// percentages are rounded independently, so they sum to 100 plus or
/// minus one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    pub home_win_pct: u32,
    pub draw_pct: u32,
    pub away_win_pct: u32,
    pub predicted_score: String,
    pub confidence: u32,
}

/// Strength score derived from the current table row. Anchored at 2000
/// for a notional top side and shaded by rank, points pace, goal
/// difference and recent form. A rank of 0 is treated as 1. Missing
/// form sits at the neutral baseline.
pub fn team_rating(entry: &StandingsEntry, rank: u32) -> i32 {
    let rank = rank.max(1) as f64;
    let form = entry
        .form
        .as_deref()
        .map(form_points)
        .unwrap_or(FORM_BASELINE);
    let rating = BASE_RATING - (rank - 1.0) * RANK_STEP
        + entry.points as f64 / 15.0 * POINTS_WEIGHT
        + entry.goals_diff as f64 * GD_WEIGHT
        + (form - FORM_BASELINE) * FORM_WEIGHT;
    rating.round() as i32
}

/// Turns a pair of ratings into match probabilities. Home advantage is
/// worth a flat 65 rating points. The effective difference picks one of
/// five bands; the favored side gets a linear share, the draw a fixed
/// seed, and the other side the remainder. Win probabilities are then
/// clamped to [0.05, 0.85] and the draw takes up whatever is left.
pub fn predict_match(home_rating: i32, away_rating: i32) -> MatchPrediction {
    let d = home_rating as f64 + HOME_ADVANTAGE - away_rating as f64;

    let (home, away) = if d > 150.0 {
        let h = (0.45 + d / 600.0).min(0.75);
        (h, 1.0 - h - 0.20)
    } else if d > 50.0 {
        let h = 0.40 + d / 500.0;
        (h, 1.0 - h - 0.28)
    } else if d > -50.0 {
        let h = 0.38 + d / 400.0;
        (h, 1.0 - h - 0.30)
    } else if d > -150.0 {
        let a = 0.40 - d / 500.0;
        (1.0 - a - 0.28, a)
    } else {
        let a = (0.45 - d / 600.0).min(0.70);
        (1.0 - a - 0.22, a)
    };

    let home = home.clamp(WIN_PROB_FLOOR, WIN_PROB_CEIL);
    let away = away.clamp(WIN_PROB_FLOOR, WIN_PROB_CEIL);
    let draw = 1.0 - home - away;

    let predicted_score = if home > 0.55 {
        if d > 200.0 {
            "3-0"
        } else if d > 100.0 {
            "2-0"
        } else {
            "2-1"
        }
    } else if away > 0.55 {
        if d < -200.0 {
            "0-3"
        } else if d < -100.0 {
            "0-2"
        } else {
            "1-2"
        }
    } else if draw > 0.28 {
        "1-1"
    } else if home >= away {
        "1-0"
    } else {
        "0-1"
    }
    .to_string();

    MatchPrediction {
        home_win_pct: pct(home),
        draw_pct: pct(draw),
        away_win_pct: pct(away),
        predicted_score,
        confidence: pct(home.max(draw).max(away)),
    }
}

fn pct(p: f64) -> u32 {
    (p * 100.0).round() as u32
}
