use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::elo::{MatchPrediction, predict_match, team_rating};
use crate::fixtures::Fixture;
use crate::standings::StandingsEntry;

pub const DEFAULT_TRIALS: u32 = 500;

#[derive(Debug, Clone, Copy)]
pub struct SimOptions {
    pub trials: u32,
    /// Ranks up to and including this count toward the top-slot tally.
    pub top_slots: u32,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            top_slots: 4,
        }
    }
}

/// Where one team tends to finish across the simulated seasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOutlook {
    pub team_id: u32,
    pub team_name: String,
    /// Mean final points, kept to one decimal.
    pub avg_points: f64,
    pub most_likely_rank: u32,
    pub title_pct: u32,
    pub top_four_pct: u32,
    pub relegation_pct: u32,
    /// Finish counts indexed by rank minus one; each row sums to the
    /// trial count.
    pub rank_counts: Vec<u32>,
}

/// Minimal per-trial state for one team. Goals scored never move during
/// a trial but stay in play as the third sort key.
#[derive(Debug, Clone, Copy)]
struct SimRow {
    idx: usize,
    points: i32,
    goals_diff: i32,
    goals_for: u32,
}

/// One pending fixture with its win and draw chances resolved up front.
struct Matchup {
    home: usize,
    away: usize,
    home_pct: f64,
    draw_pct: f64,
}

/// Runs the season sweep with the built-in predictor and a caller-owned
/// random source. Pass a seeded rng for reproducible sweeps.
pub fn simulate_season<R: Rng>(
    standings: &[StandingsEntry],
    fixtures: &[Fixture],
    options: SimOptions,
    rng: &mut R,
) -> Vec<TeamOutlook> {
    simulate_with(standings, fixtures, options, rng, predict_match)
}

/// Season sweep core. Ratings and per-fixture probabilities are derived
/// once from the current table; each trial then rolls every pending
/// fixture, applying 3 points and a goal swing for a win or a point each
/// for a draw, and re-sorts. Output is one outlook per team, best mean
/// points first. Empty standings or zero trials yield an empty list.
pub fn simulate_with<R, F>(
    standings: &[StandingsEntry],
    fixtures: &[Fixture],
    options: SimOptions,
    rng: &mut R,
    predictor: F,
) -> Vec<TeamOutlook>
where
    R: Rng,
    F: Fn(i32, i32) -> MatchPrediction,
{
    if standings.is_empty() || options.trials == 0 {
        return Vec::new();
    }
    let matchups = build_matchups(standings, fixtures, &predictor);
    let base = base_rows(standings);
    let mut tally = Tally::new(standings.len());
    for _ in 0..options.trials {
        let ranked = run_trial(&base, &matchups, rng);
        tally.record(&ranked, &options);
    }
    outlooks(standings, &tally, options.trials)
}

/// Parallel sweep. Trials are split across the rayon pool; trial `i`
/// draws from its own `StdRng` seeded with `seed + i`, so the result
/// depends only on the seed, not on how the pool schedules work.
pub fn simulate_season_par(
    standings: &[StandingsEntry],
    fixtures: &[Fixture],
    options: SimOptions,
    seed: u64,
) -> Vec<TeamOutlook> {
    simulate_par_with(standings, fixtures, options, seed, predict_match)
}

pub fn simulate_par_with<F>(
    standings: &[StandingsEntry],
    fixtures: &[Fixture],
    options: SimOptions,
    seed: u64,
    predictor: F,
) -> Vec<TeamOutlook>
where
    F: Fn(i32, i32) -> MatchPrediction + Sync,
{
    if standings.is_empty() || options.trials == 0 {
        return Vec::new();
    }
    let matchups = build_matchups(standings, fixtures, &predictor);
    let base = base_rows(standings);
    let tally = (0..options.trials)
        .into_par_iter()
        .fold(
            || Tally::new(standings.len()),
            |mut tally, trial| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial as u64));
                let ranked = run_trial(&base, &matchups, &mut rng);
                tally.record(&ranked, &options);
                tally
            },
        )
        .reduce(|| Tally::new(standings.len()), Tally::merge);
    outlooks(standings, &tally, options.trials)
}

fn build_matchups<F>(
    standings: &[StandingsEntry],
    fixtures: &[Fixture],
    predictor: &F,
) -> Vec<Matchup>
where
    F: Fn(i32, i32) -> MatchPrediction,
{
    let index: HashMap<u32, usize> = standings
        .iter()
        .enumerate()
        .map(|(i, e)| (e.team.id, i))
        .collect();
    let ratings: Vec<i32> = standings
        .iter()
        .enumerate()
        .map(|(i, e)| team_rating(e, i as u32 + 1))
        .collect();

    fixtures
        .iter()
        .filter(|f| !f.is_settled())
        .filter_map(|f| {
            let home = *index.get(&f.home.id)?;
            let away = *index.get(&f.away.id)?;
            let p = predictor(ratings[home], ratings[away]);
            Some(Matchup {
                home,
                away,
                home_pct: p.home_win_pct as f64,
                draw_pct: p.draw_pct as f64,
            })
        })
        .collect()
}

fn base_rows(standings: &[StandingsEntry]) -> Vec<SimRow> {
    standings
        .iter()
        .enumerate()
        .map(|(idx, e)| SimRow {
            idx,
            points: e.points,
            goals_diff: e.goals_diff,
            goals_for: e.all.goals_for,
        })
        .collect()
}

fn run_trial<R: Rng>(base: &[SimRow], matchups: &[Matchup], rng: &mut R) -> Vec<SimRow> {
    let mut rows = base.to_vec();
    for m in matchups {
        let roll = rng.gen_range(0.0..100.0);
        if roll < m.home_pct {
            rows[m.home].points += 3;
            rows[m.home].goals_diff += 1;
            rows[m.away].goals_diff -= 1;
        } else if roll < m.home_pct + m.draw_pct {
            rows[m.home].points += 1;
            rows[m.away].points += 1;
        } else {
            rows[m.away].points += 3;
            rows[m.away].goals_diff += 1;
            rows[m.home].goals_diff -= 1;
        }
    }
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goals_diff.cmp(&a.goals_diff))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    rows
}

#[derive(Clone)]
struct Tally {
    sum_points: Vec<i64>,
    rank_counts: Vec<Vec<u32>>,
    titles: Vec<u32>,
    top: Vec<u32>,
    relegated: Vec<u32>,
}

impl Tally {
    fn new(n: usize) -> Self {
        Self {
            sum_points: vec![0; n],
            rank_counts: vec![vec![0; n]; n],
            titles: vec![0; n],
            top: vec![0; n],
            relegated: vec![0; n],
        }
    }

    fn record(&mut self, ranked: &[SimRow], options: &SimOptions) {
        let relegation_cutoff = ranked.len().saturating_sub(2) as u32;
        for (pos, row) in ranked.iter().enumerate() {
            let rank = pos as u32 + 1;
            self.sum_points[row.idx] += row.points as i64;
            self.rank_counts[row.idx][pos] += 1;
            if rank == 1 {
                self.titles[row.idx] += 1;
            }
            if rank <= options.top_slots {
                self.top[row.idx] += 1;
            }
            if rank >= relegation_cutoff {
                self.relegated[row.idx] += 1;
            }
        }
    }

    fn merge(mut self, other: Tally) -> Tally {
        for (a, b) in self.sum_points.iter_mut().zip(other.sum_points) {
            *a += b;
        }
        for (a, b) in self.rank_counts.iter_mut().zip(other.rank_counts) {
            for (x, y) in a.iter_mut().zip(b) {
                *x += y;
            }
        }
        for (a, b) in self.titles.iter_mut().zip(other.titles) {
            *a += b;
        }
        for (a, b) in self.top.iter_mut().zip(other.top) {
            *a += b;
        }
        for (a, b) in self.relegated.iter_mut().zip(other.relegated) {
            *a += b;
        }
        self
    }
}

fn outlooks(standings: &[StandingsEntry], tally: &Tally, trials: u32) -> Vec<TeamOutlook> {
    let share = |count: u32| (count as f64 / trials as f64 * 100.0).round() as u32;
    let mut out: Vec<TeamOutlook> = standings
        .iter()
        .enumerate()
        .map(|(idx, e)| {
            let counts = &tally.rank_counts[idx];
            let mut best = 0;
            for (pos, &c) in counts.iter().enumerate() {
                if c > counts[best] {
                    best = pos;
                }
            }
            TeamOutlook {
                team_id: e.team.id,
                team_name: e.team.name.clone(),
                avg_points: (tally.sum_points[idx] as f64 / trials as f64 * 10.0).round() / 10.0,
                most_likely_rank: best as u32 + 1,
                title_pct: share(tally.titles[idx]),
                top_four_pct: share(tally.top[idx]),
                relegation_pct: share(tally.relegated[idx]),
                rank_counts: counts.clone(),
            }
        })
        .collect();
    out.sort_by(|a, b| b.avg_points.total_cmp(&a.avg_points));
    out
}
