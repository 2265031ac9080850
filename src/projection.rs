use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::fixtures::Fixture;
use crate::scenario::Scenario;
use crate::standings::{StandingsEntry, assign_ranks, find_entry, sort_table, team_rank};

/// Where the target team lands if every favorable result comes in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPosition {
    pub current_rank: u32,
    pub projected_rank: u32,
    pub current_points: i32,
    pub projected_points: i32,
    pub points_gain: i32,
    /// Positive means the target climbs.
    pub rank_delta: i32,
    pub table: Vec<StandingsEntry>,
}

/// Applies every scenario's point effects to a copy of the table and
/// re-sorts it. Only points move; goal totals stay at their current
/// values. Running the projection twice over the same inputs yields the
/// same output. An unknown target reports zeros alongside the projected
/// table.
pub fn project(
    standings: &[StandingsEntry],
    scenarios: &[Scenario],
    target_id: u32,
) -> ProjectedPosition {
    let mut deltas: HashMap<u32, i32> = HashMap::new();
    for scenario in scenarios {
        for effect in &scenario.effects {
            *deltas.entry(effect.team_id).or_insert(0) += effect.delta;
        }
    }

    let mut table: Vec<StandingsEntry> = standings.to_vec();
    for entry in &mut table {
        if let Some(delta) = deltas.get(&entry.team.id) {
            entry.points += delta;
        }
    }
    sort_table(&mut table);
    assign_ranks(&mut table);

    let current_rank = team_rank(standings, target_id);
    let projected_rank = team_rank(&table, target_id);
    let (current_points, projected_points) = match (
        find_entry(standings, target_id),
        find_entry(&table, target_id),
    ) {
        (Some(before), Some(after)) => (before.points, after.points),
        _ => (0, 0),
    };

    ProjectedPosition {
        current_rank,
        projected_rank,
        current_points,
        projected_points,
        points_gain: projected_points - current_points,
        rank_delta: current_rank as i32 - projected_rank as i32,
        table,
    }
}

/// A hand-picked result for one fixture of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPick {
    Home,
    Draw,
    Away,
}

/// Replays a round of hand-picked results on a copy of the table. A win
/// adds 3 points plus a win and an appearance to the record, the loser
/// only the appearance; a draw adds a point and a draw to both. Goal
/// totals are left alone since no scoreline is picked. Fixtures without
/// a pick, and picks naming teams outside the table, are skipped.
pub fn apply_picks(
    standings: &[StandingsEntry],
    fixtures: &[Fixture],
    picks: &HashMap<u64, RoundPick>,
) -> Vec<StandingsEntry> {
    let mut table: Vec<StandingsEntry> = standings.to_vec();

    for fixture in fixtures {
        let Some(pick) = picks.get(&fixture.id) else {
            continue;
        };
        let home_at = table.iter().position(|e| e.team.id == fixture.home.id);
        let away_at = table.iter().position(|e| e.team.id == fixture.away.id);
        let (Some(home_at), Some(away_at)) = (home_at, away_at) else {
            debug!("pick for fixture {} names a team outside the table, skipping", fixture.id);
            continue;
        };

        match pick {
            RoundPick::Home => {
                win_loss(&mut table, home_at, away_at);
            }
            RoundPick::Away => {
                win_loss(&mut table, away_at, home_at);
            }
            RoundPick::Draw => {
                for at in [home_at, away_at] {
                    let entry = &mut table[at];
                    entry.points += 1;
                    entry.all.draw += 1;
                    entry.all.played += 1;
                }
            }
        }
    }

    sort_table(&mut table);
    assign_ranks(&mut table);
    table
}

fn win_loss(table: &mut [StandingsEntry], winner_at: usize, loser_at: usize) {
    let winner = &mut table[winner_at];
    winner.points += 3;
    winner.all.win += 1;
    winner.all.played += 1;
    let loser = &mut table[loser_at];
    loser.all.lose += 1;
    loser.all.played += 1;
}

/// Rank movement between two tables, positive when the team climbed.
/// Zero when the team is missing from either table.
pub fn position_change(before: &[StandingsEntry], after: &[StandingsEntry], team_id: u32) -> i32 {
    let was = team_rank(before, team_id);
    let now = team_rank(after, team_id);
    if was == 0 || now == 0 {
        return 0;
    }
    was as i32 - now as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Impact, Outcome, PointEffect};
    use crate::standings::{OverallRecord, Team};

    fn row(id: u32, points: i32, goals_diff: i32) -> StandingsEntry {
        StandingsEntry {
            team: Team {
                id,
                name: format!("T{id}"),
            },
            rank: 0,
            points,
            goals_diff,
            all: OverallRecord::default(),
            form: None,
        }
    }

    fn ranked(mut rows: Vec<StandingsEntry>) -> Vec<StandingsEntry> {
        sort_table(&mut rows);
        assign_ranks(&mut rows);
        rows
    }

    fn stub_scenario(effects: Vec<PointEffect>) -> Scenario {
        Scenario {
            fixture: Fixture {
                id: 1,
                kickoff: "2025-11-01T15:00:00+00:00".to_string(),
                status: "NS".to_string(),
                round: "Regular Season - 11".to_string(),
                home: Team {
                    id: 98,
                    name: "H".to_string(),
                },
                away: Team {
                    id: 99,
                    name: "A".to_string(),
                },
            },
            outcome: Outcome::Draw,
            impact: Impact::Medium,
            importance: 40.0,
            rationale: String::new(),
            effects,
            gd_notes: Vec::new(),
        }
    }

    #[test]
    fn projection_moves_target_past_a_stalled_rival() {
        let standings = ranked(vec![row(1, 30, 10), row(2, 28, 8), row(3, 24, 2)]);
        let scenarios = vec![stub_scenario(vec![PointEffect { team_id: 2, delta: 3 }])];
        let projected = project(&standings, &scenarios, 2);
        assert_eq!(projected.current_rank, 2);
        assert_eq!(projected.projected_rank, 1);
        assert_eq!(projected.rank_delta, 1);
        assert_eq!(projected.points_gain, 3);
        assert_eq!(projected.projected_points, 31);
        assert_eq!(projected.table[0].team.id, 2);
    }

    #[test]
    fn projection_is_idempotent() {
        let standings = ranked(vec![row(1, 30, 10), row(2, 28, 8), row(3, 24, 2)]);
        let scenarios = vec![
            stub_scenario(vec![PointEffect { team_id: 2, delta: 3 }]),
            stub_scenario(vec![
                PointEffect { team_id: 1, delta: 1 },
                PointEffect { team_id: 3, delta: 1 },
            ]),
        ];
        let first = project(&standings, &scenarios, 2);
        let second = project(&standings, &scenarios, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_target_reports_zeros() {
        let standings = ranked(vec![row(1, 30, 10), row(2, 28, 8)]);
        let projected = project(&standings, &[], 77);
        assert_eq!(projected.current_rank, 0);
        assert_eq!(projected.projected_rank, 0);
        assert_eq!(projected.points_gain, 0);
        assert_eq!(projected.rank_delta, 0);
        assert_eq!(projected.table.len(), 2);
    }

    #[test]
    fn points_only_goals_untouched() {
        let standings = ranked(vec![row(1, 30, 10), row(2, 28, 8)]);
        let scenarios = vec![stub_scenario(vec![PointEffect { team_id: 2, delta: 3 }])];
        let projected = project(&standings, &scenarios, 2);
        let after = find_entry(&projected.table, 2).expect("row kept");
        assert_eq!(after.goals_diff, 8);
        assert_eq!(after.all.played, 0);
    }

    #[test]
    fn picks_update_points_and_records() {
        let standings = ranked(vec![row(1, 30, 10), row(2, 28, 8), row(3, 24, 2)]);
        let fixtures = vec![
            Fixture {
                id: 11,
                kickoff: "2025-11-01T15:00:00+00:00".to_string(),
                status: "NS".to_string(),
                round: "Regular Season - 11".to_string(),
                home: Team {
                    id: 2,
                    name: "T2".to_string(),
                },
                away: Team {
                    id: 1,
                    name: "T1".to_string(),
                },
            },
            Fixture {
                id: 12,
                kickoff: "2025-11-01T17:30:00+00:00".to_string(),
                status: "NS".to_string(),
                round: "Regular Season - 11".to_string(),
                home: Team {
                    id: 3,
                    name: "T3".to_string(),
                },
                away: Team {
                    id: 9,
                    name: "T9".to_string(),
                },
            },
        ];
        let picks = HashMap::from([(11, RoundPick::Home), (12, RoundPick::Draw), (44, RoundPick::Away)]);
        let after = apply_picks(&standings, &fixtures, &picks);

        let t2 = find_entry(&after, 2).expect("row kept");
        assert_eq!(t2.points, 31);
        assert_eq!(t2.all.win, 1);
        assert_eq!(t2.all.played, 1);
        let t1 = find_entry(&after, 1).expect("row kept");
        assert_eq!(t1.points, 30);
        assert_eq!(t1.all.lose, 1);
        assert_eq!(t1.all.played, 1);
        // Fixture 12 names an unknown away side, so T3 keeps its record.
        let t3 = find_entry(&after, 3).expect("row kept");
        assert_eq!(t3.points, 24);
        assert_eq!(t3.all.played, 0);

        assert_eq!(position_change(&standings, &after, 2), 1);
        assert_eq!(position_change(&standings, &after, 1), -1);
        assert_eq!(position_change(&standings, &after, 77), 0);
    }
}
