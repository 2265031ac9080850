use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::fixtures::Fixture;
use crate::standings::{StandingsEntry, Team, form_points};

const TITLE_GROUP: usize = 5;
const TOP_FOUR_GROUP: std::ops::Range<usize> = 2..8;
const RELEGATION_GROUP: usize = 6;

const TITLE_TIGHT_SPREAD: i32 = 9;
const TOP_FOUR_TIGHT_SPREAD: i32 = 6;
const RELEGATION_TIGHT_GAP: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceKind {
    Title,
    TopFour,
    Relegation,
}

/// Slice of the sorted table contesting one race: the top five for the
/// title, ranks three through eight for the last Champions League spots,
/// and the bottom six for survival. Shrinks with small tables.
pub fn race_group(standings: &[StandingsEntry], kind: RaceKind) -> &[StandingsEntry] {
    let len = standings.len();
    match kind {
        RaceKind::Title => &standings[..TITLE_GROUP.min(len)],
        RaceKind::TopFour => {
            &standings[TOP_FOUR_GROUP.start.min(len)..TOP_FOUR_GROUP.end.min(len)]
        }
        RaceKind::Relegation => &standings[len.saturating_sub(RELEGATION_GROUP)..],
    }
}

/// Pending fixtures where both sides are in the race. These are the
/// six-pointers, where the winner gains on the whole group at once.
pub fn head_to_head(group: &[StandingsEntry], fixtures: &[Fixture]) -> Vec<Fixture> {
    let ids: HashSet<u32> = group.iter().map(|e| e.team.id).collect();
    fixtures
        .iter()
        .filter(|f| !f.is_settled() && ids.contains(&f.home.id) && ids.contains(&f.away.id))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceStats {
    pub kind: RaceKind,
    pub leader: Team,
    pub leader_points: i32,
    /// Leader's points minus the last contender's.
    pub points_spread: i32,
    /// Mean recent-form points across the group; unknown form counts 0.
    pub avg_form_points: f64,
    pub games_played: u32,
    pub games_remaining: u32,
    pub max_points_available: u32,
    pub tight: bool,
}

/// Rolls one race group up. `None` when the group is empty. The tight
/// flag uses a cut per race: a title spread of 9 or less, fourth within
/// 6 of eighth, or a survival gap of 3 or less between the first safe
/// and first dropped side.
pub fn race_stats(group: &[StandingsEntry], kind: RaceKind, total_rounds: u32) -> Option<RaceStats> {
    let first = group.first()?;
    let last = group.last()?;
    let points_spread = first.points - last.points;

    let tight = match kind {
        RaceKind::Title => points_spread <= TITLE_TIGHT_SPREAD,
        RaceKind::TopFour => match (group.get(1), group.get(5)) {
            (Some(fourth), Some(eighth)) => {
                fourth.points - eighth.points <= TOP_FOUR_TIGHT_SPREAD
            }
            _ => points_spread <= TOP_FOUR_TIGHT_SPREAD,
        },
        RaceKind::Relegation => match (group.get(2), group.get(3)) {
            (Some(safe), Some(dropped)) => safe.points - dropped.points <= RELEGATION_TIGHT_GAP,
            _ => points_spread <= RELEGATION_TIGHT_GAP,
        },
    };

    let form_total: f64 = group
        .iter()
        .map(|e| e.form.as_deref().map(form_points).unwrap_or(0.0))
        .sum();
    let games_played = first.all.played;
    let games_remaining = total_rounds.saturating_sub(games_played);

    Some(RaceStats {
        kind,
        leader: first.team.clone(),
        leader_points: first.points,
        points_spread,
        avg_form_points: form_total / group.len() as f64,
        games_played,
        games_remaining,
        max_points_available: games_remaining * 3,
        tight,
    })
}

/// Double round-robin length for a league of this size.
pub fn total_rounds(league_size: usize) -> u32 {
    if league_size < 2 {
        0
    } else {
        (2 * (league_size - 1)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::OverallRecord;

    fn row(id: u32, points: i32, played: u32, form: Option<&str>) -> StandingsEntry {
        StandingsEntry {
            team: Team {
                id,
                name: format!("T{id}"),
            },
            rank: id,
            points,
            goals_diff: 0,
            all: OverallRecord {
                played,
                ..OverallRecord::default()
            },
            form: form.map(str::to_string),
        }
    }

    fn table() -> Vec<StandingsEntry> {
        // ids follow rank 1..10
        vec![
            row(1, 25, 10, Some("WWWWW")),
            row(2, 23, 10, Some("WDWWL")),
            row(3, 22, 10, None),
            row(4, 20, 10, Some("WWLDW")),
            row(5, 19, 10, None),
            row(6, 18, 10, None),
            row(7, 17, 10, None),
            row(8, 16, 10, None),
            row(9, 6, 10, Some("LLLLL")),
            row(10, 4, 10, None),
        ]
    }

    fn fixture(id: u64, home_id: u32, away_id: u32, status: &str) -> Fixture {
        Fixture {
            id,
            kickoff: "2025-11-01T15:00:00+00:00".to_string(),
            status: status.to_string(),
            round: "Regular Season - 11".to_string(),
            home: Team {
                id: home_id,
                name: format!("T{home_id}"),
            },
            away: Team {
                id: away_id,
                name: format!("T{away_id}"),
            },
        }
    }

    #[test]
    fn groups_take_their_slices() {
        let table = table();
        let title: Vec<u32> = race_group(&table, RaceKind::Title)
            .iter()
            .map(|e| e.team.id)
            .collect();
        assert_eq!(title, vec![1, 2, 3, 4, 5]);

        let top_four: Vec<u32> = race_group(&table, RaceKind::TopFour)
            .iter()
            .map(|e| e.team.id)
            .collect();
        assert_eq!(top_four, vec![3, 4, 5, 6, 7, 8]);

        let drop: Vec<u32> = race_group(&table, RaceKind::Relegation)
            .iter()
            .map(|e| e.team.id)
            .collect();
        assert_eq!(drop, vec![5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn tiny_tables_shrink_the_groups() {
        let table = table()[..3].to_vec();
        assert_eq!(race_group(&table, RaceKind::Title).len(), 3);
        assert_eq!(race_group(&table, RaceKind::TopFour).len(), 1);
        assert_eq!(race_group(&table, RaceKind::Relegation).len(), 3);
        assert!(race_group(&[], RaceKind::Title).is_empty());
    }

    #[test]
    fn six_pointers_need_both_sides_in_the_race() {
        let table = table();
        let group = race_group(&table, RaceKind::Title);
        let fixtures = vec![
            fixture(1, 1, 4, "NS"),
            fixture(2, 1, 9, "NS"),
            fixture(3, 2, 3, "FT"),
        ];
        let h2h = head_to_head(group, &fixtures);
        assert_eq!(h2h.len(), 1);
        assert_eq!(h2h[0].id, 1);
    }

    #[test]
    fn title_stats_and_tightness() {
        let table = table();
        let group = race_group(&table, RaceKind::Title);
        let stats = race_stats(group, RaceKind::Title, total_rounds(table.len()))
            .expect("non-empty group");
        assert_eq!(stats.leader.id, 1);
        assert_eq!(stats.points_spread, 6);
        assert!(stats.tight);
        assert_eq!(stats.games_remaining, 8);
        assert_eq!(stats.max_points_available, 24);
        // 15 + 10 + 0 + 10 + 0 over five teams
        assert!((stats.avg_form_points - 7.0).abs() < 1e-9);
    }

    #[test]
    fn top_four_tightness_uses_fourth_versus_eighth() {
        let table = table();
        let group = race_group(&table, RaceKind::TopFour);
        let stats = race_stats(group, RaceKind::TopFour, 18).expect("non-empty group");
        // fourth has 20, eighth has 16
        assert!(stats.tight);

        let mut spread_out = table.clone();
        spread_out[3].points = 30;
        let group = race_group(&spread_out, RaceKind::TopFour);
        let stats = race_stats(group, RaceKind::TopFour, 18).expect("non-empty group");
        assert!(!stats.tight);
    }

    #[test]
    fn relegation_tightness_uses_the_safety_gap() {
        let table = table();
        let group = race_group(&table, RaceKind::Relegation);
        let stats = race_stats(group, RaceKind::Relegation, 18).expect("non-empty group");
        // first safe side has 17, first dropped 16
        assert!(stats.tight);
        assert_eq!(stats.points_spread, 15);

        let mut gapped = table;
        gapped[7].points = 10;
        let group = race_group(&gapped, RaceKind::Relegation);
        let stats = race_stats(group, RaceKind::Relegation, 18).expect("non-empty group");
        assert!(!stats.tight);
    }

    #[test]
    fn empty_group_has_no_stats() {
        assert!(race_stats(&[], RaceKind::Title, 38).is_none());
    }

    #[test]
    fn round_robin_length() {
        assert_eq!(total_rounds(20), 38);
        assert_eq!(total_rounds(2), 2);
        assert_eq!(total_rounds(1), 0);
        assert_eq!(total_rounds(0), 0);
    }
}
