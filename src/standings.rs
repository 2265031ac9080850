use serde::{Deserialize, Serialize};

/// Team identity as the data source reports it. Never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
}

/// Season aggregates for one team across all venues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallRecord {
    pub played: u32,
    pub win: u32,
    pub draw: u32,
    pub lose: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

/// One row of the league table. `goals_diff` must equal
/// `goals_for - goals_against`; `rank` is derived by `assign_ranks` after a
/// sort, never trusted as ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub team: Team,
    #[serde(default)]
    pub rank: u32,
    pub points: i32,
    pub goals_diff: i32,
    pub all: OverallRecord,
    /// Recent results, most recent first, e.g. "WWDLW". Missing for new
    /// teams early in a season.
    pub form: Option<String>,
}

/// Broad table region a rank falls into, for a 1-based rank in a league of
/// `league_size` teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableZone {
    ChampionsLeague,
    EuropaLeague,
    MidTable,
    RelegationZone,
}

/// League tie-break sort: points, then goal difference, then goals scored,
/// all descending. Stable, so remaining ties keep the order the data
/// arrived in. No further criterion is applied.
pub fn sort_table(entries: &mut [StandingsEntry]) {
    entries.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goals_diff.cmp(&a.goals_diff))
            .then(b.all.goals_for.cmp(&a.all.goals_for))
    });
}

/// Writes 1-based ranks into an already sorted table.
pub fn assign_ranks(entries: &mut [StandingsEntry]) {
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = (i + 1) as u32;
    }
}

pub fn find_entry(entries: &[StandingsEntry], team_id: u32) -> Option<&StandingsEntry> {
    entries.iter().find(|e| e.team.id == team_id)
}

/// 1-based rank of a team by table position, 0 when the team is absent.
pub fn team_rank(entries: &[StandingsEntry], team_id: u32) -> u32 {
    entries
        .iter()
        .position(|e| e.team.id == team_id)
        .map(|i| (i + 1) as u32)
        .unwrap_or(0)
}

/// Ordinal label for a rank: 1st, 2nd, 3rd, 4th, with 11th-13th on the
/// teens rule.
pub fn ordinal(rank: u32) -> String {
    let j = rank % 10;
    let k = rank % 100;
    let suffix = if j == 1 && k != 11 {
        "st"
    } else if j == 2 && k != 12 {
        "nd"
    } else if j == 3 && k != 13 {
        "rd"
    } else {
        "th"
    };
    format!("{rank}{suffix}")
}

/// Points taken from the last five results of a form string, 3 per win and
/// 1 per draw. Callers pick the default for missing form.
pub fn form_points(form: &str) -> f64 {
    let mut points = 0.0;
    for result in form.chars().take(5) {
        match result {
            'W' => points += 3.0,
            'D' => points += 1.0,
            _ => {}
        }
    }
    points
}

pub fn zone_of(rank: u32, league_size: u32) -> TableZone {
    // Rank 0 is the missing-team sentinel.
    if rank == 0 {
        return TableZone::MidTable;
    }
    if rank <= 4 {
        TableZone::ChampionsLeague
    } else if rank >= league_size.saturating_sub(2) {
        TableZone::RelegationZone
    } else if rank <= 6 {
        TableZone::EuropaLeague
    } else {
        TableZone::MidTable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u32, points: i32, goals_diff: i32, goals_for: u32) -> StandingsEntry {
        StandingsEntry {
            team: Team {
                id,
                name: format!("T{id}"),
            },
            rank: 0,
            points,
            goals_diff,
            all: OverallRecord {
                played: 10,
                win: 0,
                draw: 0,
                lose: 0,
                goals_for,
                goals_against: 0,
            },
            form: None,
        }
    }

    #[test]
    fn sorts_by_points_then_gd_then_goals_for() {
        let mut table = vec![row(1, 10, 5, 20), row(2, 12, -1, 8), row(3, 10, 7, 15), row(4, 10, 5, 22)];
        sort_table(&mut table);
        let order: Vec<u32> = table.iter().map(|e| e.team.id).collect();
        assert_eq!(order, vec![2, 3, 4, 1]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let mut table = vec![row(7, 9, 2, 10), row(8, 9, 2, 10), row(9, 9, 2, 10)];
        sort_table(&mut table);
        let order: Vec<u32> = table.iter().map(|e| e.team.id).collect();
        assert_eq!(order, vec![7, 8, 9]);
    }

    #[test]
    fn sorting_twice_is_identical() {
        let mut table = vec![row(1, 4, 0, 3), row(2, 9, -2, 7), row(3, 9, 1, 4)];
        sort_table(&mut table);
        let once = table.clone();
        sort_table(&mut table);
        assert_eq!(table, once);
    }

    #[test]
    fn adjacent_pairs_never_violate_the_order() {
        let mut table = vec![
            row(1, 10, 3, 9),
            row(2, 10, 3, 9),
            row(3, 14, -4, 11),
            row(4, 10, 8, 2),
            row(5, 3, 0, 5),
        ];
        sort_table(&mut table);
        for pair in table.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let ordered = a.points > b.points
                || (a.points == b.points && a.goals_diff > b.goals_diff)
                || (a.points == b.points
                    && a.goals_diff == b.goals_diff
                    && a.all.goals_for >= b.all.goals_for);
            assert!(ordered, "{:?} before {:?}", a.team.id, b.team.id);
        }
    }

    #[test]
    fn ranks_are_one_based_positions() {
        let mut table = vec![row(1, 1, 0, 0), row(2, 5, 0, 0)];
        sort_table(&mut table);
        assign_ranks(&mut table);
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[0].team.id, 2);
        assert_eq!(team_rank(&table, 1), 2);
        assert_eq!(team_rank(&table, 99), 0);
    }

    #[test]
    fn ordinal_covers_the_teens() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(103), "103rd");
    }

    #[test]
    fn form_points_counts_first_five() {
        assert_eq!(form_points("WWDLW"), 10.0);
        assert_eq!(form_points("WWWWWW"), 15.0);
        assert_eq!(form_points("LLLLL"), 0.0);
        assert_eq!(form_points(""), 0.0);
    }

    #[test]
    fn zones_scale_with_league_size() {
        assert_eq!(zone_of(1, 20), TableZone::ChampionsLeague);
        assert_eq!(zone_of(4, 20), TableZone::ChampionsLeague);
        assert_eq!(zone_of(5, 20), TableZone::EuropaLeague);
        assert_eq!(zone_of(10, 20), TableZone::MidTable);
        assert_eq!(zone_of(17, 20), TableZone::MidTable);
        assert_eq!(zone_of(18, 20), TableZone::RelegationZone);
        assert_eq!(zone_of(16, 18), TableZone::RelegationZone);
        assert_eq!(zone_of(0, 20), TableZone::MidTable);
    }
}
