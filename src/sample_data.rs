use crate::fixtures::Fixture;
use crate::standings::{OverallRecord, StandingsEntry, Team};

/// A frozen Premier League table after ten rounds. Lets demos, docs and
/// benches run a full-size league without touching the feed.
pub fn sample_standings() -> Vec<StandingsEntry> {
    vec![
        entry(1, 42, "Arsenal", 8, 1, 1, 22, 7, "WWDWW"),
        entry(2, 50, "Manchester City", 7, 2, 1, 24, 9, "WDWWL"),
        entry(3, 40, "Liverpool", 7, 1, 2, 20, 11, "LWWDW"),
        entry(4, 49, "Chelsea", 6, 2, 2, 19, 12, "WWLDW"),
        entry(5, 47, "Tottenham", 6, 1, 3, 18, 12, "WLWWD"),
        entry(6, 35, "Bournemouth", 5, 3, 2, 16, 12, "DWWLD"),
        entry(7, 66, "Aston Villa", 5, 2, 3, 15, 13, "WDLWW"),
        entry(8, 34, "Newcastle", 4, 4, 2, 14, 11, "DDWLW"),
        entry(9, 51, "Brighton", 4, 3, 3, 15, 14, "WLDDW"),
        entry(10, 33, "Manchester United", 4, 2, 4, 13, 14, "LWWDL"),
        entry(11, 52, "Crystal Palace", 3, 4, 3, 11, 11, "DLWDD"),
        entry(12, 48, "West Ham", 3, 3, 4, 12, 15, "LDWLD"),
        entry(13, 36, "Fulham", 3, 3, 4, 10, 13, "DLLWD"),
        entry(14, 55, "Brentford", 3, 2, 5, 12, 16, "WLLDL"),
        entry(15, 65, "Nottingham Forest", 2, 4, 4, 9, 13, "DDLWL"),
        entry(16, 39, "Wolves", 2, 3, 5, 8, 14, "LLDWD"),
        entry(17, 45, "Everton", 2, 3, 5, 7, 13, "DLLDW"),
        entry(18, 46, "Leicester", 2, 2, 6, 8, 17, "LWLLD"),
        entry(19, 41, "Southampton", 1, 3, 6, 7, 19, "LDLLL"),
        entry(20, 57, "Ipswich", 0, 4, 6, 6, 20, "DLLDL"),
    ]
}

/// The next round's ten pairings, none played yet.
pub fn sample_round() -> Vec<Fixture> {
    vec![
        fixture(1101, "2025-11-01T12:30:00+00:00", 42, "Arsenal", 40, "Liverpool"),
        fixture(1102, "2025-11-01T15:00:00+00:00", 50, "Manchester City", 35, "Bournemouth"),
        fixture(1103, "2025-11-01T15:00:00+00:00", 33, "Manchester United", 49, "Chelsea"),
        fixture(1104, "2025-11-01T17:30:00+00:00", 47, "Tottenham", 66, "Aston Villa"),
        fixture(1105, "2025-11-02T14:00:00+00:00", 34, "Newcastle", 51, "Brighton"),
        fixture(1106, "2025-11-01T15:00:00+00:00", 52, "Crystal Palace", 48, "West Ham"),
        fixture(1107, "2025-11-01T15:00:00+00:00", 36, "Fulham", 55, "Brentford"),
        fixture(1108, "2025-11-02T14:00:00+00:00", 65, "Nottingham Forest", 39, "Wolves"),
        fixture(1109, "2025-11-02T16:30:00+00:00", 45, "Everton", 46, "Leicester"),
        fixture(1110, "2025-11-02T16:30:00+00:00", 41, "Southampton", 57, "Ipswich"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn entry(
    rank: u32,
    id: u32,
    name: &str,
    win: u32,
    draw: u32,
    lose: u32,
    goals_for: u32,
    goals_against: u32,
    form: &str,
) -> StandingsEntry {
    StandingsEntry {
        team: Team {
            id,
            name: name.to_string(),
        },
        rank,
        points: (win * 3 + draw) as i32,
        goals_diff: goals_for as i32 - goals_against as i32,
        all: OverallRecord {
            played: win + draw + lose,
            win,
            draw,
            lose,
            goals_for,
            goals_against,
        },
        form: Some(form.to_string()),
    }
}

fn fixture(id: u64, kickoff: &str, home_id: u32, home: &str, away_id: u32, away: &str) -> Fixture {
    Fixture {
        id,
        kickoff: kickoff.to_string(),
        status: "NS".to_string(),
        round: "Regular Season - 11".to_string(),
        home: Team {
            id: home_id,
            name: home.to_string(),
        },
        away: Team {
            id: away_id,
            name: away.to_string(),
        },
    }
}
