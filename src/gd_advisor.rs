use serde::{Deserialize, Serialize};

use crate::standings::{StandingsEntry, find_entry, team_rank};

/// How close a below-table neighbor has to be on goal difference before the
/// defensive scan mentions it.
const THREAT_GD_MARGIN: i32 = 3;

/// Why a level-on-points neighbor matters around the target's own match.
/// Declaration order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GdCategory {
    /// A win of the stated margin moves the target above this team.
    Overtake,
    /// Any win is enough against this team.
    Ahead,
    /// Level on points below, but not ahead on goal difference.
    Warning,
    /// Level on points below with the better goal difference.
    Threat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdNote {
    pub team_id: u32,
    pub team_name: String,
    pub category: GdCategory,
    /// Winning margin (or goals scored) required to pass the named team,
    /// when a specific number exists.
    pub goals_needed: Option<u32>,
    pub message: String,
}

/// Margin analysis for the target's own match. Looks at teams above whose
/// current points equal the target's post-win total and says what winning
/// margin leapfrogs them, then scans level-on-points teams below within a
/// small goal-difference band. Empty when the target is missing.
pub fn goal_margin_notes(target_id: u32, standings: &[StandingsEntry]) -> Vec<GdNote> {
    let Some(target) = find_entry(standings, target_id) else {
        return Vec::new();
    };
    let target_rank = team_rank(standings, target_id) as usize;
    let projected = target.points + 3;

    let mut notes = Vec::new();
    for (i, other) in standings.iter().enumerate() {
        let rank = i + 1;
        if other.team.id == target_id {
            continue;
        }
        if rank < target_rank && other.points == projected {
            notes.push(overtake_note(target, other));
        } else if rank > target_rank
            && other.points == target.points
            && (other.goals_diff - target.goals_diff).abs() <= THREAT_GD_MARGIN
        {
            notes.push(below_note(target, other));
        }
    }

    // Fixed category priority, stable within a category.
    notes.sort_by_key(|n| n.category);
    notes
}

fn overtake_note(target: &StandingsEntry, other: &StandingsEntry) -> GdNote {
    let gd_lead = other.goals_diff - target.goals_diff;
    if gd_lead > 0 {
        let margin = (gd_lead + 1) as u32;
        return note(
            other,
            GdCategory::Overtake,
            Some(margin),
            format!(
                "Win by {margin}+ goals to move above {} on goal difference",
                other.team.name
            ),
        );
    }
    if gd_lead == 0 {
        let gf_lead = other.all.goals_for as i64 - target.all.goals_for as i64;
        if gf_lead > 0 {
            let goals = (gf_lead + 1) as u32;
            return note(
                other,
                GdCategory::Overtake,
                Some(goals),
                format!(
                    "Score {goals}+ in a win to pass {} on goals scored",
                    other.team.name
                ),
            );
        }
    }
    note(
        other,
        GdCategory::Ahead,
        None,
        format!("Any win puts you above {}", other.team.name),
    )
}

fn below_note(target: &StandingsEntry, other: &StandingsEntry) -> GdNote {
    if other.goals_diff > target.goals_diff {
        note(
            other,
            GdCategory::Threat,
            None,
            format!(
                "{} are level on points with the better goal difference, a narrow win may not shake them",
                other.team.name
            ),
        )
    } else {
        note(
            other,
            GdCategory::Warning,
            None,
            format!(
                "{} are level on points just behind, keep the goal difference moving",
                other.team.name
            ),
        )
    }
}

fn note(other: &StandingsEntry, category: GdCategory, goals_needed: Option<u32>, message: String) -> GdNote {
    GdNote {
        team_id: other.team.id,
        team_name: other.team.name.clone(),
        category,
        goals_needed,
        message,
    }
}
