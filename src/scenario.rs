use log::debug;
use serde::{Deserialize, Serialize};

use crate::fixtures::Fixture;
use crate::gd_advisor::{GdNote, goal_margin_notes};
use crate::standings::{StandingsEntry, Team, find_entry, ordinal, team_rank};

const OWN_MATCH_IMPORTANCE: f64 = 100.0;
const BOTH_ABOVE_BASE: f64 = 80.0;
const SPLIT_BASE: f64 = 60.0;
const ABOVE_LEVEL_BASE: f64 = 50.0;
const BELOW_REACH_BASE: f64 = 40.0;
const LOW_TIER_IMPORTANCE: f64 = 30.0;

/// Point gap at which an above-table opponent still reads as a direct
/// rival rather than a long shot.
const NEAR_GAP: f64 = 6.0;

/// Recommended result for one pending fixture, seen from the target team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The target team wins its own match.
    TargetWin,
    /// The named side wins.
    TeamWin(Team),
    /// The named side avoids defeat; a draw already does the job.
    TeamWinOrDraw(Team),
    /// Both sides drop points.
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

/// One (team, points) delta a projection applies for this scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointEffect {
    pub team_id: u32,
    pub delta: i32,
}

/// A classified fixture: what result to root for and why. Built fresh on
/// every pass, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub fixture: Fixture,
    pub outcome: Outcome,
    pub impact: Impact,
    /// Higher sorts first; the own-match scenario is pinned at 100.
    pub importance: f64,
    pub rationale: String,
    pub effects: Vec<PointEffect>,
    /// Goal-margin advice, only populated for the own-match scenario.
    pub gd_notes: Vec<GdNote>,
}

/// Everything a classification rule may look at for one fixture. Both
/// sides are guaranteed to be present in the standings.
pub struct RuleInput<'a> {
    pub fixture: &'a Fixture,
    pub standings: &'a [StandingsEntry],
    pub target: &'a StandingsEntry,
    pub target_rank: u32,
    pub home: &'a StandingsEntry,
    pub away: &'a StandingsEntry,
    pub home_rank: u32,
    pub away_rank: u32,
}

impl<'a> RuleInput<'a> {
    fn above(&self) -> (&'a StandingsEntry, u32) {
        if self.home_rank < self.target_rank {
            (self.home, self.home_rank)
        } else {
            (self.away, self.away_rank)
        }
    }

    fn below(&self) -> (&'a StandingsEntry, u32) {
        if self.home_rank > self.target_rank {
            (self.home, self.home_rank)
        } else {
            (self.away, self.away_rank)
        }
    }

    fn level(&self) -> &'a StandingsEntry {
        if self.home_rank == self.target_rank {
            self.home
        } else {
            self.away
        }
    }

    fn gap_to(&self, other: &StandingsEntry) -> f64 {
        (self.target.points - other.points).abs() as f64
    }

    fn avg_gap(&self) -> f64 {
        (self.gap_to(self.home) + self.gap_to(self.away)) / 2.0
    }

    /// A win would bring `other` level with or past the target.
    /// Intentionally also true when `other` already has more points.
    fn in_reach(&self, other: &StandingsEntry) -> bool {
        other.points + 3 >= self.target.points
    }
}

/// One classification rule. The table is walked in order and the first
/// matching rule builds the scenario.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&RuleInput) -> bool,
    pub build: fn(&RuleInput) -> Scenario,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "own_match",
        applies: |i| i.fixture.involves(i.target.team.id),
        build: build_own_match,
    },
    Rule {
        name: "both_above",
        applies: |i| i.home_rank < i.target_rank && i.away_rank < i.target_rank,
        build: build_both_above,
    },
    Rule {
        name: "both_below_in_reach",
        applies: |i| {
            i.home_rank > i.target_rank
                && i.away_rank > i.target_rank
                && (i.in_reach(i.home) || i.in_reach(i.away))
        },
        build: build_both_below,
    },
    Rule {
        name: "above_and_below",
        applies: |i| {
            (i.home_rank < i.target_rank && i.away_rank > i.target_rank)
                || (i.away_rank < i.target_rank && i.home_rank > i.target_rank)
        },
        build: build_above_and_below,
    },
    // The two "level with the target" arms cannot fire for distinct teams
    // once ranks are derived from the sorter, but the table keeps them so
    // a degenerate feed still classifies deterministically.
    Rule {
        name: "above_and_level",
        applies: |i| {
            (i.home_rank < i.target_rank && i.away_rank == i.target_rank)
                || (i.away_rank < i.target_rank && i.home_rank == i.target_rank)
        },
        build: build_above_and_level,
    },
    Rule {
        name: "below_and_level_in_reach",
        applies: |i| {
            (i.home_rank > i.target_rank && i.away_rank == i.target_rank && i.in_reach(i.home))
                || (i.away_rank > i.target_rank
                    && i.home_rank == i.target_rank
                    && i.in_reach(i.away))
        },
        build: build_below_and_level,
    },
];

/// Labels every pending fixture with the result that most favors the
/// target team. Output is sorted by importance, highest first; the
/// own-match scenario wins any importance tie and remaining ties keep
/// fixture order. Empty standings, an unknown target or no pending
/// fixtures all yield an empty list. Fixtures naming a team absent from
/// the standings are skipped.
pub fn classify(target_id: u32, standings: &[StandingsEntry], fixtures: &[Fixture]) -> Vec<Scenario> {
    let Some(target) = find_entry(standings, target_id) else {
        return Vec::new();
    };
    let target_rank = team_rank(standings, target_id);

    let mut scenarios = Vec::new();
    for fixture in fixtures {
        if fixture.is_settled() {
            continue;
        }
        let (Some(home), Some(away)) = (
            find_entry(standings, fixture.home.id),
            find_entry(standings, fixture.away.id),
        ) else {
            debug!("fixture {} names a team outside the table, skipping", fixture.id);
            continue;
        };
        let input = RuleInput {
            fixture,
            standings,
            target,
            target_rank,
            home,
            away,
            home_rank: team_rank(standings, fixture.home.id),
            away_rank: team_rank(standings, fixture.away.id),
        };
        if let Some(rule) = RULES.iter().find(|r| (r.applies)(&input)) {
            scenarios.push((rule.build)(&input));
        }
    }

    // A pair above that is level on points with the target scores
    // 80 + 20 and ties the own-match 100; the own game still goes first.
    scenarios.sort_by(|a, b| {
        b.importance.total_cmp(&a.importance).then_with(|| {
            b.fixture
                .involves(target_id)
                .cmp(&a.fixture.involves(target_id))
        })
    });
    scenarios
}

fn gap_bonus(window: f64, gap: f64) -> f64 {
    (window - gap).max(0.0)
}

fn tier_for_gap(gap: f64) -> Impact {
    if gap <= NEAR_GAP { Impact::High } else { Impact::Medium }
}

fn scenario(
    input: &RuleInput,
    outcome: Outcome,
    impact: Impact,
    importance: f64,
    rationale: String,
    effects: Vec<PointEffect>,
) -> Scenario {
    Scenario {
        fixture: input.fixture.clone(),
        outcome,
        impact,
        importance,
        rationale,
        effects,
        gd_notes: Vec::new(),
    }
}

fn build_own_match(input: &RuleInput) -> Scenario {
    let target = input.target;
    let last_rank = input.standings.len() as u32;
    let rationale = if input.target_rank == 1 {
        format!("{} must win to stay clear at the top", target.team.name)
    } else if input.target_rank == last_rank {
        format!("{} must win to keep the survival fight alive", target.team.name)
    } else {
        format!(
            "{} must win to take 3 points and climb from {}",
            target.team.name,
            ordinal(input.target_rank)
        )
    };
    let mut built = scenario(
        input,
        Outcome::TargetWin,
        Impact::Critical,
        OWN_MATCH_IMPORTANCE,
        rationale,
        vec![PointEffect {
            team_id: target.team.id,
            delta: 3,
        }],
    );
    built.gd_notes = goal_margin_notes(target.team.id, input.standings);
    built
}

fn build_both_above(input: &RuleInput) -> Scenario {
    let rationale = format!(
        "A draw pulls 2 points off {} and {} combined instead of one of them taking 3",
        input.home.team.name, input.away.team.name
    );
    scenario(
        input,
        Outcome::Draw,
        Impact::High,
        BOTH_ABOVE_BASE + gap_bonus(20.0, input.avg_gap()),
        rationale,
        vec![
            PointEffect {
                team_id: input.home.team.id,
                delta: 1,
            },
            PointEffect {
                team_id: input.away.team.id,
                delta: 1,
            },
        ],
    )
}

fn build_both_below(input: &RuleInput) -> Scenario {
    let rationale = format!(
        "A draw stops both {} and {} from taking 3 points behind {}",
        input.home.team.name, input.away.team.name, input.target.team.name
    );
    scenario(
        input,
        Outcome::Draw,
        Impact::Medium,
        BELOW_REACH_BASE + gap_bonus(15.0, input.avg_gap()),
        rationale,
        vec![
            PointEffect {
                team_id: input.home.team.id,
                delta: 1,
            },
            PointEffect {
                team_id: input.away.team.id,
                delta: 1,
            },
        ],
    )
}

fn build_above_and_below(input: &RuleInput) -> Scenario {
    let (above, above_rank) = input.above();
    let (below, _) = input.below();
    let gap = input.gap_to(above);
    let rationale = format!(
        "{} ({}) dropping points to {} helps {} close the gap",
        above.team.name,
        ordinal(above_rank),
        below.team.name,
        input.target.team.name
    );
    scenario(
        input,
        Outcome::TeamWin(below.team.clone()),
        tier_for_gap(gap),
        SPLIT_BASE + gap_bonus(20.0, gap),
        rationale,
        vec![PointEffect {
            team_id: below.team.id,
            delta: 3,
        }],
    )
}

fn build_above_and_level(input: &RuleInput) -> Scenario {
    let (above, above_rank) = input.above();
    let other = input.level();
    let gap = input.gap_to(above);
    let rationale = format!(
        "{} ({}) dropping points keeps {} in touch",
        above.team.name,
        ordinal(above_rank),
        input.target.team.name
    );
    scenario(
        input,
        Outcome::TeamWin(other.team.clone()),
        tier_for_gap(gap),
        ABOVE_LEVEL_BASE + gap_bonus(20.0, gap),
        rationale,
        vec![PointEffect {
            team_id: other.team.id,
            delta: 3,
        }],
    )
}

fn build_below_and_level(input: &RuleInput) -> Scenario {
    let (below, _) = input.below();
    let other = input.level();
    let rationale = format!(
        "{} taking at least a point holds off {}",
        other.team.name, below.team.name
    );
    scenario(
        input,
        Outcome::TeamWinOrDraw(other.team.clone()),
        Impact::Low,
        LOW_TIER_IMPORTANCE,
        rationale,
        vec![PointEffect {
            team_id: other.team.id,
            delta: 1,
        }],
    )
}
