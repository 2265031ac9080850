use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::standings::Team;

/// Status codes that settle a fixture and take it out of what-if analysis:
/// full time, extra time, penalties, cancelled, abandoned, awarded,
/// walkover.
pub const SETTLED_STATUSES: [&str; 7] = ["FT", "AET", "PEN", "CANC", "ABD", "AWD", "WO"];

/// A scheduled match as the feed reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u64,
    /// Kickoff in RFC 3339, straight from the feed.
    pub kickoff: String,
    /// Short status code, e.g. "NS", "FT", "PST".
    pub status: String,
    pub round: String,
    pub home: Team,
    pub away: Team,
}

impl Fixture {
    pub fn is_settled(&self) -> bool {
        SETTLED_STATUSES.contains(&self.status.as_str())
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home.id == team_id || self.away.id == team_id
    }

    pub fn opponent_of(&self, team_id: u32) -> Option<&Team> {
        if self.home.id == team_id {
            Some(&self.away)
        } else if self.away.id == team_id {
            Some(&self.home)
        } else {
            None
        }
    }

    pub fn kickoff_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.kickoff)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Fixtures still open for analysis, in feed order.
pub fn pending<'a>(fixtures: &'a [Fixture]) -> impl Iterator<Item = &'a Fixture> {
    fixtures.iter().filter(|f| !f.is_settled())
}
