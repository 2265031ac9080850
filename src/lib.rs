//! What-if engine for a league table: classify pending fixtures by how
//! much their results matter to one team, project the table under the
//! favorable outcomes, and sweep the rest of the season by simulation.

pub mod difficulty;
pub mod elo;
pub mod feed;
pub mod fixtures;
pub mod gd_advisor;
pub mod monte_carlo;
pub mod projection;
pub mod races;
pub mod rival;
pub mod sample_data;
pub mod scenario;
pub mod standings;
pub mod store;
