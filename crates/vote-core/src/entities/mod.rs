//! Domain entities - core business objects

mod activity;
mod tally;
mod team;
mod vote;

pub use activity::{Activity, ACTIVE_SENTINEL};
pub use tally::{overlay_counts, CachedTally, CountSnapshot, CountSource, TeamCounts};
pub use team::{is_valid_team_id, Team, TeamRegistry, MAX_TEAM_ID_LEN};
pub use vote::{NewVote, Vote, VoteReceipt, MAX_USER_ID_LEN};
