pub mod sosp;
pub mod travel_matrix;

pub type SwitchId = usize;
pub type TeamId = usize;

/// Index of the virtual team holding the remotely actuated switches. It has
/// no crew and no travel times.
pub const REMOTE_TEAM: TeamId = 0;
