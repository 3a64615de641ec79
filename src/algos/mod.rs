pub use self::events::{HeadcountPolicy, THREE_PERSON_EVENTS, assign_tasks};
pub use self::teams::{DEFAULT_TEAM_SIZE, divide_teams};
pub use self::weights::{Weighting, compute_weights};

mod events;
mod teams;
mod weights;
