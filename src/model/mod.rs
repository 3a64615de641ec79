pub use self::agent::Agent;
pub use self::assignment::Assignment;
pub use self::data::TeamData;
#[cfg(test)]
pub use self::data::{Participant, TestOff, TestOffEvent, Tournament, TournamentEntry};

mod agent;
mod assignment;
mod data;
