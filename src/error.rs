use thiserror::Error;

/// Reasons routing a colony may fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// No path connects the start room to the end room.
    #[error("no path from {start} to {end}")]
    NoRoute {
        /// Name of the start room.
        start: String,
        /// Name of the end room.
        end: String,
    },
    /// The chosen paths cannot carry every ant within the computed number of turns.
    /// This indicates a bug in turn calculation or ant assignment and should never happen.
    #[error("paths cannot deliver {ants} ants within {turns} turns")]
    InfeasibleAssignment {
        /// Ants that had to be delivered.
        ants: usize,
        /// The turn budget that was exceeded.
        turns: usize,
    },
}
