#![warn(missing_docs)]

//! # `lem-in`
//!
//! Moves a colony of ants from a start room to an end room in as few turns as possible.
//! Build a [`Colony`] with a [`ColonyBuilder`] or load one with [`parse_colony`],
//! then call [`solve()`](crate::Colony::solve) to obtain the [`Schedule`] of moves.
//!
//! Rooms are joined by tunnels. Every turn, each ant may cross one tunnel, but no room other than the start and end
//! may hold more than one ant at a time. The schedule is rendered as one line per turn of `L<ant>-<room>` tokens.
//!
//! # Internals
//! Routing happens in four stages, each in its own module:
//!
//! 1. [`path`] enumerates candidate paths from start to end, capped at
//!    [`max_candidates`](crate::PlannerConfig::max_candidates) and ordered shortest first.
//! 2. [`select`] chooses candidates that share no intermediate room. A greedy pass keeps every disjoint candidate
//!    that does not raise the turn count; short candidate lists are then searched exhaustively for a strictly better set.
//! 3. [`turns`] computes the fewest turns a set of path lengths needs: a path of length `l` delivers
//!    `t - l + 1` ants by turn `t`.
//! 4. [`schedule`] hands each ant to the path minimising `length + ants already assigned` and simulates the colony
//!    turn by turn, which finishes in exactly the computed number of turns.
//!
//! Enumeration is capped, so on dense colonies the chosen set can miss the best one; raise the cap to trade time for optimality.

pub use builder::ColonyBuilder;
pub use colony::{Colony, Location, Room, RoomId};
pub use config::{Enumeration, PlannerConfig};
pub use error::RouteError;
pub use parse::{parse_colony, ParseError};
pub use planner::{Plan, Planner};
pub use schedule::{AntId, Schedule};

/// Validating construction of colonies.
pub mod builder;
pub(crate) mod colony;
pub(crate) mod config;
pub(crate) mod error;
pub mod parse;
/// Paths through a colony and the ways candidates are enumerated.
pub mod path;
pub(crate) mod planner;
/// Ant assignment and the turn by turn simulation.
pub mod schedule;
/// Choosing a disjoint set of candidate paths.
pub mod select;
pub mod turns;
/// WebAssembly bindings.
#[cfg(feature = "wasm")]
pub mod wasm;
