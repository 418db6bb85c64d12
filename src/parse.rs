//! Loader for the classic lem-in text format.
//!
//! ```text
//! 3
//! ##start
//! start 0 0
//! mid 1 0
//! ##end
//! end 2 0
//! start-mid
//! mid-end
//! ```
//!
//! The first line that is not a comment holds the ant count.
//! `##start` and `##end` mark the next room line; any other line beginning with `#` is a comment.

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::builder::{BuilderInvalidReason, ColonyBuilder};
use crate::colony::{Colony, Location};

/// Reasons a colony description could not be loaded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The ant count line is not a positive integer.
    #[error("line {line}: invalid ants count")]
    InvalidAntCount {
        /// 1-based line number.
        line: usize,
    },
    /// A room line has coordinates that are not integers.
    #[error("line {line}: invalid room line")]
    InvalidCoordinates {
        /// 1-based line number.
        line: usize,
    },
    /// `##start` or `##end` appeared twice.
    #[error("line {line}: duplicate {marker}")]
    DuplicateMarker {
        /// 1-based line number.
        line: usize,
        /// `start` or `end`.
        marker: &'static str,
    },
    /// The line is neither a comment, a room nor a tunnel.
    #[error("line {line}: invalid line")]
    Malformed {
        /// 1-based line number.
        line: usize,
    },
    /// The described colony breaks a structural rule.
    #[error("line {line}: {reason}")]
    Invalid {
        /// 1-based line number.
        line: usize,
        /// The rule the line breaks.
        reason: BuilderInvalidReason,
    },
    /// The description as a whole is incomplete or inconsistent.
    #[error("{}", join_reasons(.0))]
    Colony(Vec<BuilderInvalidReason>),
}

impl ParseError {
    /// Whether this error stems from an ant count above [`MAX_ANTS`](crate::builder::MAX_ANTS).
    pub fn is_ant_limit(&self) -> bool {
        matches!(self, ParseError::Invalid { reason: BuilderInvalidReason::TooManyAnts(_), .. })
    }
}

#[derive(Default)]
struct Markers {
    start: bool,
    end: bool,
    seen_start: bool,
    seen_end: bool,
}

/// Parse a full colony description, stopping at the first offending line.
pub fn parse_colony(input: &str) -> Result<Colony, ParseError> {
    let mut builder = ColonyBuilder::new();
    let mut markers = Markers::default();
    let mut parsed_ants = false;

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;

        if text.starts_with('#') {
            match text {
                "##start" => {
                    if markers.start || markers.seen_start {
                        return Err(ParseError::DuplicateMarker { line, marker: "start" });
                    }
                    markers.start = true;
                }
                "##end" => {
                    if markers.end || markers.seen_end {
                        return Err(ParseError::DuplicateMarker { line, marker: "end" });
                    }
                    markers.end = true;
                }
                _ => {}
            }
            continue;
        }

        if !parsed_ants {
            let ants = text.trim().parse::<usize>().map_err(|_| ParseError::InvalidAntCount { line })?;
            builder.with_ants(ants);
            parsed_ants = true;
        } else {
            let fields = text.split_whitespace().collect::<Vec<_>>();
            if let &[name, x, y] = fields.as_slice() {
                let (Ok(x), Ok(y)) = (x.parse::<i64>(), y.parse::<i64>()) else {
                    return Err(ParseError::InvalidCoordinates { line });
                };
                builder.add_room(name, Location(x, y));
                if markers.start {
                    builder.mark_start(name);
                    markers.start = false;
                    markers.seen_start = true;
                }
                if markers.end {
                    builder.mark_end(name);
                    markers.end = false;
                    markers.seen_end = true;
                }
            } else if let Some((a, b)) = split_tunnel(text) {
                builder.add_tunnel(a, b);
            } else {
                return Err(ParseError::Malformed { line });
            }
        }

        if let Some(reasons) = builder.is_valid() {
            return Err(ParseError::Invalid { line, reason: reasons[0].clone() });
        }
    }

    if !parsed_ants {
        return Err(ParseError::Colony(vec![BuilderInvalidReason::NoAnts]));
    }

    let colony = builder.build().map_err(ParseError::Colony)?;
    debug!(rooms = colony.room_count(), tunnels = colony.tunnel_count(), ants = colony.ants().get(), "loaded colony");
    Ok(colony)
}

fn join_reasons(reasons: &[BuilderInvalidReason]) -> String {
    reasons.iter().join(", ")
}

fn split_tunnel(text: &str) -> Option<(&str, &str)> {
    if text.contains(' ') || text.matches('-').count() != 1 {
        return None;
    }
    text.split_once('-')
}
