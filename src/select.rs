use tracing::debug;

use crate::path::{Path, PathSet};
use crate::turns::turns_required;

/// A disjoint path set together with the fewest turns it needs for the colony's ants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// The chosen disjoint paths.
    pub paths: PathSet,
    /// The fewest turns these paths need.
    pub turns: usize,
}

/// Choose the disjoint subset of `candidates` that moves `ants` ants in the fewest turns.
///
/// `candidates` must be sorted by ascending length, as the enumerator produces them.
/// The greedy augmentation of [`augment`] gives the baseline; when there are at most `exhaustive_limit`
/// candidates, [`refine`] then looks for a set needing strictly fewer turns.
///
/// Returns `None` only if there are no candidates.
pub fn select(candidates: &[Path], ants: usize, exhaustive_limit: usize) -> Option<Selection> {
    debug_assert!(candidates.windows(2).all(|pair| pair[0].length() <= pair[1].length()));

    let greedy = augment(candidates, ants)?;
    if candidates.len() > exhaustive_limit {
        debug!(candidates = candidates.len(), exhaustive_limit, "skipping exact search");
        return Some(greedy);
    }

    let greedy_turns = greedy.turns;
    let best = refine(candidates, ants, greedy);
    if best.turns < greedy_turns {
        debug!(greedy_turns, turns = best.turns, "exact search beat greedy selection");
    }
    Some(best)
}

/// Walk the candidates shortest first, keeping each one that is disjoint from those kept so far
/// and does not raise the turn count.
pub fn augment(candidates: &[Path], ants: usize) -> Option<Selection> {
    let mut paths = PathSet::new();
    let mut turns: Option<usize> = None;

    for candidate in candidates {
        if paths.conflicts_with(candidate) {
            continue;
        }

        let mut lengths = paths.lengths();
        lengths.push(candidate.length());
        let Some(with_candidate) = turns_required(&lengths, ants) else {
            continue;
        };

        if turns.map_or(true, |current| with_candidate <= current) && paths.try_push(candidate.clone()).is_ok() {
            turns = Some(with_candidate);
        }
    }

    turns.map(|turns| Selection { paths, turns })
}

/// Branch and bound over disjoint subsets of `candidates`, replacing `baseline` only on a strict improvement.
pub fn refine(candidates: &[Path], ants: usize, baseline: Selection) -> Selection {
    let mut search = Search {
        candidates,
        ants,
        current: PathSet::new(),
        best: baseline,
    };
    search.explore(0);
    search.best
}

struct Search<'a> {
    candidates: &'a [Path],
    ants: usize,
    current: PathSet,
    best: Selection,
}

impl Search<'_> {
    /// Turns needed if every remaining candidate disjoint from the current set could be added at once.
    /// More paths never need more turns, so no branch below `from` can do better than this.
    fn optimistic_turns(&self, from: usize) -> Option<usize> {
        let mut lengths = self.current.lengths();
        lengths.extend(self.candidates[from..].iter()
            .filter(|candidate| !self.current.conflicts_with(candidate))
            .map(Path::length));
        turns_required(&lengths, self.ants)
    }

    fn explore(&mut self, from: usize) {
        if self.optimistic_turns(from).map_or(true, |turns| turns >= self.best.turns) {
            return;
        }

        let candidates = self.candidates;
        for (index, candidate) in candidates.iter().enumerate().skip(from) {
            // a path this long delivers nothing before the best turn count, and every later one is at least as long
            if candidate.length() >= self.best.turns {
                return;
            }
            if self.current.try_push(candidate.clone()).is_err() {
                continue;
            }

            if let Some(turns) = turns_required(&self.current.lengths(), self.ants) {
                if turns < self.best.turns {
                    self.best = Selection { paths: self.current.clone(), turns };
                }
            }
            self.explore(index + 1);
            self.current.pop();
        }
    }
}
