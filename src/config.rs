use strum::{Display, EnumString, VariantArray, VariantNames};

/// How candidate paths from start to end are discovered.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, VariantArray, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum Enumeration {
    /// Enumerate simple paths depth first in neighbor order, then stably sort them by length.
    #[default]
    DepthFirst,
    /// Repeatedly take a shortest path, banning the intermediate rooms of every path found so far.
    /// Candidates are pairwise disjoint and come out shortest first.
    ShortestFirst,
}

/// Tunables for a [`Planner`](crate::planner::Planner).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlannerConfig {
    /// The most candidate paths the enumerator may produce.
    ///
    /// On dense colonies the cap can hide the best disjoint set; raising it trades time for optimality.
    pub max_candidates: usize,
    /// Candidate lists up to this size get an exact search for a better disjoint set after the greedy pass.
    pub exhaustive_limit: usize,
    /// Candidate discovery strategy.
    pub enumeration: Enumeration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_candidates: 100,
            exhaustive_limit: 16,
            enumeration: Enumeration::default(),
        }
    }
}

impl PlannerConfig {
    /// Set [`Self::max_candidates`].
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Set [`Self::exhaustive_limit`].
    pub fn with_exhaustive_limit(mut self, exhaustive_limit: usize) -> Self {
        self.exhaustive_limit = exhaustive_limit;
        self
    }

    /// Set [`Self::enumeration`].
    pub fn with_enumeration(mut self, enumeration: Enumeration) -> Self {
        self.enumeration = enumeration;
        self
    }
}
