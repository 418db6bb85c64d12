use itertools::Itertools;
use tracing::debug;

use crate::colony::Colony;
use crate::config::PlannerConfig;
use crate::error::RouteError;
use crate::path::{enumerate, PathSet};
use crate::schedule::{AntAssignment, Schedule, Simulation};
use crate::select::{select, Selection};

/// Plans routes for a colony: enumerates candidate paths, picks a disjoint set and assigns ants to it.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    config: PlannerConfig,
}

/// The outcome of planning: the chosen paths, the turns they need and which ant takes which path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    selection: Selection,
    assignment: AntAssignment,
}

impl Planner {
    /// A planner using `config`.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The tunables this planner runs with.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan routes for every ant of `colony`.
    ///
    /// Fails with [`RouteError::NoRoute`] if the end room cannot be reached from the start room.
    pub fn plan(&self, colony: &Colony) -> Result<Plan, RouteError> {
        let ants = colony.ants().get();
        let candidates = enumerate(colony, self.config.enumeration, self.config.max_candidates);

        let Some(selection) = select(&candidates, ants, self.config.exhaustive_limit) else {
            return Err(RouteError::NoRoute {
                start: colony.name_of(colony.start()).to_owned(),
                end: colony.name_of(colony.end()).to_owned(),
            });
        };

        let lengths = selection.paths.lengths();
        let assignment = AntAssignment::balance(&lengths, ants);
        assignment.verify(&lengths, ants, selection.turns)?;

        debug!(paths = selection.paths.len(), turns = selection.turns, ants, "selected disjoint paths");
        for ((index, path), quota) in selection.paths.iter().enumerate().zip(assignment.quotas()) {
            debug!(index, length = path.length(), quota, rooms = %path.names(colony).join(" "), "path");
        }

        Ok(Plan { selection, assignment })
    }
}

impl Plan {
    /// The chosen disjoint paths.
    pub fn paths(&self) -> &PathSet {
        &self.selection.paths
    }

    /// The fewest turns the chosen paths need; the simulation finishes in exactly this many.
    pub fn turns(&self) -> usize {
        self.selection.turns
    }

    /// Which ant takes which path.
    pub fn assignment(&self) -> &AntAssignment {
        &self.assignment
    }

    /// Run the turn by turn simulation of this plan.
    pub fn simulate(&self, colony: &Colony) -> Result<Schedule, RouteError> {
        Simulation::new(colony, &self.selection.paths, &self.assignment).run()
    }
}

impl Colony {
    /// Route every ant with the default [`PlannerConfig`].
    pub fn solve(&self) -> Result<Schedule, RouteError> {
        self.solve_with(PlannerConfig::default())
    }

    /// Route every ant, returning the movement log.
    pub fn solve_with(&self, config: PlannerConfig) -> Result<Schedule, RouteError> {
        Planner::new(config).plan(self)?.simulate(self)
    }
}
