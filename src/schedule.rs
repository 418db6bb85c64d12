use std::collections::{BTreeSet, VecDeque};
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use strum::{Display as StrumDisplay, EnumIs};
use tracing::trace;

use crate::colony::{Colony, RoomId};
use crate::error::RouteError;
use crate::path::PathSet;

/// An ant, numbered from 1 in order of arrival priority.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct AntId(pub(crate) usize);

impl AntId {
    /// The 1-based ant number.
    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    #[inline]
    fn index(&self) -> usize {
        self.0 - 1
    }
}

impl Display for AntId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Where an ant is in its trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIs, StrumDisplay)]
pub enum AntState {
    /// Still waiting in the start room.
    NotStarted,
    /// On its path, `position` tunnels from the start room.
    InTransit {
        /// Tunnels crossed since leaving the start room.
        position: usize,
    },
    /// Reached the end room.
    Arrived,
}

/// Which path every ant takes, and the order ants leave the start room on each path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AntAssignment {
    pub(crate) routes: Vec<usize>,
    pub(crate) queues: Vec<Vec<AntId>>,
}

impl AntAssignment {
    /// Hand out ants one at a time, each to the path minimising `length + ants already assigned`,
    /// ties going to the lowest path index. This keeps the arrival turn of every path's last ant as low as possible.
    pub fn balance(lengths: &[usize], ants: usize) -> Self {
        let mut routes = Vec::with_capacity(ants);
        let mut queues = vec![Vec::new(); lengths.len()];

        for id in 1..=ants {
            let Some(path) = lengths.iter()
                .zip(queues.iter())
                .position_min_by_key(|(length, queue)| **length + queue.len())
            else {
                break;
            };
            routes.push(path);
            queues[path].push(AntId(id));
        }

        Self { routes, queues }
    }

    /// Index of the path `ant` travels on.
    pub fn path_of(&self, ant: AntId) -> usize {
        self.routes[ant.index()]
    }

    /// Ants assigned to path `path`, in the order they leave.
    pub fn queue(&self, path: usize) -> &[AntId] {
        &self.queues[path]
    }

    /// Number of ants assigned to each path.
    pub fn quotas(&self) -> Vec<usize> {
        self.queues.iter().map(Vec::len).collect()
    }

    /// Number of ants handed out.
    pub fn ant_count(&self) -> usize {
        self.routes.len()
    }

    /// Check that every ant is assigned and that every path's last ant arrives by `turns`.
    pub fn verify(&self, lengths: &[usize], ants: usize, turns: usize) -> Result<(), RouteError> {
        let overrun = self.queues.iter()
            .zip(lengths)
            .any(|(queue, length)| !queue.is_empty() && length + queue.len() - 1 > turns);

        if self.routes.len() != ants || overrun {
            return Err(RouteError::InfeasibleAssignment { ants, turns });
        }
        Ok(())
    }
}

/// One ant moving into one room.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Movement {
    /// The ant that moved.
    pub ant: AntId,
    /// The room it moved into.
    pub room: RoomId,
}

/// Every movement of one turn, in ascending ant order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Turn {
    moves: Vec<Movement>,
}

impl Turn {
    /// Movements of this turn, in ascending ant order.
    pub fn moves(&self) -> &[Movement] {
        &self.moves
    }
}

/// The full movement log: one [`Turn`] per turn in which anything moved, in chronological order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    turns: Vec<Turn>,
}

impl Schedule {
    /// Every turn, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Turns needed to move every ant.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Render as `L<ant>-<room>` tokens, one line per turn.
    pub fn display<'a>(&'a self, colony: &'a Colony) -> ScheduleDisplay<'a> {
        ScheduleDisplay { schedule: self, colony }
    }
}

/// Helper returned by [`Schedule::display`].
pub struct ScheduleDisplay<'a> {
    schedule: &'a Schedule,
    colony: &'a Colony,
}

impl Display for ScheduleDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for turn in self.schedule.turns() {
            writeln!(f, "{}", turn.moves.iter()
                .map(|movement| format!("{}-{}", movement.ant, self.colony.name_of(movement.room)))
                .join(" "))?;
        }
        Ok(())
    }
}

/// Room occupancy. Start and end rooms are never tracked.
struct Occupancy<'a> {
    colony: &'a Colony,
    rooms: Vec<Option<AntId>>,
}

impl Occupancy<'_> {
    fn is_free(&self, room: RoomId) -> bool {
        self.colony.is_terminal(room) || self.rooms[room.index()].is_none()
    }

    fn enter(&mut self, room: RoomId, ant: AntId) {
        if !self.colony.is_terminal(room) {
            self.rooms[room.index()] = Some(ant);
        }
    }

    fn leave(&mut self, room: RoomId) {
        if !self.colony.is_terminal(room) {
            self.rooms[room.index()] = None;
        }
    }
}

/// Turn by turn simulation of ants following an [`AntAssignment`] over a [`PathSet`].
///
/// Each turn first advances every ant already on its way, in ascending ant order, then lets at most one waiting ant
/// leave the start room on each path, in path order. A room vacated in the first phase can be entered in the second.
pub struct Simulation<'a> {
    colony: &'a Colony,
    paths: &'a PathSet,
    routes: &'a [usize],
    queues: Vec<VecDeque<AntId>>,
    states: Vec<AntState>,
    in_transit: BTreeSet<AntId>,
    occupancy: Occupancy<'a>,
    turn: usize,
    arrived: usize,
}

impl<'a> Simulation<'a> {
    /// Prepare a simulation with every ant waiting in the start room.
    pub fn new(colony: &'a Colony, paths: &'a PathSet, assignment: &'a AntAssignment) -> Self {
        Self {
            colony,
            paths,
            routes: &assignment.routes,
            queues: assignment.queues.iter().map(|queue| queue.iter().copied().collect()).collect(),
            states: vec![AntState::NotStarted; assignment.routes.len()],
            in_transit: BTreeSet::new(),
            occupancy: Occupancy {
                colony,
                rooms: vec![None; colony.room_count()],
            },
            turn: 0,
            arrived: 0,
        }
    }

    /// Turns simulated so far, including turns in which nothing moved.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Where `ant` currently is.
    pub fn state(&self, ant: AntId) -> AntState {
        self.states[ant.index()]
    }

    /// Whether every ant has arrived.
    pub fn is_complete(&self) -> bool {
        self.arrived == self.states.len()
    }

    /// Simulate one turn, returning its movements unless nothing moved.
    pub fn step(&mut self) -> Option<Turn> {
        self.turn += 1;
        let end = self.colony.end();
        let mut moves = Vec::new();

        for ant in self.in_transit.iter().copied().collect_vec() {
            let AntState::InTransit { position } = self.states[ant.index()] else {
                continue;
            };
            let rooms = self.paths.paths()[self.routes[ant.index()]].rooms();
            let next = rooms[position + 1];
            if !self.occupancy.is_free(next) {
                continue;
            }

            self.occupancy.leave(rooms[position]);
            if next == end {
                self.states[ant.index()] = AntState::Arrived;
                self.in_transit.remove(&ant);
                self.arrived += 1;
            } else {
                self.occupancy.enter(next, ant);
                self.states[ant.index()] = AntState::InTransit { position: position + 1 };
            }
            moves.push(Movement { ant, room: next });
        }

        for (path, queue) in self.queues.iter_mut().enumerate() {
            let Some(&ant) = queue.front() else {
                continue;
            };
            let first = self.paths.paths()[path].first_step();
            if !self.occupancy.is_free(first) {
                continue;
            }

            queue.pop_front();
            if first == end {
                self.states[ant.index()] = AntState::Arrived;
                self.arrived += 1;
            } else {
                self.occupancy.enter(first, ant);
                self.states[ant.index()] = AntState::InTransit { position: 1 };
                self.in_transit.insert(ant);
            }
            moves.push(Movement { ant, room: first });
        }

        trace!(turn = self.turn, moved = moves.len(), arrived = self.arrived, "simulated turn");
        if moves.is_empty() {
            return None;
        }
        moves.sort_by_key(|movement| movement.ant);
        Some(Turn { moves })
    }

    /// Simulate until every ant has arrived.
    ///
    /// A correct assignment finishes within `ants + longest path - 1` turns;
    /// running past that is reported as [`RouteError::InfeasibleAssignment`].
    pub fn run(mut self) -> Result<Schedule, RouteError> {
        let longest = self.paths.iter().map(|path| path.length()).max().unwrap_or(0);
        let limit = self.states.len() + longest;
        let mut turns = Vec::new();

        while !self.is_complete() {
            if self.turn >= limit {
                return Err(RouteError::InfeasibleAssignment { ants: self.states.len(), turns: self.turn });
            }
            if let Some(turn) = self.step() {
                turns.push(turn);
            }
        }

        Ok(Schedule { turns })
    }
}
