use std::collections::HashSet;

use petgraph::algo::{astar, has_path_connecting};
use petgraph::visit::{EdgeFiltered, EdgeRef, NodeFiltered};
use tracing::debug;
use unordered_pair::UnorderedPair;

use crate::colony::{Colony, RoomId};
use crate::config::Enumeration;

/// A simple route from the start room to the end room, both included.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path {
    rooms: Vec<RoomId>,
}

impl Path {
    pub(crate) fn new(rooms: Vec<RoomId>) -> Self {
        debug_assert!(rooms.len() >= 2, "a path needs at least one tunnel");
        Self { rooms }
    }

    /// Every room along the path, start and end included.
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Number of tunnels, i.e. the number of turns the first ant needs to arrive.
    pub fn length(&self) -> usize {
        self.rooms.len() - 1
    }

    /// The rooms strictly between start and end; these are what disjointness is checked on.
    pub fn interior(&self) -> &[RoomId] {
        &self.rooms[1..self.rooms.len() - 1]
    }

    /// The room an ant enters when it leaves the start room.
    pub fn first_step(&self) -> RoomId {
        self.rooms[1]
    }

    /// Room names along the path.
    pub fn names<'a>(&'a self, colony: &'a Colony) -> impl Iterator<Item = &'a str> + 'a {
        self.rooms.iter().map(|room| colony.name_of(*room))
    }
}

/// Paths that share no room besides start and end.
///
/// Disjointness is enforced as paths are pushed, never checked after the fact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<Path>,
    occupied: HashSet<RoomId>,
}

impl PathSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` shares an intermediate room with any member.
    pub fn conflicts_with(&self, path: &Path) -> bool {
        path.interior().iter().any(|room| self.occupied.contains(room))
    }

    /// Append `path` if it is disjoint from every member, handing it back otherwise.
    pub fn try_push(&mut self, path: Path) -> Result<(), Path> {
        if self.conflicts_with(&path) {
            return Err(path);
        }
        self.occupied.extend(path.interior().iter().copied());
        self.paths.push(path);
        Ok(())
    }

    /// Remove the most recently pushed path.
    pub fn pop(&mut self) -> Option<Path> {
        let path = self.paths.pop()?;
        for room in path.interior() {
            self.occupied.remove(room);
        }
        Some(path)
    }

    /// Members in the order they were pushed.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Length of every member, in order.
    pub fn lengths(&self) -> Vec<usize> {
        self.paths.iter().map(Path::length).collect()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over the members in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Rooms and tunnels a shortest path search may not use.
///
/// Passed explicitly to [`shortest_path`] so each search depends only on its arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Exclusions {
    rooms: HashSet<RoomId>,
    // the start-end tunnel has no interior to ban, so it is tracked on its own
    direct_tunnel: bool,
}

impl Exclusions {
    /// Ban everything `path` would claim in a disjoint set.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.rooms.extend(path.interior().iter().copied());
        if path.length() == 1 {
            self.direct_tunnel = true;
        }
        self
    }

    /// Whether a search may enter `room`.
    pub fn allows_room(&self, room: RoomId) -> bool {
        !self.rooms.contains(&room)
    }
}

/// Fewest-tunnel path from start to end avoiding `exclusions`, if any.
pub fn shortest_path(colony: &Colony, exclusions: &Exclusions) -> Option<Path> {
    let (start, end) = (colony.start(), colony.end());
    let direct = UnorderedPair(start, end);

    let filtered = EdgeFiltered::from_fn(&colony.graph, |edge: (RoomId, RoomId, &())| {
        exclusions.allows_room(edge.source())
            && exclusions.allows_room(edge.target())
            && !(exclusions.direct_tunnel && UnorderedPair(edge.source(), edge.target()) == direct)
    });

    astar(&filtered, start, |room| room == end, |_| 1usize, |_| 0)
        .map(|(_, rooms)| Path::new(rooms))
}

/// Produce at most `cap` candidate paths, shortest first, using `strategy`.
///
/// The result is fully determined by the colony and its tunnel declaration order.
/// An empty result means no route exists.
pub fn enumerate(colony: &Colony, strategy: Enumeration, cap: usize) -> Vec<Path> {
    let paths = match strategy {
        Enumeration::DepthFirst => depth_first(colony, cap),
        Enumeration::ShortestFirst => shortest_first(colony, cap),
    };
    debug!(%strategy, candidates = paths.len(), cap, "enumerated candidate paths");
    paths
}

/// Simple paths in depth first discovery order, truncated at `cap` and stably sorted by length.
///
/// The walk never enters a room from which the end is unreachable without crossing its own trail,
/// so every branch it takes yields at least one path and the work grows with `cap`, not with the colony's density.
pub fn depth_first(colony: &Colony, cap: usize) -> Vec<Path> {
    if cap == 0 {
        return Vec::new();
    }

    let mut walk = Walk {
        colony,
        cap,
        trail: vec![colony.start()],
        visited: vec![false; colony.room_count()],
        found: Vec::new(),
    };
    walk.visited[colony.start().index()] = true;
    walk.descend(colony.start());

    let mut found = walk.found;
    found.sort_by_key(Path::length);
    found
}

/// Pairwise disjoint shortest paths, each search banning the interior of every earlier one.
pub fn shortest_first(colony: &Colony, cap: usize) -> Vec<Path> {
    let mut exclusions = Exclusions::default();
    let mut found = Vec::new();

    while found.len() < cap {
        let Some(path) = shortest_path(colony, &exclusions) else {
            break;
        };
        exclusions = exclusions.with_path(&path);
        found.push(path);
    }

    found
}

struct Walk<'a> {
    colony: &'a Colony,
    cap: usize,
    trail: Vec<RoomId>,
    visited: Vec<bool>,
    found: Vec<Path>,
}

impl Walk<'_> {
    fn leads_to_end(&self, from: RoomId) -> bool {
        let visited = &self.visited;
        let open = NodeFiltered::from_fn(&self.colony.graph, |room: RoomId| !visited[room.index()]);
        has_path_connecting(&open, from, self.colony.end(), None)
    }

    fn descend(&mut self, room: RoomId) {
        let colony = self.colony;
        let end = colony.end();
        for next in colony.neighbors(room) {
            if self.found.len() >= self.cap {
                return;
            }
            if self.visited[next.index()] {
                continue;
            }

            if next != end && !self.leads_to_end(next) {
                continue;
            }

            self.trail.push(next);
            if next == end {
                self.found.push(Path::new(self.trail.clone()));
            } else {
                self.visited[next.index()] = true;
                self.descend(next);
                self.visited[next.index()] = false;
            }
            self.trail.pop();
        }
    }
}
