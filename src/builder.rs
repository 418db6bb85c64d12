use std::collections::{HashMap, HashSet};
use std::num::NonZero;

use petgraph::graphmap::UnGraphMap;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::colony::{Colony, Location, Room, RoomId};

/// The largest ant count a colony may be built with.
pub const MAX_ANTS: usize = 100_000;

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuilderInvalidReason {
    /// No positive ant count was given.
    #[error("invalid ants count")]
    NoAnts,
    /// The ant count is above [`MAX_ANTS`].
    #[error("ant count {0} greater than 100000")]
    TooManyAnts(usize),
    /// Room names must be non-empty and must not start with `L` or `#`, which would be ambiguous in the input and output formats.
    #[error("invalid room name '{0}'")]
    BadRoomName(String),
    /// Two rooms share a name.
    #[error("duplicate room name '{0}'")]
    DuplicateRoom(String),
    /// Two rooms share coordinates.
    #[error("duplicate coordinates {0}")]
    DuplicateLocation(Location),
    /// A second start room was marked.
    #[error("duplicate start")]
    DuplicateStart,
    /// A second end room was marked.
    #[error("duplicate end")]
    DuplicateEnd,
    /// No start room was marked.
    #[error("missing start room")]
    MissingStart,
    /// No end room was marked.
    #[error("missing end room")]
    MissingEnd,
    /// The same room was marked as both start and end.
    #[error("start and end are the same room '{0}'")]
    StartIsEnd(String),
    /// A tunnel connects a room to itself.
    #[error("self-loop link {0}-{0}")]
    SelfLoop(String),
    /// The same pair of rooms was connected twice, in either orientation.
    #[error("duplicate link {0}-{1}")]
    DuplicateTunnel(String, String),
    /// A tunnel or marker names a room that was never declared.
    #[error("unknown room in link '{0}'")]
    UnknownRoom(String),
}

/// A builder for [`Colony`] values.
///
/// Every mutator records at most one [`BuilderInvalidReason`]; once the builder is invalid, further calls do nothing.
/// Tunnels may be added before the rooms they name, so unknown rooms are only reported by [`Self::build`].
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug, Default)]
pub struct ColonyBuilder {
    ants: Option<NonZero<usize>>,
    rooms: Vec<Room>,
    names: HashMap<String, RoomId>,
    locations: HashSet<Location>,
    start: Option<RoomId>,
    end: Option<RoomId>,
    // declaration order matters: it fixes the neighbor order of every room
    tunnels: Vec<UnorderedPair<String>>,
    seen_tunnels: HashSet<UnorderedPair<String>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl ColonyBuilder {
    /// Construct a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of ants to route.
    ///
    /// May cause the builder to enter a [`NoAnts`](BuilderInvalidReason::NoAnts) or
    /// [`TooManyAnts`](BuilderInvalidReason::TooManyAnts) invalid state.
    pub fn with_ants(&mut self, count: usize) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match NonZero::new(count) {
            None => self.invalid_reasons.push(BuilderInvalidReason::NoAnts),
            Some(_) if count > MAX_ANTS => self.invalid_reasons.push(BuilderInvalidReason::TooManyAnts(count)),
            Some(ants) => self.ants = Some(ants),
        }

        self
    }

    /// Declare a room.
    ///
    /// May cause the builder to enter a [`BadRoomName`](BuilderInvalidReason::BadRoomName),
    /// [`DuplicateRoom`](BuilderInvalidReason::DuplicateRoom) or
    /// [`DuplicateLocation`](BuilderInvalidReason::DuplicateLocation) invalid state.
    pub fn add_room(&mut self, name: &str, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if name.is_empty() || name.starts_with('L') || name.starts_with('#') {
            self.invalid_reasons.push(BuilderInvalidReason::BadRoomName(name.to_owned()));
            return self;
        }
        if self.names.contains_key(name) {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateRoom(name.to_owned()));
            return self;
        }
        if !self.locations.insert(location) {
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateLocation(location));
            return self;
        }

        let id = RoomId(self.rooms.len());
        self.names.insert(name.to_owned(), id);
        self.rooms.push(Room { name: name.to_owned(), location });

        self
    }

    /// Declare a room and mark it as the start room.
    pub fn add_start(&mut self, name: &str, location: Location) -> &mut Self {
        self.add_room(name, location).mark_start(name)
    }

    /// Declare a room and mark it as the end room.
    pub fn add_end(&mut self, name: &str, location: Location) -> &mut Self {
        self.add_room(name, location).mark_end(name)
    }

    /// Mark an already declared room as the start room.
    ///
    /// May cause the builder to enter a [`DuplicateStart`](BuilderInvalidReason::DuplicateStart) or
    /// [`UnknownRoom`](BuilderInvalidReason::UnknownRoom) invalid state.
    pub fn mark_start(&mut self, name: &str) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match (self.start, self.names.get(name)) {
            (Some(_), _) => self.invalid_reasons.push(BuilderInvalidReason::DuplicateStart),
            (None, None) => self.invalid_reasons.push(BuilderInvalidReason::UnknownRoom(name.to_owned())),
            (None, Some(id)) => self.start = Some(*id),
        }

        self
    }

    /// Mark an already declared room as the end room.
    ///
    /// May cause the builder to enter a [`DuplicateEnd`](BuilderInvalidReason::DuplicateEnd) or
    /// [`UnknownRoom`](BuilderInvalidReason::UnknownRoom) invalid state.
    pub fn mark_end(&mut self, name: &str) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match (self.end, self.names.get(name)) {
            (Some(_), _) => self.invalid_reasons.push(BuilderInvalidReason::DuplicateEnd),
            (None, None) => self.invalid_reasons.push(BuilderInvalidReason::UnknownRoom(name.to_owned())),
            (None, Some(id)) => self.end = Some(*id),
        }

        self
    }

    /// Connect two rooms with a tunnel. The order in which the rooms are given does not matter.
    ///
    /// May cause the builder to enter a [`SelfLoop`](BuilderInvalidReason::SelfLoop) or
    /// [`DuplicateTunnel`](BuilderInvalidReason::DuplicateTunnel) invalid state.
    pub fn add_tunnel(&mut self, a: &str, b: &str) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if a == b {
            self.invalid_reasons.push(BuilderInvalidReason::SelfLoop(a.to_owned()));
            return self;
        }

        let tunnel = UnorderedPair::from((a.to_owned(), b.to_owned()));
        if !self.seen_tunnels.insert(tunnel.clone()) {
            let (first, second) = if a < b { (a, b) } else { (b, a) };
            self.invalid_reasons.push(BuilderInvalidReason::DuplicateTunnel(first.to_owned(), second.to_owned()));
            return self;
        }
        self.tunnels.push(tunnel);

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Colony`].
    /// If the builder is invalid for any reason, a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Colony, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let mut reasons = Vec::new();
        if self.ants.is_none() {
            reasons.push(BuilderInvalidReason::NoAnts);
        }
        if self.start.is_none() {
            reasons.push(BuilderInvalidReason::MissingStart);
        }
        if self.end.is_none() {
            reasons.push(BuilderInvalidReason::MissingEnd);
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start == end {
                reasons.push(BuilderInvalidReason::StartIsEnd(self.rooms[start.0].name.clone()));
            }
        }

        let mut graph = UnGraphMap::with_capacity(self.rooms.len(), self.tunnels.len());
        // isolated rooms still belong to the colony
        for index in 0..self.rooms.len() {
            graph.add_node(RoomId(index));
        }

        for UnorderedPair(a, b) in self.tunnels.iter() {
            match (self.names.get(a), self.names.get(b)) {
                (Some(a), Some(b)) => {
                    graph.add_edge(*a, *b, ());
                }
                (None, _) => reasons.push(BuilderInvalidReason::UnknownRoom(a.clone())),
                (_, None) => reasons.push(BuilderInvalidReason::UnknownRoom(b.clone())),
            }
        }

        match (self.ants, self.start, self.end) {
            (Some(ants), Some(start), Some(end)) if reasons.is_empty() => Ok(Colony {
                graph,
                rooms: self.rooms.clone(),
                names: self.names.clone(),
                start,
                end,
                ants,
            }),
            _ => Err(reasons),
        }
    }
}
