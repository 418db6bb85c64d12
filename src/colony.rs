use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::num::NonZero;

use petgraph::graphmap::UnGraphMap;

/// Index of a room inside its [`Colony`].
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct RoomId(pub(crate) usize);

impl RoomId {
    /// The position of this room in declaration order.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The `(x, y)` coordinates of a room as written in the input.
/// They only take part in validation; routing never looks at them.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct Location(pub i64, pub i64);

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

/// A room of the colony.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    /// Unique name, used in the movement log.
    pub name: String,
    /// Declared coordinates, unique across the colony.
    pub location: Location,
}

/// A validated colony: rooms, the tunnels between them, the designated start and end rooms and the number of ants to move.
///
/// Colonies are immutable and should be created with a [`ColonyBuilder`](crate::builder::ColonyBuilder)
/// or loaded from text with [`parse_colony`](crate::parse::parse_colony).
#[derive(Clone, Debug)]
pub struct Colony {
    pub(crate) graph: UnGraphMap<RoomId, ()>,
    pub(crate) rooms: Vec<Room>,
    pub(crate) names: HashMap<String, RoomId>,
    pub(crate) start: RoomId,
    pub(crate) end: RoomId,
    pub(crate) ants: NonZero<usize>,
}

impl Colony {
    /// The room every ant leaves from.
    #[inline]
    pub fn start(&self) -> RoomId {
        self.start
    }

    /// The room every ant must reach.
    #[inline]
    pub fn end(&self) -> RoomId {
        self.end
    }

    /// Start and end rooms hold any number of ants.
    #[inline]
    pub fn is_terminal(&self, room: RoomId) -> bool {
        room == self.start || room == self.end
    }

    /// How many ants must cross the colony.
    #[inline]
    pub fn ants(&self) -> NonZero<usize> {
        self.ants
    }

    /// The room behind `id`.
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    /// Name of the room behind `id`.
    pub fn name_of(&self, id: RoomId) -> &str {
        &self.rooms[id.0].name
    }

    /// Look a room up by name.
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.names.get(name).copied()
    }

    /// Number of rooms, start and end included.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of tunnels.
    pub fn tunnel_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Neighbors of `room`, in the order their tunnels were declared.
    pub fn neighbors(&self, room: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.graph.neighbors(room)
    }

    /// Whether a tunnel joins `a` and `b`.
    pub fn are_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.graph.contains_edge(a, b)
    }
}
