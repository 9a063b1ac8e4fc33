use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::word::Word;

/// Where an item currently is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Lying in the named room.
    Room(String),
    /// Carried by the player.
    Inventory,
    /// Out of play.
    Nowhere,
}

impl Location {
    /// Location inside the named room.
    pub fn room(name: impl Into<String>) -> Self {
        Self::Room(name.into())
    }

    /// Whether this location is the given room.
    pub fn is_room(&self, name: &str) -> bool {
        matches!(self, Location::Room(r) if r.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Room(name) => write!(f, "{name}"),
            Location::Inventory => write!(f, "inventory"),
            Location::Nowhere => write!(f, "nowhere"),
        }
    }
}

/// A directional exit from one room to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    /// The word the player uses to take this exit.
    pub direction: Word,
    /// Name of the room the exit leads to (may be the room itself).
    pub target: String,
}

/// A place the player can be in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique name, also the room's identity.
    pub name: String,
    /// Text shown when the player looks around.
    pub description: String,
    /// Exits in declaration order.
    pub exits: Vec<Exit>,
}

impl Room {
    /// Create a room with no exits.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exits: Vec::new(),
        }
    }

    /// Add an exit (builder style).
    pub fn with_exit(mut self, direction: Word, target: impl Into<String>) -> Self {
        self.exits.push(Exit {
            direction,
            target: target.into(),
        });
        self
    }

    /// The first exit whose direction matches `direction`.
    pub fn exit_towards(&self, direction: &Word) -> Option<&Exit> {
        self.exits.iter().find(|e| e.direction.matches(direction))
    }

    /// Whether any exit matches `direction`.
    pub fn has_exit(&self, direction: &Word) -> bool {
        self.exit_towards(direction).is_some()
    }
}

impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Room {}

/// An object in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique name, also the item's identity.
    pub name: String,
    /// Text shown when the item is listed.
    pub description: String,
    /// Whether the player may carry the item.
    pub portable: bool,
    /// Alternative words the player may use for the item.
    pub aliases: Vec<String>,
    /// Where the item is when a game starts.
    pub starting_location: Location,
}

impl Item {
    /// Create a fixed item placed nowhere.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            portable: false,
            aliases: Vec::new(),
            starting_location: Location::Nowhere,
        }
    }

    /// Mark the item as portable.
    pub fn portable(mut self) -> Self {
        self.portable = true;
        self
    }

    /// Add an alias. Items with aliases are portable.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self.portable = true;
        self
    }

    /// Set the starting location.
    pub fn at(mut self, location: Location) -> Self {
        self.starting_location = location;
        self
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Item {}

/// The static world: every room and item, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct World {
    rooms: Vec<Room>,
    items: Vec<Item>,

    // Indexes keyed by lowercased name
    room_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room. Names are unique, ignoring case.
    pub fn add_room(&mut self, room: Room) -> CoreResult<()> {
        let key = room.name.to_lowercase();
        if self.room_index.contains_key(&key) {
            return Err(CoreError::DuplicateRoom(room.name));
        }
        self.room_index.insert(key, self.rooms.len());
        self.rooms.push(room);
        Ok(())
    }

    /// Add an item. Names are unique, ignoring case.
    ///
    /// A fixed item cannot start in the inventory.
    pub fn add_item(&mut self, item: Item) -> CoreResult<()> {
        let key = item.name.to_lowercase();
        if self.item_index.contains_key(&key) {
            return Err(CoreError::DuplicateItem(item.name));
        }
        if item.starting_location == Location::Inventory && !item.portable {
            return Err(CoreError::NotPortable(item.name));
        }
        self.item_index.insert(key, self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Find a room by name (case-insensitive).
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.room_index
            .get(&name.to_lowercase())
            .map(|&i| &self.rooms[i])
    }

    /// Find an item by name (case-insensitive).
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.item_index
            .get(&name.to_lowercase())
            .map(|&i| &self.items[i])
    }

    /// Find a room by name or fail.
    pub fn require_room(&self, name: &str) -> CoreResult<&Room> {
        self.room(name)
            .ok_or_else(|| CoreError::UnknownRoom(name.to_string()))
    }

    /// Find an item by name or fail.
    pub fn require_item(&self, name: &str) -> CoreResult<&Item> {
        self.item(name)
            .ok_or_else(|| CoreError::UnknownItem(name.to_string()))
    }

    /// All rooms in declaration order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All items in declaration order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}
