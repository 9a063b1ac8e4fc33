use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::world::{Item, Location, World};

static NOWHERE: Location = Location::Nowhere;

/// Mutable state of one game session.
///
/// The [`World`] is shared and never changes during play; everything a turn
/// can change lives here, keyed by room and item names. The turn counter is
/// ordinary state so that a restored snapshot continues counting where it
/// left off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    current_room: String,
    item_locations: BTreeMap<String, Location>,
    flags: BTreeMap<String, bool>,
    counters: BTreeMap<String, i64>,
    strings: BTreeMap<String, String>,
    running: bool,
    turns: u64,
}

impl GameState {
    /// Fresh state: player in `start_room`, every item at its starting location.
    pub fn new(world: &World, start_room: impl Into<String>) -> Self {
        let item_locations = world
            .items()
            .iter()
            .map(|item| (item.name.clone(), item.starting_location.clone()))
            .collect();
        Self {
            current_room: start_room.into(),
            item_locations,
            flags: BTreeMap::new(),
            counters: BTreeMap::new(),
            strings: BTreeMap::new(),
            running: true,
            turns: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Player position
    // -----------------------------------------------------------------------

    /// Name of the room the player is in.
    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    /// Move the player to a room.
    pub fn set_current_room(&mut self, room: impl Into<String>) {
        self.current_room = room.into();
    }

    // -----------------------------------------------------------------------
    // Item placement
    // -----------------------------------------------------------------------

    /// Where an item is now. Unknown items are nowhere.
    pub fn location_of(&self, item: &str) -> &Location {
        self.item_locations
            .get(item)
            .unwrap_or(&NOWHERE)
    }

    /// Whether the item is in the player's current room.
    pub fn is_here(&self, item: &str) -> bool {
        self.location_of(item).is_room(&self.current_room)
    }

    /// Whether the player carries the item.
    pub fn is_carried(&self, item: &str) -> bool {
        *self.location_of(item) == Location::Inventory
    }

    /// Whether the item is anywhere but nowhere.
    pub fn exists(&self, item: &str) -> bool {
        *self.location_of(item) != Location::Nowhere
    }

    /// Whether the item has left its starting location.
    pub fn has_moved(&self, world: &World, item: &str) -> bool {
        world
            .item(item)
            .is_some_and(|i| *self.location_of(&i.name) != i.starting_location)
    }

    /// Items at a location, in declaration order.
    pub fn items_at<'w>(&self, world: &'w World, location: &Location) -> Vec<&'w Item> {
        world
            .items()
            .iter()
            .filter(|i| self.location_of(&i.name) == location)
            .collect()
    }

    /// Items lying in the player's current room.
    pub fn items_here<'w>(&self, world: &'w World) -> Vec<&'w Item> {
        world
            .items()
            .iter()
            .filter(|i| self.is_here(&i.name))
            .collect()
    }

    /// Relocate an item.
    ///
    /// Moving a fixed item into the inventory violates the world's rules and
    /// fails without changing anything.
    pub fn move_item(&mut self, world: &World, item: &str, to: Location) -> CoreResult<()> {
        let item = world.require_item(item)?;
        if to == Location::Inventory && !item.portable {
            return Err(CoreError::NotPortable(item.name.clone()));
        }
        self.item_locations.insert(item.name.clone(), to);
        Ok(())
    }

    /// Put `a` out of play and `b` where `a` was, as one step.
    pub fn swap_items(&mut self, world: &World, a: &str, b: &str) -> CoreResult<()> {
        let first = world.require_item(a)?;
        let second = world.require_item(b)?;
        let prior = self.location_of(&first.name).clone();
        if prior == Location::Inventory && !second.portable {
            return Err(CoreError::NotPortable(second.name.clone()));
        }
        self.item_locations
            .insert(first.name.clone(), Location::Nowhere);
        self.item_locations.insert(second.name.clone(), prior);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Flags, counters, strings
    // -----------------------------------------------------------------------

    /// Whether a flag is set. Unknown flags are unset.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Set or clear a flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    /// Current counter value. Unknown counters are zero.
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Set a counter.
    pub fn set_counter(&mut self, name: impl Into<String>, value: i64) {
        self.counters.insert(name.into(), value);
    }

    /// Add one to a counter. Counters stop at `i64::MAX`.
    pub fn increment(&mut self, name: &str) {
        let counter = self.counters.entry(name.to_string()).or_insert(0);
        *counter = counter.saturating_add(1);
    }

    /// Subtract one from a counter. Counters stop at `i64::MIN`.
    pub fn decrement(&mut self, name: &str) {
        let counter = self.counters.entry(name.to_string()).or_insert(0);
        *counter = counter.saturating_sub(1);
    }

    /// Named string value, if set.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    /// Set a named string.
    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(name.into(), value.into());
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Whether the game is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// End the game. There is no way back.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Number of turns started so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Advance the turn counter and return the new turn number.
    pub fn begin_turn(&mut self) -> u64 {
        self.turns += 1;
        self.turns
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Serialize the state to JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a state from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
