use std::collections::HashMap;

use crate::ast::{Declaration, Script, Span};
use crate::diagnostics::Diagnostic;

/// A declared room or item name.
#[derive(Debug, Clone)]
pub struct Declared {
    /// The name as written in its declaration.
    pub name: String,
    /// Span of the name in the declaration.
    pub span: Span,
}

/// Name index for rooms and items.
///
/// The resolver pre-scans every declaration before anything is compiled, so
/// exits, placements, and rules may refer to rooms and items declared later
/// in the file. Names are case-insensitive. It also records, for each item,
/// the nearest room declared before it, which is where the item starts unless
/// it says otherwise.
pub struct Resolver {
    rooms: HashMap<String, Declared>,
    items: HashMap<String, Declared>,
    preceding_room: HashMap<String, String>,
    first_room: Option<String>,
    /// Duplicate declarations found during the scan.
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolver {
    /// Scan all declarations of a script.
    pub fn resolve(script: &Script) -> Self {
        let mut resolver = Self {
            rooms: HashMap::new(),
            items: HashMap::new(),
            preceding_room: HashMap::new(),
            first_room: None,
            diagnostics: Vec::new(),
        };
        let mut last_room: Option<String> = None;

        for decl in &script.declarations {
            match &decl.node {
                Declaration::Room(room) => {
                    let name = &room.name;
                    if resolver.declare_room(&name.node, name.span.clone()) {
                        resolver.first_room.get_or_insert_with(|| name.node.clone());
                        last_room = Some(name.node.clone());
                    }
                }
                Declaration::Item(item) => {
                    let name = &item.name;
                    if resolver.declare_item(&name.node, name.span.clone()) {
                        if let Some(room) = &last_room {
                            resolver
                                .preceding_room
                                .insert(name.node.to_lowercase(), room.clone());
                        }
                    }
                }
                _ => {}
            }
        }

        resolver
    }

    fn declare_room(&mut self, name: &str, span: Span) -> bool {
        Self::declare(&mut self.rooms, &mut self.diagnostics, "room", name, span)
    }

    fn declare_item(&mut self, name: &str, span: Span) -> bool {
        Self::declare(&mut self.items, &mut self.diagnostics, "item", name, span)
    }

    fn declare(
        names: &mut HashMap<String, Declared>,
        diagnostics: &mut Vec<Diagnostic>,
        kind: &str,
        name: &str,
        span: Span,
    ) -> bool {
        let key = name.to_lowercase();
        if let Some(existing) = names.get(&key) {
            diagnostics.push(
                Diagnostic::error(span, format!("duplicate {kind}: \"{name}\""))
                    .with_label(format!("first declared at offset {}", existing.span.start)),
            );
            return false;
        }
        names.insert(
            key,
            Declared {
                name: name.to_string(),
                span,
            },
        );
        true
    }

    /// Look up a room by name.
    pub fn room(&self, name: &str) -> Option<&Declared> {
        self.rooms.get(&name.to_lowercase())
    }

    /// Look up an item by name.
    pub fn item(&self, name: &str) -> Option<&Declared> {
        self.items.get(&name.to_lowercase())
    }

    /// Whether the declaration at `span` is the one that owns its room name.
    pub fn is_canonical_room(&self, name: &str, span: &Span) -> bool {
        self.room(name).is_some_and(|d| d.span == *span)
    }

    /// Whether the declaration at `span` is the one that owns its item name.
    pub fn is_canonical_item(&self, name: &str, span: &Span) -> bool {
        self.item(name).is_some_and(|d| d.span == *span)
    }

    /// The room declared most recently before the item, if any.
    pub fn preceding_room(&self, item: &str) -> Option<&str> {
        self.preceding_room
            .get(&item.to_lowercase())
            .map(String::as_str)
    }

    /// The first room in source order.
    pub fn first_room(&self) -> Option<&str> {
        self.first_room.as_deref()
    }
}
