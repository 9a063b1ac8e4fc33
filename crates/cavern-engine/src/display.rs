use cavern_core::{Item, Room};

/// Output boundary of the engine.
///
/// The engine never formats room or inventory listings itself; it hands the
/// raw room and items to the display and lets it decide.
pub trait Display {
    /// Emit text exactly as given (messages carry their own newlines).
    fn print(&mut self, message: &str);

    /// Describe a room and the items lying in it.
    fn look(&mut self, room: &Room, items: &[&Item]);

    /// List the items the player carries.
    fn inventory(&mut self, items: &[&Item]);
}

/// Plain-text room description: name, description, items, exits.
pub fn render_room(room: &Room, items: &[&Item]) -> String {
    let mut out = format!("{}\n{}\n", room.name, room.description);
    if !items.is_empty() {
        out.push_str("You can see:\n");
        for item in items {
            out.push_str(&format!("  {}\n", item.description));
        }
    }
    let exits: Vec<String> = room
        .exits
        .iter()
        .filter(|e| !e.target.eq_ignore_ascii_case(&room.name))
        .map(|e| e.direction.name().to_lowercase())
        .collect();
    if !exits.is_empty() {
        out.push_str(&format!("Exits: {}\n", exits.join(", ")));
    }
    out
}

/// Plain-text inventory listing.
pub fn render_inventory(items: &[&Item]) -> String {
    if items.is_empty() {
        return "You are carrying nothing.\n".to_string();
    }
    let mut out = String::from("You are carrying:\n");
    for item in items {
        out.push_str(&format!("  {}\n", item.description));
    }
    out
}

/// A display that collects everything into a string buffer.
#[derive(Debug, Clone, Default)]
pub struct TextDisplay {
    output: String,
}

impl TextDisplay {
    /// Create an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the buffered text, leaving the display empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Display for TextDisplay {
    fn print(&mut self, message: &str) {
        self.output.push_str(message);
    }

    fn look(&mut self, room: &Room, items: &[&Item]) {
        self.output.push_str(&render_room(room, items));
    }

    fn inventory(&mut self, items: &[&Item]) {
        self.output.push_str(&render_inventory(items));
    }
}
