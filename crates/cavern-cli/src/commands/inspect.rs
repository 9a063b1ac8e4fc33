use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path) -> Result<(), String> {
    let adventure = super::compile_file(path)?;
    let world = adventure.world();

    println!("{}", "Rooms".bold());
    let mut rooms = Table::new();
    rooms.set_content_arrangement(ContentArrangement::Dynamic);
    rooms.set_header(vec!["Name", "Description", "Exits"]);
    for room in world.rooms() {
        let exits: Vec<String> = room
            .exits
            .iter()
            .map(|e| format!("{} -> {}", e.direction.name().to_lowercase(), e.target))
            .collect();
        let start = if room.name == adventure.start_room() {
            format!("{} (start)", room.name)
        } else {
            room.name.clone()
        };
        rooms.add_row(vec![start, truncate(&room.description), exits.join(", ")]);
    }
    println!("{rooms}");
    println!();

    if !world.items().is_empty() {
        println!("{}", "Items".bold());
        let mut items = Table::new();
        items.set_content_arrangement(ContentArrangement::Dynamic);
        items.set_header(vec!["Name", "Description", "Starts in", "Portable", "Aliases"]);
        for item in world.items() {
            items.add_row(vec![
                item.name.clone(),
                truncate(&item.description),
                item.starting_location.to_string(),
                if item.portable { "yes" } else { "no" }.to_string(),
                item.aliases.join(", "),
            ]);
        }
        println!("{items}");
        println!();
    }

    let words: Vec<&str> = adventure.vocabulary().iter().map(|w| w.name()).collect();
    println!("  Vocabulary: {}", words.join(", "));
    println!(
        "  {} actions, {} occurs",
        adventure.actions().len(),
        adventure.occurs().len()
    );

    Ok(())
}

fn truncate(text: &str) -> String {
    if text.chars().count() > 60 {
        let head: String = text.chars().take(57).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
