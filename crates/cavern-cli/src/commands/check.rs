use std::path::Path;

pub fn run(path: &Path) -> Result<(), String> {
    let adventure = super::compile_file(path)?;
    let world = adventure.world();

    println!("  All checks passed for '{}'.", path.display());
    println!(
        "  {} rooms, {} items, {} actions, {} occurs, {} words",
        world.rooms().len(),
        world.items().len(),
        adventure.actions().len(),
        adventure.occurs().len(),
        adventure.vocabulary().len(),
    );

    Ok(())
}
