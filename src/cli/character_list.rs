use std::error::Error;
use std::io::Write;

use crate::core::characters::CharacterRegistry;
use crate::core::config::{path_display, Config};

pub fn list_characters<W: Write>(
    registry: &CharacterRegistry,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    writeln!(out, "Available characters:\n")?;
    let width = registry
        .all()
        .iter()
        .map(|c| c.id.len())
        .max()
        .unwrap_or(0);
    for character in registry.all() {
        writeln!(
            out,
            "  • {:<width$}  {} - {}",
            character.id, character.name, character.role
        )?;
    }

    writeln!(out, "\n💡 Start a conversation with:")?;
    writeln!(out, "   parley duet <first> <second>")?;
    writeln!(out, "   parley talk <character> <message>")?;
    if let Ok(path) = Config::get_config_path() {
        writeln!(out, "\nCustom characters can be added in {}", path_display(path))?;
    }
    Ok(())
}
