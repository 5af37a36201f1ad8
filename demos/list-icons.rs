//! Dumps every named icon of a TrueType font as an SVG file.
//!
//! Usage: `list-icons font.ttf out/`

use std::path::PathBuf;

use fonticon::{Font, Icon};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = pico_args::Arguments::from_env();
    let font_path: PathBuf = args.free_from_str()?;
    let out_dir: PathBuf = args.free_from_str()?;

    let font_data = std::fs::read(&font_path)?;
    let font = Font::open(&font_data)?;
    println!(
        "{}: {} glyphs",
        if font.family_name().is_empty() {
            "unnamed font"
        } else {
            font.family_name()
        },
        font.number_of_glyphs()
    );

    std::fs::create_dir_all(&out_dir)?;

    let mut icons: Vec<_> = font.codepoint_by_name().into_iter().collect();
    icons.sort();

    let mut written = 0;
    for (name, codepoint) in &icons {
        let icon = match Icon::new(&font, name, *codepoint)? {
            Some(icon) => icon,
            None => continue,
        };

        let svg = icon.to_svg_string();
        if svg.is_empty() {
            continue;
        }

        std::fs::write(out_dir.join(format!("{}.svg", name)), svg)?;
        written += 1;
    }

    println!("{} icons written to {}", written, out_dir.display());

    Ok(())
}
