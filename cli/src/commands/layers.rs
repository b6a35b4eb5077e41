use std::collections::BTreeSet;

use anyhow::Result;
use planchers::{classify, display_name, read_floor_file, DrawingState, FloorFile};

fn layers(floor: &FloorFile, state: DrawingState) -> BTreeSet<&str> {
    let records = match state {
        DrawingState::Existing => &floor.existing,
        DrawingState::Project => &floor.project,
    };
    records.iter().map(|r| r.layer.as_str()).collect()
}

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::LayersArgs) -> Result<()> {
    let floor = read_floor_file(&args.floor)?;

    for state in DrawingState::order() {
        println!("[{state}]");
        for layer in layers(&floor, state) {
            let (role, destination) = classify(layer);
            match destination {
                Some(key) => println!("  {layer:<48} {role:<18} {key} ({})", display_name(&key)),
                None => println!("  {layer:<48} {role}"),
            }
        }
    }

    Ok(())
}
