use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{Command, World};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a save string file to load instead of generating fresh
    #[arg(short = 'l', long)]
    load: Option<String>,
    /// World seed when generating fresh
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 70)]
    width: usize,
    #[arg(long, default_value_t = 30)]
    height: usize,
    /// Key script to drive the avatar with (w/a/s/d/t, plus u to undo)
    #[arg(short, long, default_value = "")]
    commands: String,
    /// Write the resulting save string to this path
    #[arg(short, long)]
    out: Option<String>,
    /// Emit the visible grid as JSON instead of ASCII art
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut world = match &args.load {
        Some(path) => {
            let save = fs::read_to_string(path)
                .with_context(|| format!("Failed to read save file: {path}"))?;
            World::load(save.trim(), args.height, args.width)
                .map_err(|e| anyhow::anyhow!("Failed to load save string: {e}"))?
        }
        None => World::new(args.seed, args.height, args.width)
            .map_err(|e| anyhow::anyhow!("World generation failed: {e}"))?,
    };

    for key in args.commands.chars() {
        if key == 'u' {
            world.undo_move();
            continue;
        }
        let command = Command::from_key(key)
            .ok_or_else(|| anyhow::anyhow!("Unknown command key: {key:?}"))?;
        world.apply(command);
    }

    let view = world.view();
    if args.json {
        let rendered = serde_json::to_string(view.as_ref())
            .with_context(|| "Failed to serialize the visible grid")?;
        println!("{rendered}");
    } else {
        print!("{}", view.render());
    }

    println!("Avatar: ({}, {})", world.avatar().x, world.avatar().y);
    println!("Save String: {}", world.save_string());
    println!("Snapshot Hash: {}", world.snapshot_hash());

    if let Some(path) = &args.out {
        fs::write(path, world.save_string())
            .with_context(|| format!("Failed to write save file: {path}"))?;
    }

    Ok(())
}
