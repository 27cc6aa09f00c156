//! Save-string codec and deterministic replay.
//!
//! The format is `n<seed>s<moves>`: a literal `n`, the decimal generation
//! seed, a literal `s`, then the accepted command characters in acceptance
//! order. Loading regenerates the world from the seed and replays each
//! character through the entry point it represents, so the loaded state
//! matches the saved one, sight toggles included.

use serde::{Deserialize, Serialize};

use crate::types::{Command, LoadError};
use crate::world::World;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub seed: u64,
    pub commands: Vec<Command>,
}

impl SaveData {
    pub fn encode(&self) -> String {
        encode(self.seed, &self.commands)
    }
}

pub fn encode(seed: u64, commands: &[Command]) -> String {
    let mut out = format!("n{seed}s");
    out.extend(commands.iter().map(|command| command.key()));
    out
}

/// Parse a save string. Command characters are expected in lowercase, as
/// written by [`encode`]; anything outside the alphabet is an error rather
/// than being silently skipped.
pub fn parse(input: &str) -> Result<SaveData, LoadError> {
    let rest = input.strip_prefix('n').ok_or(LoadError::MissingPrefix)?;
    let delimiter = rest.find('s').ok_or(LoadError::MissingSeedDelimiter)?;
    let seed: u64 = rest[..delimiter].parse().map_err(|_| LoadError::InvalidSeed)?;

    let mut commands = Vec::new();
    for key in rest[delimiter + 1..].chars() {
        commands.push(Command::from_key(key).ok_or(LoadError::UnknownCommand(key))?);
    }
    Ok(SaveData { seed, commands })
}

/// Regenerate the recorded world and replay its move log as a sequential
/// fold over the fresh world.
pub fn load(input: &str, height: usize, width: usize) -> Result<World, LoadError> {
    let data = parse(input)?;
    let mut world = World::new(data.seed, height, width)?;
    for command in data.commands {
        world.apply(command);
    }
    Ok(world)
}
