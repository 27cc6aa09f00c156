use anyhow::Result;
use clap::Parser;
use dungeon_core::{Command, Direction, Tile, World};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 1000)]
    steps: u32,
    #[arg(long, default_value_t = 70)]
    width: usize,
    #[arg(long, default_value_t = 30)]
    height: usize,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} steps...", args.seed, args.steps);
    let mut world = World::new(args.seed, args.height, args.width)
        .map_err(|e| anyhow::anyhow!("World generation failed: {e}"))?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let directions =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    for _ in 0..args.steps {
        match rng.next_u64() % 10 {
            // Bias heavily toward movement
            0..=6 => {
                world.move_avatar(choose(&mut rng, &directions));
            }
            7 => world.toggle_sight_limit(),
            _ => world.undo_move(),
        }

        // Assert invariants
        let avatar = world.avatar();
        assert!(
            world.grid().tile_at(avatar) == Tile::Avatar,
            "Invariant failed: avatar cell is not marked"
        );
        let avatars = (0..args.height as i32)
            .flat_map(|y| {
                (0..args.width as i32).map(move |x| dungeon_core::Pos { x, y })
            })
            .filter(|&p| world.grid().tile_at(p) == Tile::Avatar)
            .count();
        assert!(avatars == 1, "Invariant failed: {avatars} avatar tiles");
        for command in world.move_log() {
            assert!(
                Command::from_key(command.key()) == Some(*command),
                "Invariant failed: unreplayable command in the log"
            );
        }
    }

    let save = world.save_string();
    let replayed = World::load(&save, args.height, args.width)
        .map_err(|e| anyhow::anyhow!("Replay of own save string failed: {e}"))?;
    assert!(
        replayed.avatar() == world.avatar(),
        "Invariant failed: replay diverged on avatar position"
    );
    assert!(
        replayed.snapshot_hash() == world.snapshot_hash(),
        "Invariant failed: replay diverged on snapshot hash"
    );

    println!("Fuzzing completed successfully.");
    Ok(())
}
