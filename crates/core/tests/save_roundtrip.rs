use dungeon_core::{Command, Direction, World};

fn walk(world: &mut World, steps: usize) {
    // Try each direction in turn so at least some moves land on floor.
    let directions = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];
    for i in 0..steps {
        world.move_avatar(directions[i % directions.len()]);
    }
}

#[test]
fn save_then_load_reproduces_the_session() {
    let mut original = World::new(555, 30, 70).expect("generation");
    walk(&mut original, 12);
    original.toggle_sight_limit();

    let save = original.save_string();
    let restored = World::load(&save, 30, 70).expect("load");

    assert_eq!(restored.avatar(), original.avatar());
    assert_eq!(restored.sight_limit(), original.sight_limit());
    assert_eq!(restored.snapshot_hash(), original.snapshot_hash());
}

#[test]
fn reloaded_save_string_is_stable() {
    let mut original = World::new(31_337, 30, 70).expect("generation");
    walk(&mut original, 8);

    let first = original.save_string();
    let restored = World::load(&first, 30, 70).expect("load");
    let second = restored.save_string();

    // Without undos the log survives a round trip verbatim.
    assert_eq!(first, second);
}

#[test]
fn undone_moves_never_reach_the_save_string() {
    let mut original = World::new(99, 30, 70).expect("generation");
    walk(&mut original, 6);
    let log_len = original.move_log().len();
    original.undo_move();
    assert!(original.move_log().len() <= log_len);

    let save = original.save_string();
    assert!(!save.contains('u'));

    let restored = World::load(&save, 30, 70).expect("load");
    assert_eq!(restored.avatar(), original.avatar());
    assert_eq!(restored.snapshot_hash(), original.snapshot_hash());
}

#[test]
fn toggles_are_replayed_from_the_log() {
    let mut original = World::new(7, 30, 70).expect("generation");
    original.toggle_sight_limit();
    walk(&mut original, 4);
    original.toggle_sight_limit();
    original.toggle_sight_limit();

    let save = original.save_string();
    assert_eq!(save.matches('t').count(), 3);

    let restored = World::load(&save, 30, 70).expect("load");
    assert!(restored.sight_limit());
    assert_eq!(restored.move_log().to_vec(), original.move_log().to_vec());
}

#[test]
fn loading_the_same_save_string_twice_yields_identical_worlds() {
    let first = World::load("n42s", 30, 70).expect("load");
    let second = World::load("n42s", 30, 70).expect("load");

    assert_eq!(first.grid(), second.grid());
    assert_eq!(first.avatar(), second.avatar());
    assert_eq!(first.snapshot_hash(), second.snapshot_hash());
}

#[test]
fn save_string_starts_with_the_seed_header() {
    let mut world = World::new(604, 30, 70).expect("generation");
    world.apply(Command::ToggleSight);

    let save = world.save_string();
    assert!(save.starts_with("n604s"));
}
