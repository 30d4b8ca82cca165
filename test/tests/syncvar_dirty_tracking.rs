/// Dirty tracking and sync interval gating of tracked fields.
///
/// A behaviour is "dirty" only when it has changed fields and its sync
/// interval has elapsed since the last flush.
use std::time::Duration;

use syncvar_shared::{ByteWriter, EntityId, GameInstant, SyncMode};
use syncvar_test::{assert_clean, assert_gated, protocol, Guild, MockPlayer, TestEntityBuilder, TestWorld};

fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

#[test]
fn setting_struct_marks_dirty() {
    init_logger();
    let protocol = protocol();
    let now = GameInstant::ORIGIN;
    let mut player = protocol.behaviour(MockPlayer::new()).unwrap();

    assert!(!player.is_dirty(&now), "First time object should not be dirty");

    *player.guild = Guild::new("Back street boys");
    assert!(player.is_dirty(&now), "Setting struct should mark object as dirty");

    player.clear_all_dirty_bits();
    assert!(!player.is_dirty(&now), "clear_all_dirty_bits() should clear dirty flag");

    // clearing the guild should set dirty bit too
    *player.guild = Guild::default();
    assert!(player.is_dirty(&now), "Clearing struct should mark object as dirty");
}

#[test]
fn writing_an_equal_value_still_marks_dirty() {
    let protocol = protocol();
    let now = GameInstant::ORIGIN;
    let mut first = protocol.behaviour(MockPlayer::new()).unwrap();
    let mut second = protocol.behaviour(MockPlayer::new()).unwrap();

    first.guild.set(Guild::new("Back street boys"));
    second.guild.set(Guild::new("Back street boys"));
    assert!(first.is_dirty(&now));
    assert!(second.is_dirty(&now));

    first.clear_all_dirty_bits();
    second.clear_all_dirty_bits();

    // set then cleared to default on one, untouched default on the other
    second.guild.set(Guild::default());
    assert!(!first.is_dirty(&now));
    assert!(second.is_dirty(&now));

    first.guild.set(Guild::new("Back street boys"));
    assert!(first.is_dirty(&now));
}

#[test]
fn sync_interval_and_clear_dirty_components() {
    init_logger();
    let protocol = protocol();
    let mut world = TestWorld::new();
    world.advance(Duration::from_secs(10));

    let mut entity = TestEntityBuilder::new(&protocol, EntityId::new(1))
        .with(MockPlayer::new())
        .build();

    {
        let player = entity.component_mut::<MockPlayer>(0).unwrap();
        player.set_last_sync(world.now());
        player.set_sync_interval(Duration::from_secs(1));
        player.guild.set(Guild::new("Back street boys"));
        assert!(!player.is_dirty(&world.now()), "Sync interval not met, so not dirty yet");
    }

    // nothing is cleared since the sync interval is not met
    entity.clear_dirty_components(&world.now());

    let player = entity.component_mut::<MockPlayer>(0).unwrap();
    let ready = world.now() - player.sync_interval();
    player.set_last_sync(ready);
    assert!(player.is_dirty(&world.now()), "Sync interval met, should be dirty");
}

#[test]
fn sync_interval_and_clear_all_components() {
    let protocol = protocol();
    let mut world = TestWorld::new();
    world.advance(Duration::from_secs(10));

    let mut entity = TestEntityBuilder::new(&protocol, EntityId::new(1))
        .with(MockPlayer::new())
        .build();

    {
        let player = entity.component_mut::<MockPlayer>(0).unwrap();
        player.set_last_sync(world.now());
        player.set_sync_interval(Duration::from_secs(1));
        player.guild.set(Guild::new("Back street boys"));
        assert!(!player.is_dirty(&world.now()), "Sync interval not met, so not dirty yet");
    }

    // clears even though the sync interval is not met
    entity.clear_all_components_dirty_bits();

    let player = entity.component_mut::<MockPlayer>(0).unwrap();
    let ready = world.now() - player.sync_interval();
    player.set_last_sync(ready);
    assert!(!player.is_dirty(&world.now()), "Sync interval met, should still not be dirty");
    assert_clean!(player);
}

#[test]
fn clear_if_interval_elapsed_is_gated() {
    let protocol = protocol();
    let mut world = TestWorld::new();
    let mut player = protocol.behaviour(MockPlayer::new()).unwrap();
    player.set_sync_interval(Duration::from_millis(250));

    player.guild.set(Guild::new("a"));
    assert!(!player.clear_dirty_if_interval_elapsed(&world.now()));
    assert_gated!(player, &world.now());

    world.advance(Duration::from_millis(250));
    assert!(player.clear_dirty_if_interval_elapsed(&world.now()));
    assert_clean!(player);
    assert_eq!(player.last_sync(), world.now());
}

#[test]
fn zero_interval_serializes_immediately() {
    let protocol = protocol();
    let now = GameInstant::from_millis(12);
    let mut player = protocol.behaviour(MockPlayer::new()).unwrap();
    assert_eq!(player.sync_interval(), Duration::ZERO);

    player.guild.set(Guild::new("x"));

    let mut writer = ByteWriter::new();
    assert!(player.serialize(&mut writer, SyncMode::Delta, &now));
    assert!(!writer.is_empty());
}

#[test]
fn one_second_interval_holds_back_the_delta() {
    let protocol = protocol();
    let mut world = TestWorld::new();
    let mut player = protocol.behaviour(MockPlayer::new()).unwrap();
    player.set_sync_interval(Duration::from_secs(1));

    player.guild.set(Guild::new("x"));

    let mut writer = ByteWriter::new();
    assert!(!player.serialize(&mut writer, SyncMode::Delta, &world.now()));
    assert!(writer.is_empty());

    world.advance(Duration::from_millis(999));
    assert!(!player.serialize(&mut writer, SyncMode::Delta, &world.now()));

    world.advance(Duration::from_millis(1));
    assert!(player.serialize(&mut writer, SyncMode::Delta, &world.now()));
    assert!(!writer.is_empty());
}

#[test]
fn flush_restarts_the_interval() {
    let protocol = protocol();
    let mut world = TestWorld::new();
    let mut player = protocol.behaviour(MockPlayer::new()).unwrap();
    player.set_sync_interval(Duration::from_secs(1));
    world.advance(Duration::from_secs(1));

    player.guild.set(Guild::new("first"));
    let mut writer = ByteWriter::new();
    assert!(player.flush(&mut writer, &world.now()));
    assert_clean!(player);

    world.advance(Duration::from_millis(500));
    player.guild.set(Guild::new("second"));
    writer.clear();
    assert!(!player.flush(&mut writer, &world.now()));
    assert_gated!(player, &world.now());

    world.advance(Duration::from_millis(500));
    assert!(player.flush(&mut writer, &world.now()));
}

#[test]
fn full_state_is_written_even_when_clean() {
    let protocol = protocol();
    let player = protocol.behaviour(MockPlayer::new()).unwrap();

    let mut writer = ByteWriter::new();
    assert!(player.serialize(&mut writer, SyncMode::Full, &GameInstant::ORIGIN));
    // empty guild name is a single zero length byte
    assert_eq!(writer.as_slice(), &[0]);
}
