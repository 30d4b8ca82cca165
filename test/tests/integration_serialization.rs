/// Integration tests for whole-entity serialization: every behaviour of a
/// networked entity written into one message and applied on the client.
use std::time::Duration;

use syncvar_shared::{ByteReader, ByteWriter, ComponentRef, EntityId, Protocol, SyncMode};
use syncvar_test::{
    protocol, sync_entity_to_client, EntityLink, Guild, Loadout, MockPlayer, TestEntityBuilder,
    TestWorld,
};

fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

#[test]
fn synchronizing_objects() {
    init_logger();
    let protocol = protocol();
    let world = TestWorld::new();

    // set up a "server" object
    let mut player1 = MockPlayer::new();
    player1.guild.set(Guild::new("Back street boys"));
    let mut identity1 = TestEntityBuilder::new(&protocol, EntityId::new(1))
        .with(player1)
        .build();

    // serialize all the data as we would for the network
    let mut writer = ByteWriter::new();
    assert!(identity1.serialize_all(&mut writer, SyncMode::Full, &world.now()));

    // set up a "client" object
    let mut identity2 = TestEntityBuilder::new(&protocol, EntityId::new(1))
        .with(MockPlayer::new())
        .build();

    // apply all the data from the server object
    let bytes = writer.to_bytes();
    let mut reader = ByteReader::new(&bytes);
    identity2
        .deserialize_all(&mut reader, SyncMode::Full, &world.registry)
        .unwrap();

    // check that the syncvars got updated
    let player2 = identity2.component::<MockPlayer>(0).unwrap();
    assert_eq!(player2.guild.name, "Back street boys", "Data should be synchronized");
    assert!(reader.is_exhausted());
}

fn loadout_entity(protocol: &Protocol) -> syncvar_shared::SyncEntity {
    TestEntityBuilder::new(protocol, EntityId::new(10))
        .with(MockPlayer::new())
        .with(Loadout::default())
        .with(EntityLink::default())
        .build()
}

fn steady_state_ticks(protocol: &Protocol) {
    let mut world = TestWorld::new();
    world.spawn(EntityId::new(10), 3).unwrap();
    world.spawn(EntityId::new(11), 1).unwrap();

    let mut server = loadout_entity(protocol);
    let mut client = loadout_entity(protocol);

    // first contact
    assert!(sync_entity_to_client(
        &mut server,
        &mut client,
        SyncMode::Full,
        &world.now(),
        &world.registry,
    ));

    // tick 1: two fields of the loadout change
    world.advance(Duration::from_millis(50));
    {
        let loadout = server.component_mut::<Loadout>(1).unwrap();
        *loadout.health = 75;
        loadout.weapon.set(Some(ComponentRef::new(EntityId::new(10), 0)));
    }
    assert!(sync_entity_to_client(
        &mut server,
        &mut client,
        SyncMode::Delta,
        &world.now(),
        &world.registry,
    ));
    assert!(!server.is_dirty(&world.now()));

    // tick 2: nothing changed
    world.advance(Duration::from_millis(50));
    assert!(!sync_entity_to_client(
        &mut server,
        &mut client,
        SyncMode::Delta,
        &world.now(),
        &world.registry,
    ));

    // tick 3: a different behaviour changes
    world.advance(Duration::from_millis(50));
    server
        .component_mut::<EntityLink>(2)
        .unwrap()
        .value
        .set(EntityId::new(11));
    server
        .component_mut::<Loadout>(1)
        .unwrap()
        .inventory
        .push(4);
    assert!(sync_entity_to_client(
        &mut server,
        &mut client,
        SyncMode::Delta,
        &world.now(),
        &world.registry,
    ));

    let loadout = client.component::<Loadout>(1).unwrap();
    assert_eq!(*loadout.health, 75);
    assert_eq!(*loadout.speed, 1.0);
    assert_eq!(*loadout.inventory, vec![4]);
    assert_eq!(
        loadout.weapon.get(),
        Some(ComponentRef::new(EntityId::new(10), 0))
    );
    assert_eq!(
        client.component::<EntityLink>(2).unwrap().value.get(),
        Some(EntityId::new(11))
    );
    assert!(!client.is_dirty(&world.now()));
}

#[test]
fn steady_state_with_length_prefixes() {
    steady_state_ticks(&protocol());
}

#[test]
fn steady_state_without_length_prefixes() {
    let mut protocol = protocol();
    protocol.verify_lengths(false);
    steady_state_ticks(&protocol);
}

#[test]
fn gated_behaviour_is_left_out_of_the_delta() {
    let protocol = protocol();
    let mut world = TestWorld::new();

    let mut server = loadout_entity(&protocol);
    let mut client = loadout_entity(&protocol);
    server
        .component_mut::<MockPlayer>(0)
        .unwrap()
        .set_sync_interval(Duration::from_secs(1));

    server
        .component_mut::<MockPlayer>(0)
        .unwrap()
        .guild
        .set(Guild::new("later"));
    *server.component_mut::<Loadout>(1).unwrap().health = 1;

    world.advance(Duration::from_millis(100));
    assert!(sync_entity_to_client(
        &mut server,
        &mut client,
        SyncMode::Delta,
        &world.now(),
        &world.registry,
    ));
    assert_eq!(*client.component::<Loadout>(1).unwrap().health, 1);
    assert_eq!(client.component::<MockPlayer>(0).unwrap().guild.name, "");

    world.advance(Duration::from_millis(900));
    assert!(sync_entity_to_client(
        &mut server,
        &mut client,
        SyncMode::Delta,
        &world.now(),
        &world.registry,
    ));
    assert_eq!(client.component::<MockPlayer>(0).unwrap().guild.name, "later");
}

#[test]
fn truncated_message_is_not_partially_applied() {
    init_logger();
    let protocol = protocol();
    let world = TestWorld::new();

    let mut server = protocol.behaviour(Loadout::default()).unwrap();
    *server.health = 7;
    server.title.set("captain".to_string());
    let mut writer = ByteWriter::new();
    assert!(server.serialize(&mut writer, SyncMode::Full, &world.now()));
    let bytes = writer.to_bytes();

    let mut client = protocol.behaviour(Loadout::default()).unwrap();
    let err = client
        .deserialize_message(&bytes[..8], SyncMode::Full, &world.registry)
        .unwrap_err();
    assert!(err.is_underrun());
    assert_eq!(*client.health, 100);
    assert_eq!(*client.title, "");

    // the intact message still applies afterwards
    client
        .deserialize_message(&bytes, SyncMode::Full, &world.registry)
        .unwrap();
    assert_eq!(*client.health, 7);
    assert_eq!(*client.title, "captain");
}

#[test]
fn truncated_entity_message_is_not_partially_applied() {
    init_logger();
    let protocol = protocol();
    let world = TestWorld::new();

    let mut first = MockPlayer::new();
    first.guild.set(Guild::new("a"));
    let mut second = MockPlayer::new();
    second.guild.set(Guild::new("b"));
    let mut server = TestEntityBuilder::new(&protocol, EntityId::new(1))
        .with(first)
        .with(second)
        .build();
    let mut client = TestEntityBuilder::new(&protocol, EntityId::new(1))
        .with(MockPlayer::new())
        .with(MockPlayer::new())
        .build();

    let mut writer = ByteWriter::new();
    assert!(server.serialize_all(&mut writer, SyncMode::Full, &world.now()));
    let bytes = writer.to_bytes();

    let mut reader = ByteReader::new(&bytes[..bytes.len() - 1]);
    let err = client
        .deserialize_all(&mut reader, SyncMode::Full, &world.registry)
        .unwrap_err();
    assert!(err.is_underrun());
    for index in 0..2 {
        assert_eq!(
            client.component::<MockPlayer>(index).unwrap().guild.name,
            "",
            "component {} should be untouched",
            index
        );
    }
}
