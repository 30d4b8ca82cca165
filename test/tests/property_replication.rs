/// PROPERTY-BASED TESTS: replication laws
///
/// Uses proptest to verify, across random field values and random sets of
/// writes:
/// 1. Round trip: the client ends with exactly the server's field values
/// 2. Byte length: decoding consumes exactly the bytes encoding produced
///    (asserted inside `sync_to_client`)
/// 3. Delta messages leave unwritten fields untouched
use proptest::prelude::*;
use syncvar_shared::{
    ComponentRef, EntityId, EntityRegistry, GameInstant, Serde, SyncBehaviour, SyncMode,
};
use syncvar_test::{protocol, sync_to_client, Loadout};

const SPAWNED: u32 = 50;

#[derive(Clone, Debug)]
struct LoadoutValues {
    health: u16,
    speed: f32,
    title: String,
    target: Option<u32>,
    weapon: Option<(u32, u8)>,
    inventory: Vec<u32>,
}

// Strategy for generating field values whose references all resolve
fn values_strategy() -> impl Strategy<Value = LoadoutValues> {
    (
        any::<u16>(),
        -1000.0f32..1000.0f32,
        "[a-zA-Z ]{0,24}",
        proptest::option::of(1u32..=SPAWNED),
        proptest::option::of((1u32..=SPAWNED, 0u8..4)),
        prop::collection::vec(any::<u32>(), 0..16),
    )
        .prop_map(
            |(health, speed, title, target, weapon, inventory)| LoadoutValues {
                health,
                speed,
                title,
                target,
                weapon,
                inventory,
            },
        )
}

fn registry() -> EntityRegistry<u32> {
    let mut registry = EntityRegistry::new();
    for id in 1..=SPAWNED {
        registry.spawn(EntityId::new(id), id, 4).unwrap();
    }
    registry
}

fn apply(values: &LoadoutValues, writes: &[bool], loadout: &mut SyncBehaviour<Loadout>) {
    if writes[0] {
        *loadout.health = values.health;
    }
    if writes[1] {
        *loadout.speed = values.speed;
    }
    if writes[2] {
        loadout.title.set(values.title.clone());
    }
    if writes[3] {
        match values.target {
            Some(id) => loadout.target.set(EntityId::new(id)),
            None => loadout.target.set_to_none(),
        }
    }
    if writes[4] {
        loadout.weapon.set(
            values
                .weapon
                .map(|(id, index)| ComponentRef::new(EntityId::new(id), index)),
        );
    }
    if writes[5] {
        loadout.inventory.set(values.inventory.clone());
    }
}

fn assert_same_fields(server: &Loadout, client: &Loadout) -> Result<(), TestCaseError> {
    prop_assert_eq!(*server.health, *client.health);
    prop_assert_eq!(*server.speed, *client.speed);
    prop_assert_eq!(&*server.title, &*client.title);
    prop_assert_eq!(server.target.get(), client.target.get());
    prop_assert_eq!(server.weapon.get(), client.weapon.get());
    prop_assert_eq!(&*server.inventory, &*client.inventory);
    Ok(())
}

proptest! {
    /// A full message reproduces every field on a fresh client
    #[test]
    fn prop_full_round_trip(values in values_strategy()) {
        let protocol = protocol();
        let registry = registry();
        let mut server = protocol.behaviour(Loadout::default()).unwrap();
        let mut client = protocol.behaviour(Loadout::default()).unwrap();

        apply(&values, &[true; 6], &mut server);

        let written = sync_to_client(&server, &mut client, SyncMode::Full, &GameInstant::ORIGIN, &registry);
        prop_assert!(written);
        assert_same_fields(&server, &client)?;
        prop_assert!(!client.has_dirty_bits());
    }

    /// A delta carries exactly the written fields
    #[test]
    fn prop_delta_round_trip(
        values in values_strategy(),
        writes in prop::collection::vec(any::<bool>(), 6),
    ) {
        let protocol = protocol();
        let registry = registry();
        let mut server = protocol.behaviour(Loadout::default()).unwrap();
        let mut client = protocol.behaviour(Loadout::default()).unwrap();

        apply(&values, &writes, &mut server);

        let written = sync_to_client(&server, &mut client, SyncMode::Delta, &GameInstant::ORIGIN, &registry);
        prop_assert_eq!(written, writes.iter().any(|write| *write));

        // unwritten fields are still defaults on both sides
        assert_same_fields(&server, &client)?;
        if !writes[0] {
            prop_assert_eq!(*client.health, 100);
        }
        if !writes[5] {
            prop_assert!(client.inventory.is_empty());
        }
    }

    /// Repeated deltas converge to the server's state
    #[test]
    fn prop_delta_sequence_converges(
        steps in prop::collection::vec(
            (values_strategy(), prop::collection::vec(any::<bool>(), 6)),
            1..8
        )
    ) {
        let protocol = protocol();
        let registry = registry();
        let mut server = protocol.behaviour(Loadout::default()).unwrap();
        let mut client = protocol.behaviour(Loadout::default()).unwrap();

        for (values, writes) in &steps {
            apply(values, writes, &mut server);
            sync_to_client(&server, &mut client, SyncMode::Delta, &GameInstant::ORIGIN, &registry);
            server.clear_all_dirty_bits();
            assert_same_fields(&server, &client)?;
        }
    }

    /// Value encodings report the length they actually write
    #[test]
    fn prop_value_byte_length(values in values_strategy()) {
        let mut writer = syncvar_shared::ByteWriter::new();
        values.title.ser(&mut writer);
        values.inventory.ser(&mut writer);
        values.health.ser(&mut writer);

        let expected = values.title.byte_length()
            + values.inventory.byte_length()
            + values.health.byte_length();
        prop_assert_eq!(writer.length() as u32, expected);
    }
}
