/// Minimal test protocol for replication tests
use syncvar_shared::{
    ByteReader, ByteWrite, ComponentProperty, EntityProperty, Property, Protocol, ReplicaSchema,
    Replicate, ReplicatedField, Serde, SerdeErr,
};

/// A plain record held by value in a tracked field
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Guild {
    pub name: String,
}

impl Guild {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Serde for Guild {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.name.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            name: String::de(reader)?,
        })
    }

    fn byte_length(&self) -> u32 {
        self.name.byte_length()
    }
}

pub struct MockPlayer {
    pub guild: Property<Guild>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self {
            guild: Property::new(Guild::default()),
        }
    }
}

impl Default for MockPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replicate for MockPlayer {
    fn schema() -> ReplicaSchema {
        ReplicaSchema::builder("MockPlayer")
            .value::<Guild>("guild")
            .build()
    }

    fn fields(&self) -> Vec<&dyn ReplicatedField> {
        vec![&self.guild]
    }

    fn fields_mut(&mut self) -> Vec<&mut dyn ReplicatedField> {
        vec![&mut self.guild]
    }
}

/// Holds a reference to another networked entity
#[derive(Default)]
pub struct EntityLink {
    pub value: EntityProperty,
}

impl Replicate for EntityLink {
    fn schema() -> ReplicaSchema {
        ReplicaSchema::builder("EntityLink").entity("value").build()
    }

    fn fields(&self) -> Vec<&dyn ReplicatedField> {
        vec![&self.value]
    }

    fn fields_mut(&mut self) -> Vec<&mut dyn ReplicatedField> {
        vec![&mut self.value]
    }
}

/// Holds a reference to one behaviour of another networked entity
#[derive(Default)]
pub struct BehaviourLink {
    pub value: ComponentProperty,
}

impl Replicate for BehaviourLink {
    fn schema() -> ReplicaSchema {
        ReplicaSchema::builder("BehaviourLink")
            .component("value")
            .build()
    }

    fn fields(&self) -> Vec<&dyn ReplicatedField> {
        vec![&self.value]
    }

    fn fields_mut(&mut self) -> Vec<&mut dyn ReplicatedField> {
        vec![&mut self.value]
    }
}

/// A mix of every field kind, in a fixed order
pub struct Loadout {
    pub health: Property<u16>,
    pub speed: Property<f32>,
    pub title: Property<String>,
    pub target: EntityProperty,
    pub weapon: ComponentProperty,
    pub inventory: Property<Vec<u32>>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            health: Property::new(100),
            speed: Property::new(1.0),
            title: Property::new(String::new()),
            target: EntityProperty::new(),
            weapon: ComponentProperty::new(),
            inventory: Property::new(Vec::new()),
        }
    }
}

impl Replicate for Loadout {
    fn schema() -> ReplicaSchema {
        ReplicaSchema::builder("Loadout")
            .value::<u16>("health")
            .value::<f32>("speed")
            .value::<String>("title")
            .entity("target")
            .component("weapon")
            .value::<Vec<u32>>("inventory")
            .build()
    }

    fn fields(&self) -> Vec<&dyn ReplicatedField> {
        vec![
            &self.health,
            &self.speed,
            &self.title,
            &self.target,
            &self.weapon,
            &self.inventory,
        ]
    }

    fn fields_mut(&mut self) -> Vec<&mut dyn ReplicatedField> {
        vec![
            &mut self.health,
            &mut self.speed,
            &mut self.title,
            &mut self.target,
            &mut self.weapon,
            &mut self.inventory,
        ]
    }
}

/// Every test component registered, behaviours flushing on every tick
pub fn protocol() -> Protocol {
    Protocol::builder()
        .sync_interval(std::time::Duration::ZERO)
        .add_component::<MockPlayer>()
        .add_component::<EntityLink>()
        .add_component::<BehaviourLink>()
        .add_component::<Loadout>()
        .build()
}
