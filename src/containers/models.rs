use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type RecordId = Uuid;

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One extra (sidecar) container of a job configuration, exactly as it is carried
/// through the host form field.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    /// Kept verbatim, see [`ContainerSize::parse`] for how it is recognized.
    pub size: String,
    pub commands: Vec<String>,
    pub env_vars: Vec<EnvVar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: RecordId,
    pub spec: ContainerSpec,
}

/// Ordered list of extra containers. Records are addressed by their [`RecordId`],
/// positions are only looked up at the moment a mutation happens.
#[derive(Debug, Clone, Default)]
pub struct ContainerList {
    records: Vec<ContainerRecord>,
}

impl ContainerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: impl IntoIterator<Item = ContainerSpec>) -> Self {
        let mut list = Self::new();
        for spec in specs {
            list.push(spec);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ContainerRecord] {
        &self.records
    }

    pub fn specs(&self) -> Vec<ContainerSpec> {
        self.records.iter().map(|r| r.spec.clone()).collect()
    }

    pub fn get(&self, id: RecordId) -> Option<&ContainerSpec> {
        self.records.iter().find(|r| r.id == id).map(|r| &r.spec)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<RecordId> {
        self.records.get(index).map(|r| r.id)
    }

    pub fn push(&mut self, spec: ContainerSpec) -> RecordId {
        let id = Uuid::new_v4();
        self.records.push(ContainerRecord { id, spec });
        id
    }

    /// Hands the spec back when no record with `id` exists anymore.
    pub fn replace(&mut self, id: RecordId, spec: ContainerSpec) -> Result<(), ContainerSpec> {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.spec = spec;
                Ok(())
            }
            None => Err(spec),
        }
    }

    pub fn remove(&mut self, id: RecordId) -> Option<ContainerSpec> {
        self.position(id).map(|index| self.records.remove(index).spec)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContainerSize {
    Small,
    Regular,
    Large,
    XLarge,
    XXLarge,
}

impl ContainerSize {
    pub const ALL: [ContainerSize; 5] = [
        ContainerSize::Small,
        ContainerSize::Regular,
        ContainerSize::Large,
        ContainerSize::XLarge,
        ContainerSize::XXLarge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContainerSize::Small => "SMALL",
            ContainerSize::Regular => "REGULAR",
            ContainerSize::Large => "LARGE",
            ContainerSize::XLarge => "XLARGE",
            ContainerSize::XXLarge => "XXLARGE",
        }
    }

    /// Case-insensitive, `None` for values outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(value.trim()))
    }

    /// CPU shares reserved for an extra container of this size.
    pub fn cpu(&self) -> u32 {
        match self {
            ContainerSize::Small => 256,
            ContainerSize::Regular => 512,
            ContainerSize::Large => 1024,
            ContainerSize::XLarge => 2048,
            ContainerSize::XXLarge => 3072,
        }
    }

    /// Memory reservation in MB.
    pub fn memory(&self) -> u32 {
        match self {
            ContainerSize::Small => 1000,
            ContainerSize::Regular => 2000,
            ContainerSize::Large => 4000,
            ContainerSize::XLarge => 8000,
            ContainerSize::XXLarge => 12000,
        }
    }

    /// Hard memory limit, 1.25 times the reservation.
    pub fn memory_limit(&self) -> u32 {
        self.memory() * 5 / 4
    }
}

const LEGACY_SIZES: &[ContainerSize] = &[
    ContainerSize::Small,
    ContainerSize::Regular,
    ContainerSize::Large,
];

/// The size enumeration and its labels changed over time without the stored
/// payload ever carrying a version, so the label table is picked by configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeSchema {
    Legacy,
    #[default]
    Current,
}

impl SizeSchema {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" => Some(SizeSchema::Legacy),
            "current" => Some(SizeSchema::Current),
            _ => None,
        }
    }

    pub fn sizes(&self) -> &'static [ContainerSize] {
        match self {
            SizeSchema::Legacy => LEGACY_SIZES,
            SizeSchema::Current => &ContainerSize::ALL,
        }
    }

    pub fn label(&self, size: ContainerSize) -> Option<&'static str> {
        if !self.sizes().contains(&size) {
            return None;
        }
        Some(match (self, size) {
            (_, ContainerSize::Small) => "Small (~1G)",
            (_, ContainerSize::Regular) => "Regular (~2G)",
            (SizeSchema::Legacy, ContainerSize::Large) => "Large (~3G)",
            (SizeSchema::Current, ContainerSize::Large) => "Large (~4G)",
            (_, ContainerSize::XLarge) => "X Large (~8G)",
            (_, ContainerSize::XXLarge) => "XX Large (~12G)",
        })
    }

    /// Label for a stored size value, or the value itself when this schema
    /// doesn't know it.
    pub fn display(&self, stored: &str) -> String {
        ContainerSize::parse(stored)
            .and_then(|size| self.label(size))
            .map(str::to_string)
            .unwrap_or_else(|| stored.to_string())
    }
}

/// Parse-ability of a host field value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldReport {
    Empty,
    NotJson { error: String },
    NotArray,
    Ok { records: usize, skipped: usize },
}
