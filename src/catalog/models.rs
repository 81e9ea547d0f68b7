use serde::{Deserialize, Serialize};

use crate::containers::models::{ContainerSize, SizeSchema};

pub struct CatalogAppData {
    pub schema: SizeSchema,
    pub known_images: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    pub value: ContainerSize,
    pub label: String,
    pub cpu: u32,
    pub memory: u32,
    pub memory_limit: u32,
}

impl SizeOption {
    pub fn new(size: ContainerSize, schema: SizeSchema) -> Self {
        SizeOption {
            value: size,
            label: schema.display(size.name()),
            cpu: size.cpu(),
            memory: size.memory(),
            memory_limit: size.memory_limit(),
        }
    }
}
