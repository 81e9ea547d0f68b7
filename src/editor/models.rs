use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::containers::{
    models::{ContainerSize, ContainerSpec, EnvVar, RecordId, SizeSchema},
    serialization::TextField,
};

use super::core::ListEditor;

pub type RowId = Uuid;
pub type EditorId = Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(RecordId),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandRow {
    pub id: RowId,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvVarRow {
    pub id: RowId,
    pub name: String,
    pub value: String,
}

/// Pending values of the add/edit dialog. Command and environment variable rows
/// are addressed by their own handles, independent of the container list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DialogForm {
    pub name: String,
    pub image: String,
    pub size: String,
    pub commands: Vec<CommandRow>,
    pub env_vars: Vec<EnvVarRow>,
}

impl DialogForm {
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            image: String::new(),
            size: ContainerSize::Regular.name().to_string(),
            commands: Vec::new(),
            env_vars: Vec::new(),
        }
    }

    pub fn from_spec(spec: &ContainerSpec) -> Self {
        Self {
            name: spec.name.clone(),
            image: spec.image.clone(),
            size: spec.size.clone(),
            commands: spec
                .commands
                .iter()
                .map(|value| CommandRow {
                    id: Uuid::new_v4(),
                    value: value.clone(),
                })
                .collect(),
            env_vars: spec
                .env_vars
                .iter()
                .map(|env| EnvVarRow {
                    id: Uuid::new_v4(),
                    name: env.name.clone(),
                    value: env.value.clone(),
                })
                .collect(),
        }
    }

    pub fn to_spec(&self) -> ContainerSpec {
        ContainerSpec {
            name: self.name.clone(),
            image: self.image.clone(),
            size: self.size.clone(),
            commands: self.commands.iter().map(|row| row.value.clone()).collect(),
            env_vars: self
                .env_vars
                .iter()
                .map(|row| EnvVar::new(row.name.clone(), row.value.clone()))
                .collect(),
        }
    }

    pub fn add_command_row(&mut self) -> RowId {
        let id = Uuid::new_v4();
        self.commands.push(CommandRow {
            id,
            value: String::new(),
        });
        id
    }

    pub fn add_env_var_row(&mut self) -> RowId {
        let id = Uuid::new_v4();
        self.env_vars.push(EnvVarRow {
            id,
            name: String::new(),
            value: String::new(),
        });
        id
    }

    /// Removes the command or environment variable row with this handle.
    pub fn remove_row(&mut self, row: RowId) -> bool {
        let before = self.commands.len() + self.env_vars.len();
        self.commands.retain(|r| r.id != row);
        self.env_vars.retain(|r| r.id != row);
        before != self.commands.len() + self.env_vars.len()
    }

    /// Rows posted with a handle this dialog doesn't know are ignored.
    pub fn apply(&mut self, input: DialogInput) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(image) = input.image {
            self.image = image;
        }
        if let Some(size) = input.size {
            self.size = size;
        }
        for posted in input.commands {
            if let Some(row) = self.commands.iter_mut().find(|r| r.id == posted.id) {
                row.value = posted.value;
            }
        }
        for posted in input.env_vars {
            if let Some(row) = self.env_vars.iter_mut().find(|r| r.id == posted.id) {
                row.name = posted.name;
                row.value = posted.value;
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    pub mode: EditorMode,
    pub dialog: DialogForm,
}

/// `None` while the dialog is closed.
pub type EditorState = Option<EditorSession>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Committed {
    Created(RecordId),
    Updated(RecordId),
    /// The edited record was gone by the time of submit, the edit was appended.
    Appended(RecordId),
    Nothing,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DialogInput {
    pub name: Option<String>,
    pub image: Option<String>,
    pub size: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandRow>,
    #[serde(default)]
    pub env_vars: Vec<EnvVarRow>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FieldBody {
    pub field: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    pub id: RecordId,
    pub index: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EditorView {
    pub editor: EditorId,
    pub field: String,
    pub table: String,
    pub dialog: Option<String>,
    pub session: EditorState,
    pub records: Vec<RecordRef>,
}

pub struct OpenEditor {
    pub editor: ListEditor<TextField>,
    pub touched: Instant,
}

impl OpenEditor {
    pub fn new(editor: ListEditor<TextField>, now: Instant) -> Self {
        OpenEditor {
            editor,
            touched: now,
        }
    }
}

pub struct EditorsAppData {
    pub editors: Mutex<HashMap<EditorId, OpenEditor>>,
    pub schema: SizeSchema,
    pub known_images: Vec<String>,
    pub idle: Duration,
    pub max_editors: usize,
}

impl EditorsAppData {
    pub fn new(schema: SizeSchema, known_images: Vec<String>) -> Self {
        EditorsAppData {
            editors: Mutex::new(HashMap::new()),
            schema,
            known_images,
            idle: Duration::from_secs(3600),
            max_editors: 1024,
        }
    }

    pub fn with_limits(self, idle: Duration, max_editors: usize) -> Self {
        EditorsAppData {
            idle,
            max_editors,
            ..self
        }
    }
}

impl Default for EditorsAppData {
    fn default() -> Self {
        EditorsAppData::new(SizeSchema::default(), Vec::new())
    }
}

/// Drops editors untouched for `idle` or longer, then the least recently touched
/// ones until at most `keep` are left. Returns how many were dropped.
pub fn evict(
    editors: &mut HashMap<EditorId, OpenEditor>,
    now: Instant,
    idle: Duration,
    keep: usize,
) -> usize {
    let before = editors.len();
    editors.retain(|_, open| now.saturating_duration_since(open.touched) < idle);

    while editors.len() > keep {
        let oldest = editors
            .iter()
            .min_by_key(|(_, open)| open.touched)
            .map(|(id, _)| *id);
        let Some(id) = oldest else { break };
        editors.remove(&id);
    }

    before - editors.len()
}
