use log::{debug, info};

use crate::{
    containers::{
        models::{ContainerList, RecordId, SizeSchema},
        serialization::{load, store, HostField},
    },
    render::{dialog::render_dialog, table::render},
};

use super::{
    models::{Committed, DialogForm, EditorState},
    session,
};

/// Extra containers editor bound to one host field.
///
/// Every mutation of the list is stored into the field before the table is
/// rendered again, so the cached table always matches the stored value.
pub struct ListEditor<F> {
    field: F,
    list: ContainerList,
    state: EditorState,
    schema: SizeSchema,
    table: String,
}

impl<F: HostField> ListEditor<F> {
    pub fn open(field: F, schema: SizeSchema) -> Self {
        let list = load(&field);
        if list.is_empty() {
            debug!("Opened extra containers editor on an empty list");
        } else {
            debug!("Loaded {} extra containers", list.len());
        }
        let table = render(&list, schema);
        Self {
            field,
            list,
            state: None,
            schema,
            table,
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn list(&self) -> &ContainerList {
        &self.list
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn dialog(&self, known_images: &[String]) -> Option<String> {
        self.state
            .as_ref()
            .map(|session| render_dialog(session, self.schema, known_images))
    }

    pub fn dialog_mut(&mut self) -> Option<&mut DialogForm> {
        self.state.as_mut().map(|session| &mut session.dialog)
    }

    pub fn open_for_create(&mut self) {
        self.state = session::open_for_create(self.state.take());
    }

    /// Returns whether the dialog was opened for `id`.
    pub fn open_for_edit(&mut self, id: RecordId) -> bool {
        self.state = session::open_for_edit(self.state.take(), &self.list, id);
        self.list.get(id).is_some()
    }

    pub fn open_for_edit_at(&mut self, index: usize) -> bool {
        match self.list.id_at(index) {
            Some(id) => self.open_for_edit(id),
            None => {
                debug!("Ignoring edit at out of range index {}", index);
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = session::cancel(self.state.take());
    }

    pub fn submit(&mut self) -> Committed {
        let (state, committed) = session::submit(self.state.take(), &mut self.list);
        self.state = state;
        if committed != Committed::Nothing {
            info!("Committed extra container change: {:?}", committed);
            self.commit();
        }
        committed
    }

    pub fn delete(&mut self, id: RecordId) -> bool {
        match self.list.remove(id) {
            Some(spec) => {
                info!("Deleted extra container {} ({})", id, spec.name);
                self.commit();
                true
            }
            None => {
                debug!("Ignoring delete of unknown extra container {}", id);
                false
            }
        }
    }

    pub fn delete_at(&mut self, index: usize) -> bool {
        match self.list.id_at(index) {
            Some(id) => self.delete(id),
            None => {
                debug!("Ignoring delete at out of range index {}", index);
                false
            }
        }
    }

    fn commit(&mut self) {
        store(&mut self.field, &self.list);
        self.table = render(&self.list, self.schema);
    }
}
