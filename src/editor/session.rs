//! Transitions of the add/edit dialog. Each takes the current state by value and
//! returns the next one; the caller owns the state between events.

use log::{debug, warn};

use crate::containers::models::{ContainerList, RecordId};

use super::models::{Committed, DialogForm, EditorMode, EditorSession, EditorState};

pub fn open_for_create(_state: EditorState) -> EditorState {
    Some(EditorSession {
        mode: EditorMode::Create,
        dialog: DialogForm::empty(),
    })
}

/// Leaves `state` as it is when the record no longer exists.
pub fn open_for_edit(state: EditorState, list: &ContainerList, id: RecordId) -> EditorState {
    match list.get(id) {
        Some(spec) => Some(EditorSession {
            mode: EditorMode::Edit(id),
            dialog: DialogForm::from_spec(spec),
        }),
        None => {
            debug!("Ignoring edit of unknown extra container {}", id);
            state
        }
    }
}

pub fn cancel(_state: EditorState) -> EditorState {
    None
}

pub fn submit(state: EditorState, list: &mut ContainerList) -> (EditorState, Committed) {
    let Some(session) = state else {
        debug!("Ignoring submit without an open dialog");
        return (None, Committed::Nothing);
    };

    let spec = session.dialog.to_spec();
    let committed = match session.mode {
        EditorMode::Create => Committed::Created(list.push(spec)),
        EditorMode::Edit(id) => match list.replace(id, spec) {
            Ok(()) => Committed::Updated(id),
            Err(spec) => {
                warn!(
                    "Extra container {} was removed while being edited, appending the edit",
                    id
                );
                Committed::Appended(list.push(spec))
            }
        },
    };

    (None, committed)
}
