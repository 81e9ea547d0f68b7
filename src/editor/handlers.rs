use std::{collections::HashMap, time::Instant};

use actix_web::{delete, get, post, web, HttpResponse, Responder};
use log::{debug, info};
use uuid::Uuid;

use crate::{
    containers::{
        models::RecordId,
        serialization::{inspect, TextField},
    },
    utils::error::EditorError,
};

use super::{
    core::ListEditor,
    models::{
        evict, DialogInput, EditorId, EditorView, EditorsAppData, FieldBody, OpenEditor, RecordRef,
        RowId,
    },
};

#[post("")]
async fn open_editor(
    data: web::Data<EditorsAppData>,
    body: web::Json<FieldBody>,
) -> impl Responder {
    let id = Uuid::new_v4();
    let editor = ListEditor::open(TextField::new(body.into_inner().field), data.schema);
    let response = view(id, &editor, &data.known_images);

    match data.editors.lock() {
        Ok(mut editors) => {
            let now = Instant::now();
            // Make room for the editor about to be inserted
            sweep(&data, &mut editors, now, data.max_editors.saturating_sub(1));
            editors.insert(id, OpenEditor::new(editor, now));
        }
        Err(e) => return EditorError::Lock(e.to_string()).response(),
    }

    info!(
        "Opened extra containers editor {} with {} records",
        id,
        response.records.len()
    );
    HttpResponse::Ok().json(response)
}

#[post("/inspect")]
async fn inspect_field(body: web::Json<FieldBody>) -> impl Responder {
    HttpResponse::Ok().json(inspect(&body.field))
}

#[get("/{editor}")]
async fn show_editor(
    data: web::Data<EditorsAppData>,
    path: web::Path<EditorId>,
) -> impl Responder {
    with_editor(&data, path.into_inner(), |_| Ok(()))
}

#[delete("/{editor}")]
async fn close_editor(
    data: web::Data<EditorsAppData>,
    path: web::Path<EditorId>,
) -> impl Responder {
    let id = path.into_inner();
    let editor = match data.editors.lock() {
        Ok(mut editors) => editors.remove(&id),
        Err(e) => return EditorError::Lock(e.to_string()).response(),
    };

    match editor {
        Some(open) => {
            info!("Closed extra containers editor {}", id);
            HttpResponse::Ok().json(view(id, &open.editor, &data.known_images))
        }
        None => EditorError::UnknownEditor(id).response(),
    }
}

#[post("/{editor}/create")]
async fn create(
    data: web::Data<EditorsAppData>,
    path: web::Path<EditorId>,
) -> impl Responder {
    with_editor(&data, path.into_inner(), |editor| {
        editor.open_for_create();
        Ok(())
    })
}

#[post("/{editor}/records/{record}/edit")]
async fn edit_record(
    data: web::Data<EditorsAppData>,
    path: web::Path<(EditorId, RecordId)>,
) -> impl Responder {
    let (id, record) = path.into_inner();
    with_editor(&data, id, |editor| {
        editor.open_for_edit(record);
        Ok(())
    })
}

#[delete("/{editor}/records/{record}")]
async fn delete_record(
    data: web::Data<EditorsAppData>,
    path: web::Path<(EditorId, RecordId)>,
) -> impl Responder {
    let (id, record) = path.into_inner();
    with_editor(&data, id, |editor| {
        editor.delete(record);
        Ok(())
    })
}

#[post("/{editor}/dialog")]
async fn update_dialog(
    data: web::Data<EditorsAppData>,
    path: web::Path<EditorId>,
    input: web::Json<DialogInput>,
) -> impl Responder {
    let id = path.into_inner();
    with_editor(&data, id, |editor| {
        editor
            .dialog_mut()
            .ok_or(EditorError::DialogClosed(id))?
            .apply(input.into_inner());
        Ok(())
    })
}

#[post("/{editor}/dialog/commands")]
async fn add_command_row(
    data: web::Data<EditorsAppData>,
    path: web::Path<EditorId>,
) -> impl Responder {
    let id = path.into_inner();
    with_editor(&data, id, |editor| {
        editor
            .dialog_mut()
            .ok_or(EditorError::DialogClosed(id))?
            .add_command_row();
        Ok(())
    })
}

#[post("/{editor}/dialog/env")]
async fn add_env_var_row(
    data: web::Data<EditorsAppData>,
    path: web::Path<EditorId>,
) -> impl Responder {
    let id = path.into_inner();
    with_editor(&data, id, |editor| {
        editor
            .dialog_mut()
            .ok_or(EditorError::DialogClosed(id))?
            .add_env_var_row();
        Ok(())
    })
}

#[delete("/{editor}/dialog/rows/{row}")]
async fn remove_row(
    data: web::Data<EditorsAppData>,
    path: web::Path<(EditorId, RowId)>,
) -> impl Responder {
    let (id, row) = path.into_inner();
    with_editor(&data, id, |editor| {
        editor
            .dialog_mut()
            .ok_or(EditorError::DialogClosed(id))?
            .remove_row(row);
        Ok(())
    })
}

#[post("/{editor}/submit")]
async fn submit(
    data: web::Data<EditorsAppData>,
    path: web::Path<EditorId>,
    input: web::Json<DialogInput>,
) -> impl Responder {
    let id = path.into_inner();
    with_editor(&data, id, |editor| {
        editor
            .dialog_mut()
            .ok_or(EditorError::DialogClosed(id))?
            .apply(input.into_inner());
        editor.submit();
        Ok(())
    })
}

#[post("/{editor}/cancel")]
async fn cancel(
    data: web::Data<EditorsAppData>,
    path: web::Path<EditorId>,
) -> impl Responder {
    with_editor(&data, path.into_inner(), |editor| {
        editor.cancel();
        Ok(())
    })
}

fn with_editor(
    data: &EditorsAppData,
    id: EditorId,
    action: impl FnOnce(&mut ListEditor<TextField>) -> Result<(), EditorError>,
) -> HttpResponse {
    let mut editors = match data.editors.lock() {
        Ok(editors) => editors,
        Err(e) => return EditorError::Lock(e.to_string()).response(),
    };
    let now = Instant::now();
    sweep(data, &mut editors, now, data.max_editors);
    let Some(open) = editors.get_mut(&id) else {
        return EditorError::UnknownEditor(id).response();
    };
    open.touched = now;

    match action(&mut open.editor) {
        Ok(()) => HttpResponse::Ok().json(view(id, &open.editor, &data.known_images)),
        Err(e) => e.response(),
    }
}

fn sweep(
    data: &EditorsAppData,
    editors: &mut HashMap<EditorId, OpenEditor>,
    now: Instant,
    keep: usize,
) {
    let dropped = evict(editors, now, data.idle, keep);
    if dropped > 0 {
        debug!("Dropped {} idle extra containers editors", dropped);
    }
}

fn view(id: EditorId, editor: &ListEditor<TextField>, known_images: &[String]) -> EditorView {
    EditorView {
        editor: id,
        field: editor.field().value().to_string(),
        table: editor.table().to_string(),
        dialog: editor.dialog(known_images),
        session: editor.state().clone(),
        records: editor
            .list()
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| RecordRef {
                id: record.id,
                index,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    use super::*;
    use crate::{
        containers::{
            models::{ContainerSpec, EnvVar, FieldReport},
            serialization::parse,
        },
        editor::{
            configure,
            models::{CommandRow, EditorMode, EnvVarRow},
            scope,
        },
    };

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(EditorsAppData::default()))
                    .service(web::scope(&scope()).configure(configure)),
            )
            .await
        };
    }

    const TWO: &str = r#"[
        {"name":"a","image":"a:1","size":"SMALL","commands":["run-a"],"envVars":[]},
        {"name":"b","image":"b:1","size":"large"}
    ]"#;

    #[actix_web::test]
    async fn create_flow_over_http() {
        let app = app!();

        let opened: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/editor")
                .set_json(json!({ "field": "" }))
                .to_request(),
        )
        .await;
        assert!(opened.records.is_empty());
        assert_eq!(opened.field, "");

        let base = format!("/editor/{}", opened.editor);
        let _: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("{}/create", base))
                .to_request(),
        )
        .await;
        let _: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("{}/dialog/commands", base))
                .to_request(),
        )
        .await;
        let with_rows: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("{}/dialog/env", base))
                .to_request(),
        )
        .await;
        let session = with_rows.session.unwrap();
        assert_eq!(session.mode, EditorMode::Create);
        assert!(with_rows.dialog.is_some());

        let submitted: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("{}/submit", base))
                .set_json(DialogInput {
                    name: Some("sidekick".to_string()),
                    image: Some("foo:1".to_string()),
                    size: Some("SMALL".to_string()),
                    commands: vec![CommandRow {
                        id: session.dialog.commands[0].id,
                        value: "echo hi".to_string(),
                    }],
                    env_vars: vec![EnvVarRow {
                        id: session.dialog.env_vars[0].id,
                        name: "X".to_string(),
                        value: "1".to_string(),
                    }],
                })
                .to_request(),
        )
        .await;

        assert!(submitted.session.is_none());
        assert!(submitted.dialog.is_none());
        assert_eq!(submitted.records.len(), 1);
        assert_eq!(
            parse(&submitted.field).specs(),
            vec![ContainerSpec {
                name: "sidekick".to_string(),
                image: "foo:1".to_string(),
                size: "SMALL".to_string(),
                commands: vec!["echo hi".to_string()],
                env_vars: vec![EnvVar::new("X", "1")],
            }]
        );
        assert!(submitted.table.contains("<td>sidekick</td>"));
    }

    #[actix_web::test]
    async fn delete_and_stale_edit() {
        let app = app!();

        let opened: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/editor")
                .set_json(json!({ "field": TWO }))
                .to_request(),
        )
        .await;
        let a = opened.records[0].id;
        let base = format!("/editor/{}", opened.editor);

        let deleted: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::delete()
                .uri(&format!("{}/records/{}", base, a))
                .to_request(),
        )
        .await;
        assert_eq!(deleted.records.len(), 1);
        assert_eq!(parse(&deleted.field).specs()[0].name, "b");

        let edited: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("{}/records/{}/edit", base, a))
                .to_request(),
        )
        .await;
        assert!(edited.session.is_none());
        assert_eq!(edited.field, deleted.field);
    }

    #[actix_web::test]
    async fn unknown_editor_is_not_found() {
        let app = app!();
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/editor/{}/create", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn dialog_operations_need_an_open_dialog() {
        let app = app!();
        let opened: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/editor")
                .set_json(json!({ "field": TWO }))
                .to_request(),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/editor/{}/submit", opened.editor))
                .set_json(json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/editor/{}/dialog/commands", opened.editor))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn closed_editor_is_gone() {
        let app = app!();
        let opened: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/editor")
                .set_json(json!({ "field": TWO }))
                .to_request(),
        )
        .await;
        let uri = format!("/editor/{}", opened.editor);

        let closed: EditorView = test::call_and_read_body_json(
            &app,
            test::TestRequest::delete().uri(&uri).to_request(),
        )
        .await;
        assert_eq!(closed.records.len(), 2);

        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn abandoned_editors_are_dropped() {
        let data = web::Data::new(
            EditorsAppData::default().with_limits(std::time::Duration::from_secs(3600), 3),
        );
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(web::scope(&scope()).configure(configure)),
        )
        .await;

        let mut opened = Vec::new();
        for _ in 0..10 {
            let editor: EditorView = test::call_and_read_body_json(
                &app,
                test::TestRequest::post()
                    .uri("/editor")
                    .set_json(json!({ "field": "[]" }))
                    .to_request(),
            )
            .await;
            opened.push(editor.editor);
        }
        assert_eq!(data.editors.lock().unwrap().len(), 3);

        let latest = opened[opened.len() - 1];
        let kept = *data
            .editors
            .lock()
            .unwrap()
            .keys()
            .find(|id| **id != latest)
            .unwrap();
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/editor/{}", kept))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(data.editors.lock().unwrap().len(), 3);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/editor/{}", latest))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn idle_editors_are_not_found() {
        let data = web::Data::new(
            EditorsAppData::default().with_limits(std::time::Duration::ZERO, 1024),
        );
        let app = test::init_service(
            App::new()
                .app_data(data.clone())
                .service(web::scope(&scope()).configure(configure)),
        )
        .await;

        let mut opened = Vec::new();
        for _ in 0..3 {
            let editor: EditorView = test::call_and_read_body_json(
                &app,
                test::TestRequest::post()
                    .uri("/editor")
                    .set_json(json!({ "field": "[]" }))
                    .to_request(),
            )
            .await;
            opened.push(editor.editor);
        }
        assert_eq!(data.editors.lock().unwrap().len(), 1);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/editor/{}", opened[0]))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn inspect_reports_shape() {
        let app = app!();
        let report: FieldReport = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/editor/inspect")
                .set_json(json!({ "field": "{}" }))
                .to_request(),
        )
        .await;
        assert_eq!(report, FieldReport::NotArray);
    }
}
