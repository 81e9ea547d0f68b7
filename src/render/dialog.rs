use crate::{
    containers::models::{ContainerSize, SizeSchema},
    editor::models::{CommandRow, EditorMode, EditorSession, EnvVarRow},
    utils::html::Element,
};

const KNOWN_IMAGES: &str = "extraContainer-knownImages";

pub fn render_dialog(
    session: &EditorSession,
    schema: SizeSchema,
    known_images: &[String],
) -> String {
    let dialog = &session.dialog;
    let (mode, title) = match session.mode {
        EditorMode::Create => ("create", "Add extra container"),
        EditorMode::Edit(_) => ("edit", "Edit extra container"),
    };

    let mut section = Element::new("section")
        .attr("id", "extraContainer-dialog")
        .attr("role", "dialog")
        .attr("data-mode", mode);
    if let EditorMode::Edit(id) = session.mode {
        section = section.attr("data-record", id.to_string());
    }

    section
        .child(Element::new("h2").text(title))
        .child(
            Element::new("form")
                .child(labelled("extraContainer-name", "Name"))
                .child(text_input("extraContainer-name", "name", &dialog.name))
                .child(labelled("extraContainer-image", "Image"))
                .child(
                    text_input("extraContainer-image", "image", &dialog.image)
                        .attr("list", KNOWN_IMAGES),
                )
                .child(Element::new("datalist").attr("id", KNOWN_IMAGES).children(
                    known_images
                        .iter()
                        .map(|image| Element::new("option").attr("value", image.as_str())),
                ))
                .child(labelled("extraContainer-size", "Size"))
                .child(size_select(&dialog.size, schema))
                .child(commands(&dialog.commands))
                .child(env_vars(&dialog.env_vars))
                .child(button("submit", "Save"))
                .child(button("cancel", "Cancel")),
        )
        .to_string()
}

fn labelled(id: &'static str, label: &'static str) -> Element {
    Element::new("label").attr("for", id).text(label)
}

fn text_input(id: &'static str, name: &'static str, value: &str) -> Element {
    Element::void("input")
        .attr("class", "text")
        .attr("type", "text")
        .attr("id", id)
        .attr("name", name)
        .attr("value", value)
}

fn size_select(current: &str, schema: SizeSchema) -> Element {
    // A record stored without a size gets the default one preselected.
    let blank = current.trim().is_empty();
    let selected = if blank {
        Some(ContainerSize::Regular)
    } else {
        ContainerSize::parse(current).filter(|size| schema.sizes().contains(size))
    };
    let mut select = Element::new("select")
        .attr("id", "extraContainer-size")
        .attr("name", "size");
    for size in schema.sizes() {
        select = select.child(
            Element::new("option")
                .attr("value", size.name())
                .flag("selected", selected == Some(*size))
                .text(schema.display(size.name())),
        );
    }
    // Keep values the schema doesn't know selectable so an edit doesn't drop them.
    if selected.is_none() && !blank {
        select = select.child(
            Element::new("option")
                .attr("value", current)
                .flag("selected", true)
                .text(current),
        );
    }
    select
}

fn commands(rows: &[CommandRow]) -> Element {
    Element::new("fieldset")
        .attr("id", "extraContainer-commands")
        .child(Element::new("legend").text("Commands"))
        .children(rows.iter().map(|row| {
            Element::new("div")
                .attr("class", "extraContainer-command")
                .attr("data-row", row.id.to_string())
                .child(
                    Element::void("input")
                        .attr("class", "text")
                        .attr("type", "text")
                        .attr("name", "command")
                        .attr("value", row.value.as_str()),
                )
                .child(remove_row(row.id))
        }))
        .child(button("add-command", "Add command"))
}

fn env_vars(rows: &[EnvVarRow]) -> Element {
    Element::new("fieldset")
        .attr("id", "extraContainer-envVars")
        .child(Element::new("legend").text("Environment Variables"))
        .children(rows.iter().map(|row| {
            Element::new("div")
                .attr("class", "extraContainer-envVar")
                .attr("data-row", row.id.to_string())
                .child(
                    Element::void("input")
                        .attr("class", "text")
                        .attr("type", "text")
                        .attr("name", "envName")
                        .attr("value", row.name.as_str()),
                )
                .text("=")
                .child(
                    Element::void("input")
                        .attr("class", "text")
                        .attr("type", "text")
                        .attr("name", "envValue")
                        .attr("value", row.value.as_str()),
                )
                .child(remove_row(row.id))
        }))
        .child(button("add-env", "Add variable"))
}

fn remove_row(row: uuid::Uuid) -> Element {
    button("remove-row", "Remove").attr("data-row", row.to_string())
}

fn button(action: &'static str, label: &'static str) -> Element {
    Element::new("button")
        .attr("type", "button")
        .attr("class", "aui-button")
        .attr("data-action", action)
        .text(label)
}
