use serde::{Deserialize, Serialize};

use crate::{
    containers::models::{ContainerList, ContainerSpec, RecordId, SizeSchema},
    utils::html::Element,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RecordId,
    pub name: String,
    pub image: String,
    pub size: String,
    pub commands: Option<String>,
    pub env_vars: Vec<String>,
}

impl RowView {
    fn new(id: RecordId, spec: &ContainerSpec, schema: SizeSchema) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            image: spec.image.clone(),
            size: schema.display(&spec.size),
            commands: (!spec.commands.is_empty())
                .then(|| format!("Commands: {}", spec.commands.join(" "))),
            env_vars: spec
                .env_vars
                .iter()
                .map(|env| format!("{}={}", env.name, env.value))
                .collect(),
        }
    }
}

pub fn rows(list: &ContainerList, schema: SizeSchema) -> Vec<RowView> {
    list.records()
        .iter()
        .map(|record| RowView::new(record.id, &record.spec, schema))
        .collect()
}

/// The whole table body, header row included. Always rebuilt from the list.
pub fn render(list: &ContainerList, schema: SizeSchema) -> String {
    Element::new("tbody")
        .child(header())
        .children(rows(list, schema).iter().map(row))
        .to_string()
}

fn header() -> Element {
    Element::new("tr").children(
        ["Name", "Image", "Details", "Actions"].map(|title| Element::new("th").text(title)),
    )
}

fn row(view: &RowView) -> Element {
    let mut details = Element::new("td").child(Element::new("p").text(view.size.as_str()));
    if let Some(commands) = &view.commands {
        details = details.child(Element::new("p").text(commands.as_str()));
    }
    if !view.env_vars.is_empty() {
        let mut env = Element::new("p")
            .text("Environment Variables:")
            .child(Element::void("br"));
        for line in &view.env_vars {
            env = env.text(line.as_str()).child(Element::void("br"));
        }
        details = details.child(env);
    }

    Element::new("tr")
        .attr("data-record", view.id.to_string())
        .child(Element::new("td").text(view.name.as_str()))
        .child(Element::new("td").text(view.image.as_str()))
        .child(details)
        .child(
            Element::new("td")
                .child(action("edit", "Edit", view.id))
                .child(action("delete", "Delete", view.id)),
        )
}

fn action(action: &'static str, label: &'static str, id: RecordId) -> Element {
    Element::new("button")
        .attr("type", "button")
        .attr("class", "aui-button")
        .attr("data-action", action)
        .attr("data-record", id.to_string())
        .text(label)
}
