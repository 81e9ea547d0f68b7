use log::debug;
use serde_json::{json, Map, Value};

use super::models::{ContainerList, ContainerSpec, EnvVar, FieldReport};

/// The single text field of the host form that carries the extra containers.
pub trait HostField {
    fn read(&self) -> String;
    fn write(&mut self, value: String);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl HostField for TextField {
    fn read(&self) -> String {
        self.value.clone()
    }

    fn write(&mut self, value: String) {
        self.value = value;
    }
}

/// Never fails: anything that isn't a JSON array loads as an empty list.
pub fn load(field: &impl HostField) -> ContainerList {
    parse(&field.read())
}

pub fn store(field: &mut impl HostField, list: &ContainerList) {
    field.write(to_text(list));
}

pub fn parse(text: &str) -> ContainerList {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            debug!("Discarding unparseable extra containers payload: {}", e);
            return ContainerList::new();
        }
    };
    if !value.is_array() {
        debug!("Discarding extra containers payload that is not an array");
    }

    ContainerList::from_specs(coerce_list(value).into_iter().filter_map(spec_from_value))
}

pub fn to_text(list: &ContainerList) -> String {
    json!(list.specs()).to_string()
}

pub fn coerce_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

pub fn inspect(text: &str) -> FieldReport {
    if text.trim().is_empty() {
        return FieldReport::Empty;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => {
            let records = items.iter().filter(|item| item.is_object()).count();
            FieldReport::Ok {
                records,
                skipped: items.len() - records,
            }
        }
        Ok(_) => FieldReport::NotArray,
        Err(e) => FieldReport::NotJson {
            error: e.to_string(),
        },
    }
}

fn spec_from_value(value: Value) -> Option<ContainerSpec> {
    let Value::Object(mut obj) = value else {
        debug!("Skipping extra container entry that is not an object");
        return None;
    };

    Some(ContainerSpec {
        name: take_string(&mut obj, "name"),
        image: take_string(&mut obj, "image"),
        size: take_string(&mut obj, "size"),
        commands: coerce_list(obj.remove("commands").unwrap_or_default())
            .into_iter()
            .filter_map(|command| match command {
                Value::String(command) => Some(command),
                _ => None,
            })
            .collect(),
        env_vars: coerce_list(obj.remove("envVars").unwrap_or_default())
            .into_iter()
            .filter_map(|env| match env {
                Value::Object(mut env) => Some(EnvVar {
                    name: take_string(&mut env, "name"),
                    value: take_string(&mut env, "value"),
                }),
                _ => None,
            })
            .collect(),
    })
}

fn take_string(obj: &mut Map<String, Value>, key: &str) -> String {
    match obj.remove(key) {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
