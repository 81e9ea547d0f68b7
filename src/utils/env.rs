use std::{
    env::var,
    fs::read_to_string,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{error, warn};

use crate::containers::models::SizeSchema;

fn env_var(id: &str) -> Option<String> {
    var(id)
        .inspect_err(|e| {
            warn!("Could not read env var {}: {}", id, e);
        })
        .ok()
}

pub fn hostname() -> String {
    env_var("HOSTNAME").unwrap_or("0.0.0.0".to_string())
}

pub fn port() -> String {
    env_var("PORT").unwrap_or("34392".to_string())
}

pub fn sizeschema() -> SizeSchema {
    env_var("SIZESCHEMA")
        .and_then(|s| {
            SizeSchema::parse(&s).or_else(|| {
                error!("Unknown SIZESCHEMA {}, expected legacy or current", s);
                None
            })
        })
        .unwrap_or_default()
}

/// How long an editor may go untouched before it is dropped.
pub fn editoridle() -> Duration {
    env_var("EDITORIDLE")
        .and_then(|s| {
            s.parse::<u64>()
                .inspect_err(|e| error!("Invalid EDITORIDLE {}: {}", s, e))
                .ok()
        })
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(3600))
}

pub fn maxeditors() -> usize {
    env_var("MAXEDITORS")
        .and_then(|s| {
            s.parse::<usize>()
                .inspect_err(|e| error!("Invalid MAXEDITORS {}: {}", s, e))
                .ok()
        })
        .unwrap_or(1024)
}

pub fn knownimages() -> Option<PathBuf> {
    env_var("KNOWNIMAGES").map(|p| Path::new(&p).to_path_buf())
}

/// Image names offered by the image autocomplete, empty when not configured.
pub fn load_known_images(path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        return Vec::new();
    };

    read_to_string(path)
        .inspect_err(|e| error!("Could not read known images {}: {}", path.display(), e))
        .ok()
        .and_then(|file| {
            serde_json::from_str::<Vec<String>>(&file)
                .inspect_err(|e| {
                    error!(
                        "Could not parse known images {} as a list of strings: {}",
                        path.display(),
                        e
                    )
                })
                .ok()
        })
        .unwrap_or_default()
}
