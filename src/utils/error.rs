use std::fmt::Display;

use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::editor::models::EditorId;

#[derive(Serialize, Deserialize, Clone)]
pub struct ResponseError {
    pub error: String,
}

impl ResponseError {
    pub fn new(error: impl Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Unknown editor {0}")]
    UnknownEditor(EditorId),
    #[error("Editor {0} has no open dialog")]
    DialogClosed(EditorId),
    #[error("Could not access editors: {0}")]
    Lock(String),
}

impl EditorError {
    pub fn status(&self) -> StatusCode {
        match self {
            EditorError::UnknownEditor(_) => StatusCode::NOT_FOUND,
            EditorError::DialogClosed(_) => StatusCode::CONFLICT,
            EditorError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ResponseError::new(self))
    }
}
