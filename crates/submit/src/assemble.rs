//! Builds the multipart finalize request.
//!
//! The server expects every metadata group twice: once as a JSON blob
//! under the group key, and flattened into individual `<group>.<field>`
//! text fields. Chunked files arrive as `chunkedFiles[<fileId>]` path
//! references; small files carry their raw bytes under the kind's form
//! key.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::api::FinalizePart;
use crate::error::SubmitError;
use crate::types::{FilePayload, ObservationMetadata};

/// Assembles the complete finalize form.
///
/// `completed` maps file ids to the server-side paths produced by the
/// chunked uploads; entries are emitted in file-id order so the form
/// layout is stable.
pub fn assemble_finalize(
    direct: &[FilePayload],
    completed: &HashMap<String, String>,
    meta: &ObservationMetadata,
) -> Result<Vec<FinalizePart>, SubmitError> {
    let mut parts = Vec::new();

    let mut chunked: Vec<(&String, &String)> = completed.iter().collect();
    chunked.sort();
    for (file_id, path) in chunked {
        parts.push(FinalizePart::Text {
            name: format!("chunkedFiles[{file_id}]"),
            value: path.clone(),
        });
    }

    for payload in direct {
        parts.push(FinalizePart::File {
            name: payload.kind.form_key().to_string(),
            file_name: payload.file_name.clone(),
            content_type: payload.content_type.clone(),
            data: payload.data.clone(),
        });
    }

    push_group(&mut parts, "imageDetails", &meta.image_details)?;
    push_group(&mut parts, "location", &meta.location)?;
    push_group(&mut parts, "gear", &meta.gear)?;
    push_group(&mut parts, "session", &meta.session)?;
    if let Some(object) = &meta.celestial_object {
        push_group(&mut parts, "celestialObject", object)?;
    }

    Ok(parts)
}

/// Adds one metadata group: the JSON blob plus its flattened fields.
fn push_group<T: Serialize>(
    parts: &mut Vec<FinalizePart>,
    key: &str,
    group: &T,
) -> Result<(), SubmitError> {
    let value = serde_json::to_value(group)?;
    parts.push(FinalizePart::Text {
        name: key.to_string(),
        value: serde_json::to_string(&value)?,
    });
    flatten_into(parts, key, &value);
    Ok(())
}

/// Flattens a JSON value into `prefix.field` / `prefix[i]` text fields.
///
/// Strings are emitted raw (no surrounding quotes); nulls are skipped.
fn flatten_into(parts: &mut Vec<FinalizePart>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                flatten_into(parts, &format!("{prefix}.{k}"), v);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_into(parts, &format!("{prefix}[{i}]"), v);
            }
        }
        Value::Null => {}
        Value::String(s) => parts.push(FinalizePart::Text {
            name: prefix.to_string(),
            value: s.clone(),
        }),
        other => parts.push(FinalizePart::Text {
            name: prefix.to_string(),
            value: other.to_string(),
        }),
    }
}
