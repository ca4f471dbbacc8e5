//! Named drawings saved next to the current one.
//!
//! Each entry is a wrapper object holding the drawing's JSON together with
//! the brush settings it was made with:
//!
//! ```text
//! { "json": "...", "backgroundColor": "#FFFFFF", "brushColor": "#FF0000",
//!   "brushSize": 1.0, "mirror": true, "rotations": 8, "simplify": true,
//!   "savedAt": 1700000000 }
//! ```

use serde_json::Value;

use super::persistence::{FILES_KEY, KeyValueStore, PersistenceError, PersistenceResult, file_key};
use crate::drawing::Drawing;
use crate::settings::BrushSettings;
use crate::util::time;

/// A drawing loaded back from the library.
#[derive(Debug, Clone)]
pub struct SavedDrawing {
    pub name: String,
    pub drawing: Drawing,
    pub settings: BrushSettings,
    pub saved_at: Option<u64>,
}

/// Names of the saved drawings, oldest first.
pub fn list(store: &dyn KeyValueStore) -> Vec<String> {
    let Some(json) = store.get(FILES_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Value>>(&json) {
        Ok(values) => values
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect(),
        Err(err) => {
            log::warn!("Ignoring unreadable drawing list: {}", err);
            Vec::new()
        }
    }
}

fn write_list(store: &mut dyn KeyValueStore, names: &[String]) -> PersistenceResult<()> {
    store.set(FILES_KEY, serde_json::to_string(names)?);
    Ok(())
}

fn validate_name(name: &str) -> PersistenceResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PersistenceError::InvalidName(name.to_owned()));
    }
    Ok(trimmed)
}

/// Store `drawing` under `name`, replacing an earlier drawing of that name.
pub fn save_as(
    store: &mut dyn KeyValueStore,
    name: &str,
    drawing: &Drawing,
    settings: &BrushSettings,
) -> PersistenceResult<()> {
    let name = validate_name(name)?;

    let mut wrapper = settings.to_map();
    wrapper.insert("json".to_owned(), Value::String(drawing.to_json()?));
    wrapper.insert("savedAt".to_owned(), Value::from(time::timestamp_secs()));
    store.set(&file_key(name), serde_json::to_string(&wrapper)?);

    let mut names = list(store);
    if !names.iter().any(|n| n == name) {
        names.push(name.to_owned());
        write_list(store, &names)?;
    }

    log::info!("Saved drawing {:?} ({} groups)", name, drawing.len());
    Ok(())
}

/// Load the drawing stored under `name`.
///
/// A broken drawing inside an otherwise readable wrapper loads as empty, and
/// broken settings fields fall back to their defaults.
pub fn open(store: &dyn KeyValueStore, name: &str) -> PersistenceResult<SavedDrawing> {
    let name = validate_name(name)?;
    let json = store
        .get(&file_key(name))
        .ok_or_else(|| PersistenceError::MissingKey(file_key(name)))?;

    let Value::Object(wrapper) = serde_json::from_str::<Value>(&json)? else {
        return Err(PersistenceError::InvalidData(format!("{name:?} is not a saved drawing")));
    };

    let drawing = match wrapper.get("json") {
        Some(Value::String(inner)) => Drawing::from_json_or_empty(inner),
        // Some writers embed the scene graph as an object instead of a string
        Some(inner @ Value::Object(_)) => serde_json::from_value(inner.clone()).unwrap_or_else(|err| {
            log::warn!("Discarding unreadable drawing {:?}: {}", name, err);
            Drawing::default()
        }),
        _ => Drawing::default(),
    };

    Ok(SavedDrawing {
        name: name.to_owned(),
        drawing,
        settings: BrushSettings::from_map(&wrapper),
        saved_at: wrapper.get("savedAt").and_then(Value::as_u64),
    })
}

/// Remove the drawing stored under `name`. Unknown names are a no-op.
pub fn delete(store: &mut dyn KeyValueStore, name: &str) -> PersistenceResult<()> {
    let name = validate_name(name)?;
    let mut names = list(store);
    let before = names.len();
    names.retain(|n| n != name);

    if names.len() != before {
        write_list(store, &names)?;
    }
    if store.get(&file_key(name)).is_some() {
        store.remove(&file_key(name));
        log::info!("Deleted drawing {:?}", name);
    }
    Ok(())
}
