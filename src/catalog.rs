use crate::error::{FunalyticsError, Result};
use crate::types::event::EventFeatures;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Deserialize)]
#[serde(untagged)]
enum EventFile {
    Many(Vec<EventFeatures>),
    One(Box<EventFeatures>),
}

/// Events from a JSON file (one object or an array), or from every `.json`
/// file under a directory in path order.
pub fn load_events(path: &Path) -> Result<Vec<EventFeatures>> {
    if !path.exists() {
        return Err(FunalyticsError::PathNotFound(path.display().to_string()));
    }
    if path.is_file() {
        return read_event_file(path);
    }

    let mut events = Vec::new();
    for file in list_event_files(path) {
        events.extend(read_event_file(&file)?);
    }
    tracing::info!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}

fn list_event_files(root: &Path) -> Vec<PathBuf> {
    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .collect::<Vec<_>>();
    files.sort();
    files
}

fn read_event_file(path: &Path) -> Result<Vec<EventFeatures>> {
    let content = std::fs::read_to_string(path)?;
    let parsed: EventFile = serde_json::from_str(&content)
        .map_err(|e| FunalyticsError::EventParse(format!("{}: {}", path.display(), e)))?;
    Ok(match parsed {
        EventFile::Many(events) => events,
        EventFile::One(event) => vec![*event],
    })
}
