//! Tasting notes as exported by the web app (a JSON array of records).
//!
//! We only read export files; where the notes are kept is up to the app.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::share::ShareNote;

/// One tasting note, field names as in the export file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteRecord {
    pub id: Option<i64>,
    pub whisky_name: String,
    pub distillery_name: Option<String>,
    pub region: Option<String>,
    pub aroma: Option<String>,
    pub flavor: Option<String>,
    pub summary: Option<String>,
    /// Alcohol by volume, percent.
    pub abv: Option<f64>,
    pub cask: Option<String>,
    /// Score out of 100.
    pub rating: Option<i64>,
    /// ISO-8601 timestamps.
    pub created_at: String,
    pub updated_at: String,
}

impl NoteRecord {
    /// The fields that go into a shared post.
    pub fn share_note(&self) -> ShareNote<'_> {
        ShareNote {
            whisky_name: &self.whisky_name,
            rating: self.rating,
            summary: self.summary.as_deref(),
        }
    }
}

/// Reads an export file. Returns the notes newest first.
pub fn load_notes(path: &Path) -> Result<Vec<NoteRecord>, NotesError> {
    let raw = std::fs::read_to_string(path).map_err(|e| NotesError::Read(path.to_path_buf(), e))?;
    let mut notes = parse_notes(&raw).map_err(|e| NotesError::Parse(path.to_path_buf(), e))?;
    // ISO-8601 in one timezone sorts lexically.
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(notes)
}

fn parse_notes(raw: &str) -> Result<Vec<NoteRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Finds the note with the given id.
pub fn find_note(notes: &[NoteRecord], id: i64) -> Option<&NoteRecord> {
    notes.iter().find(|n| n.id == Some(id))
}

#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    #[error("read error for {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("invalid notes export {0}: {1}")]
    Parse(PathBuf, serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"[
      {"id": 1, "whisky_name": "Yamazaki 12", "rating": 88, "summary": "Honeyed.",
       "aroma": "蜂蜜、オレンジ", "created_at": "2024-01-01T10:00:00.000Z",
       "updated_at": "2024-01-01T10:00:00.000Z"},
      {"id": 2, "whisky_name": "Laphroaig 10", "rating": null, "abv": 40,
       "created_at": "2024-03-05T08:00:00.000Z", "updated_at": "2024-03-05T08:00:00.000Z"}
    ]"#;

    #[test]
    fn loads_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, EXPORT).unwrap();
        let notes = load_notes(&path).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].whisky_name, "Laphroaig 10");
        assert_eq!(notes[0].abv, Some(40.0));
        assert_eq!(notes[0].summary, None);
        assert_eq!(notes[1].aroma.as_deref(), Some("蜂蜜、オレンジ"));
    }

    #[test]
    fn find_by_id() {
        let notes = parse_notes(EXPORT).unwrap();
        assert_eq!(find_note(&notes, 2).map(|n| n.whisky_name.as_str()), Some("Laphroaig 10"));
        assert!(find_note(&notes, 9).is_none());
    }

    #[test]
    fn share_note_borrows_fields() {
        let notes = parse_notes(EXPORT).unwrap();
        let share = notes[0].share_note();
        assert_eq!(share.whisky_name, "Yamazaki 12");
        assert_eq!(share.rating, Some(88));
        assert_eq!(share.summary, Some("Honeyed."));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_notes(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, NotesError::Read(..)));
    }

    #[test]
    fn not_an_array_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, r#"{"whisky_name": "x"}"#).unwrap();
        assert!(matches!(load_notes(&path), Err(NotesError::Parse(..))));
    }
}
