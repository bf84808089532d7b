//! All backend logic for TasteNote, independent of how the app is run.
//!
//! The heart of it is the share planner ([share]): turning a tasting note into a post that
//! fits the platform limit, plus continuation posts for whatever did not fit.

pub mod app_data;
pub mod chunks;
pub mod config;
pub mod intent;
pub mod notes;
pub mod share;
pub mod vocabulary;
pub mod weight;

pub use app_data::app_data_dir;
pub use chunks::{split_continuation, CONTINUATION_MARKER, MAX_CHUNK_UNITS};
pub use config::{load_config, set_app_url, set_hashtag, ConfigError, ShareConfig};
pub use intent::{build_intent_url, INTENT_ENDPOINT};
pub use notes::{find_note, load_notes, NoteRecord, NotesError};
pub use share::{compute_share_plan, ShareNote, SharePlan, ELLIPSIS};
pub use vocabulary::{
    build_vocabulary, count_terms, default_categories, load_categories, save_vocabulary,
    Vocabulary, VocabularyError, VocabularyField,
};
pub use weight::{weighted_len, MAX_WEIGHTED_LEN, URL_WEIGHT};

/// Returns a short status string. Used to verify the backend is wired up.
pub fn status() -> &'static str {
    "tastenote-core ready"
}
