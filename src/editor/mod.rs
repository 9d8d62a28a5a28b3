pub mod autosave;
mod session;
mod target;

pub use autosave::{
    AutosaveCoordinator, AutosavePhase, AutosaveStatus, DraftSnapshot, SaveError, SaveOutcome,
    SaveTarget, DEFAULT_DEBOUNCE,
};
pub use session::EditorSession;
pub use target::ArchiveSaveTarget;
