pub mod manifest;

pub use manifest::{
    ensure_manifest, read_manifest, touch_manifest, write_manifest, ArchiveManifest, ManifestError,
};
