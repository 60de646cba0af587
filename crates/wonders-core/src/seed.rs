//! Startup seeding: populates an empty store from a JSON file
//!
//! [`load_wonders`] is strict (missing file and malformed content are distinct
//! structured failures); [`seed_if_empty`] is the best-effort protocol the
//! server runs once before accepting connections, where a missing file just
//! means "no seed data available".

use std::path::Path;

use crate::error::SeedError;
use crate::store::WonderStore;
use crate::wonder::{Wonder, WonderDraft};

/// Load wonder records from a JSON array file.
///
/// Field names match case-insensitively; missing fields take the draft
/// defaults. Fails with [`SeedError::FileNotFound`] if the path does not
/// resolve to an existing file and [`SeedError::Parse`] if the content is not
/// a well-formed JSON array of record objects.
pub fn load_wonders(path: &Path) -> Result<Vec<WonderDraft>, SeedError> {
    if !path.is_file() {
        return Err(SeedError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| SeedError::Parse(e.to_string()))
}

/// Populate `store` from `path` if it holds no records yet.
///
/// Idempotent: a non-empty store makes this a no-op. A missing seed file is
/// logged and treated as "nothing to seed" rather than a failure; a malformed
/// file propagates as [`SeedError::Parse`] so the caller can decide (the
/// server logs it and starts with an empty store). Records carrying an
/// explicit positive id keep it; the rest get store-assigned ids. Source
/// order is preserved either way.
///
/// Returns the number of records inserted.
pub fn seed_if_empty(store: &WonderStore, path: &Path) -> Result<usize, SeedError> {
    if !store.is_empty() {
        tracing::debug!(
            "store already holds {} wonders, skipping seed",
            store.count()
        );
        return Ok(0);
    }

    let drafts = match load_wonders(path) {
        Ok(drafts) => drafts,
        Err(SeedError::FileNotFound(path)) => {
            tracing::warn!(
                "seed file {} not found, starting with an empty store",
                path.display()
            );
            return Ok(0);
        }
        Err(e) => return Err(e),
    };

    let mut seeded = 0;
    for draft in drafts {
        if draft.id > 0 {
            let id = draft.id;
            store.restore(Wonder::from_draft(id, draft));
        } else {
            store.insert(draft);
        }
        seeded += 1;
    }
    tracing::info!("seeded {} wonders from {}", seeded, path.display());
    Ok(seeded)
}
