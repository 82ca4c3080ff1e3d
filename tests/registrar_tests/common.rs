//! Shared fixtures

use registrar::env::{FixedClock, SequentialIds};
use registrar::{Config, Registrar, RecordStore, Semester, Stores};

pub const NOW: u64 = 1_700_000_000_000_000_000;

/// In-memory registrar with a pinned clock and ids `id-1`, `id-2`, ...
pub fn setup() -> Registrar {
    Registrar::with_collaborators(
        Config::default(),
        Stores::in_memory(),
        Box::new(FixedClock(NOW)),
        Box::new(SequentialIds::new("id")),
    )
}

/// Semesters are never created by a handler, so tests seed them directly
pub fn seed_semester(registrar: &Registrar, id: &str, threshold: u64) {
    registrar
        .stores()
        .semesters
        .insert(
            id,
            Semester {
                id_semester: id.to_string(),
                semester_credit_semester: threshold,
                created_at: NOW,
                updated_at: NOW,
            },
        )
        .unwrap();
}
