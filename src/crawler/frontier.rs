//! Frontier admission and dedup sets
//!
//! Two sets keyed by canonical URL string: `admitted` holds every URL for
//! which a fetch has been dispatched, `finalized` every URL whose outcome
//! record has been appended. Both live under one lock so that the
//! check-and-insert of [`Frontier::try_admit`] is a single atomic step —
//! that atomicity is what keeps concurrent discoverers from fetching the
//! same URL twice.

use std::collections::HashSet;
use std::sync::Mutex;

/// What the caller may do with a candidate URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Newly admitted; the caller owns the fetch for this URL.
    Admitted,
    /// A fetch is already dispatched but not yet finalized; drop silently.
    InFlight,
    /// An outcome is already recorded; the caller may replay it under the
    /// new referrer.
    Finalized,
}

#[derive(Debug, Default)]
struct Sets {
    admitted: HashSet<String>,
    finalized: HashSet<String>,
}

/// Shared admission state for one crawl run.
#[derive(Debug, Default)]
pub struct Frontier {
    sets: Mutex<Sets>,
}

impl Frontier {
    /// Atomically checks membership and, when the URL is new, marks it
    /// admitted. Exactly one caller ever gets [`Admission::Admitted`] for
    /// a given canonical URL.
    pub fn try_admit(&self, url: &str) -> Admission {
        let mut sets = self.sets.lock().unwrap();
        if sets.finalized.contains(url) {
            return Admission::Finalized;
        }
        if !sets.admitted.insert(url.to_string()) {
            return Admission::InFlight;
        }
        Admission::Admitted
    }

    /// Marks a URL's outcome as recorded. Callers append the outcome record
    /// first, then finalize, so a finalized URL always has a stored result.
    pub fn finalize(&self, url: &str) {
        self.sets.lock().unwrap().finalized.insert(url.to_string());
    }
}
