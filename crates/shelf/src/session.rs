//! Ordering of overlapping searches.
//!
//! When searches are issued faster than they complete (e.g. a search per keystroke), an older,
//! slower response must not replace the results of a newer one. A [`SearchSession`] hands out a
//! [`Ticket`] per search and only the newest ticket is current.
use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

use crate::{api::Client, model::Book, Catalog, Error};

/// Identifies one search within a [`SearchSession`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// The result of a search issued through a [`SearchSession`].
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// No newer search started while this one was in flight.
    Current(Vec<Book>),
    /// A newer search started; these results are stale and were discarded.
    Superseded,
}

/// Tracks the newest search so stale results can be discarded. Can be shared between threads.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
}

impl SearchSession {
    /// Creates a session with no searches issued.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new search, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the newest search.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Runs [`Catalog::search`] under a new ticket.
    ///
    /// # Errors
    ///
    /// [`Error::Search`] is returned when the search fails and is still current. The failure of a
    /// superseded search is reported as [`SearchOutcome::Superseded`].
    pub fn search<C: Client>(
        &self,
        catalog: &Catalog<C>,
        query: &str,
    ) -> Result<SearchOutcome, Error> {
        let ticket = self.begin();
        let res = catalog.search(query);

        if self.is_current(ticket) {
            res.map(SearchOutcome::Current)
        } else {
            trace!("Discarding results of superseded search for '{query}'");
            Ok(SearchOutcome::Superseded)
        }
    }
}
