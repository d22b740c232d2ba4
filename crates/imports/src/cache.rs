use crate::identity::ImportIdentity;
use crate::provider::ContentProvider;
use crate::staleness::StalenessToken;
use crate::stats::{CacheCounters, CacheStats};
use pagegen_chunks::{ChunkError, ChunkTree, TemplateParser, TreeOrigin};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Outcome of resolving one import-file identity
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The file exists and parsed cleanly
    Tree(Arc<ChunkTree>),

    /// The file does not exist; it contributes zero chunks
    Absent,

    /// The file exists but could not be parsed (or read); non-fatal, it
    /// contributes zero chunks and a diagnostic
    ParseFailed(ChunkError),
}

#[derive(Debug, Clone)]
struct Entry {
    token: StalenessToken,
    outcome: Resolved,
}

enum Slot {
    Ready(Entry),
    InFlight(watch::Receiver<Option<Entry>>),
}

struct CacheInner {
    provider: Arc<dyn ContentProvider>,
    parser: Arc<dyn TemplateParser>,
    slots: Mutex<HashMap<ImportIdentity, Slot>>,
    counters: CacheCounters,
}

/// Identity-keyed cache of parsed import-file chunk trees.
///
/// Shared by every page compilation in a session. Each request revalidates
/// the entry's staleness token against the provider; entries are recomputed
/// when the token changed and are never proactively evicted. Absence and
/// parse failures are cached the same way as successful trees.
///
/// At most one resolution is in flight per identity: concurrent requesters
/// coalesce onto it and all observe the same result. The resolution itself
/// runs on a detached task, so a coalesced waiter that is cancelled never
/// aborts the parse for the others.
#[derive(Clone)]
pub struct ChunkTreeCache {
    inner: Arc<CacheInner>,
}

impl ChunkTreeCache {
    pub fn new(provider: Arc<dyn ContentProvider>, parser: Arc<dyn TemplateParser>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                provider,
                parser,
                slots: Mutex::new(HashMap::new()),
                counters: CacheCounters::default(),
            }),
        }
    }

    /// Resolve `identity` to its current chunk tree, absence, or failure
    pub async fn get(&self, identity: &ImportIdentity) -> Resolved {
        loop {
            let step = self.claim(identity);
            match step {
                Step::Wait(rx) => {
                    if let Some(entry) = wait_for_entry(rx).await {
                        return entry.outcome;
                    }
                    // resolver died without publishing; re-claim
                }
                Step::Validate(entry) => {
                    let current = self.inner.provider.staleness_token(identity).await;
                    match current {
                        Ok(token) if token == entry.token => {
                            self.inner.counters.record_hit();
                            return entry.outcome;
                        }
                        _ => {
                            self.inner.counters.record_revalidation();
                            if let Some(rx) = self.reclaim_stale(identity, &entry.token) {
                                if let Some(entry) = wait_for_entry(rx).await {
                                    return entry.outcome;
                                }
                            }
                            // lost the race to another refresher; re-claim
                        }
                    }
                }
            }
        }
    }

    /// Point-in-time snapshot of cache activity
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.counters.snapshot()
    }

    /// Examine the slot for `identity`, spawning a resolver on a miss
    fn claim(&self, identity: &ImportIdentity) -> Step {
        let mut slots = self
            .inner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match slots.get(identity) {
            None => {
                self.inner.counters.record_miss();
                let rx = spawn_resolver(&self.inner, identity.clone());
                slots.insert(identity.clone(), Slot::InFlight(rx.clone()));
                Step::Wait(rx)
            }
            Some(Slot::InFlight(rx)) => {
                if rx.borrow().is_none() && rx.has_changed().is_err() {
                    // resolver task died; replace it
                    let rx = spawn_resolver(&self.inner, identity.clone());
                    slots.insert(identity.clone(), Slot::InFlight(rx.clone()));
                    Step::Wait(rx)
                } else {
                    self.inner.counters.record_coalesced_wait();
                    Step::Wait(rx.clone())
                }
            }
            Some(Slot::Ready(entry)) => Step::Validate(entry.clone()),
        }
    }

    /// Swap a stale ready entry for a fresh in-flight resolution.
    ///
    /// Returns `None` when another caller already refreshed the slot, in
    /// which case the caller re-claims and coalesces onto that resolution.
    fn reclaim_stale(
        &self,
        identity: &ImportIdentity,
        stale_token: &StalenessToken,
    ) -> Option<watch::Receiver<Option<Entry>>> {
        let mut slots = self
            .inner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match slots.get(identity) {
            Some(Slot::Ready(current)) if current.token == *stale_token => {
                let rx = spawn_resolver(&self.inner, identity.clone());
                slots.insert(identity.clone(), Slot::InFlight(rx.clone()));
                Some(rx)
            }
            _ => None,
        }
    }
}

enum Step {
    Wait(watch::Receiver<Option<Entry>>),
    Validate(Entry),
}

async fn wait_for_entry(mut rx: watch::Receiver<Option<Entry>>) -> Option<Entry> {
    loop {
        if let Some(entry) = rx.borrow().clone() {
            return Some(entry);
        }
        if rx.changed().await.is_err() {
            // sender dropped without publishing
            return rx.borrow().clone();
        }
    }
}

/// Spawn the single resolver task for `identity`.
///
/// Detached on purpose: waiters may be cancelled, the resolution must not
/// be. The task publishes through the watch channel and flips the slot to
/// `Ready` when done.
fn spawn_resolver(
    inner: &Arc<CacheInner>,
    identity: ImportIdentity,
) -> watch::Receiver<Option<Entry>> {
    let (tx, rx) = watch::channel(None);
    let inner = Arc::clone(inner);
    tokio::spawn(async move {
        let entry = resolve_entry(&inner, &identity).await;
        {
            let mut slots = inner
                .slots
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            slots.insert(identity.clone(), Slot::Ready(entry.clone()));
        }
        let _ = tx.send(Some(entry));
    });
    rx
}

async fn resolve_entry(inner: &CacheInner, identity: &ImportIdentity) -> Entry {
    let exists = match inner.provider.exists(identity).await {
        Ok(exists) => exists,
        Err(e) => return unreadable(identity, &e.to_string()),
    };
    if !exists {
        log::debug!("import file absent: {identity}");
        return Entry {
            token: StalenessToken::Missing,
            outcome: Resolved::Absent,
        };
    }

    let token = match inner.provider.staleness_token(identity).await {
        Ok(token) => token,
        Err(e) => return unreadable(identity, &e.to_string()),
    };
    let content = match inner.provider.read(identity).await {
        Ok(content) => content,
        Err(e) => return unreadable(identity, &e.to_string()),
    };

    inner.counters.record_parse();
    let origin = TreeOrigin::file(identity.as_str());
    let outcome = match inner.parser.parse(origin, &content) {
        Ok(tree) => {
            log::debug!("parsed {} chunks from {identity}", tree.len());
            Resolved::Tree(Arc::new(tree))
        }
        Err(e) => {
            log::warn!("import file failed to parse: {identity}: {e}");
            Resolved::ParseFailed(e)
        }
    };
    Entry { token, outcome }
}

fn unreadable(identity: &ImportIdentity, message: &str) -> Entry {
    log::warn!("import file unreadable: {identity}: {message}");
    Entry {
        token: StalenessToken::Missing,
        outcome: Resolved::ParseFailed(ChunkError::unreadable(message)),
    }
}
