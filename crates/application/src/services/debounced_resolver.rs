//! Debounced address resolution
//!
//! One resolver per address field. A keystroke schedules two independent
//! trailing-edge lookups: a suggestion search that fills the dropdown and a
//! map lookup that geocodes the typed text directly. Each lookup kind keeps
//! its own sequence number; a timer or a response may only touch the field
//! while its sequence number is still current.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::AddressField;
use domain::value_objects::{GeoLocation, ResolvedLocation};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::{GeocodeCandidate, GeocodingPort};

/// Quiet period before a suggestion search
pub const DEFAULT_SUGGEST_DELAY: Duration = Duration::from_millis(300);
/// Quiet period before a map lookup of the typed text
pub const DEFAULT_RESOLVE_DELAY: Duration = Duration::from_millis(800);
/// Shorter (trimmed) input never reaches a provider
pub const DEFAULT_MIN_QUERY_CHARS: usize = 3;
/// Suggestions requested per search
pub const DEFAULT_SUGGESTION_LIMIT: u8 = 5;

/// Resolver tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Debounce for suggestion searches
    pub suggest_delay: Duration,
    /// Debounce for map lookups
    pub resolve_delay: Duration,
    /// Minimum trimmed characters before any lookup
    pub min_query_chars: usize,
    /// Maximum suggestions per search
    pub suggestion_limit: u8,
    /// Geocode typed text without waiting for a selection
    pub auto_resolve: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            suggest_delay: DEFAULT_SUGGEST_DELAY,
            resolve_delay: DEFAULT_RESOLVE_DELAY,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            auto_resolve: true,
        }
    }
}

/// What a renderer needs to draw one address field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSnapshot {
    /// Text and resolution
    pub field: AddressField,
    /// Dropdown contents
    pub suggestions: Vec<GeocodeCandidate>,
    /// A lookup is scheduled or in flight
    pub loading: bool,
}

impl FieldSnapshot {
    /// Resolved coordinate, if any
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        self.field.resolved().map(ResolvedLocation::location)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupKind {
    Suggest,
    Resolve,
}

impl LookupKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Suggest => "suggest",
            Self::Resolve => "resolve",
        }
    }
}

#[derive(Debug, Default)]
struct LookupSlot {
    seq: u64,
    timer: Option<JoinHandle<()>>,
    busy: bool,
}

impl LookupSlot {
    /// Forget the pending timer and any issued request; returns the new sequence
    fn invalidate(&mut self) -> u64 {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.seq = self.seq.wrapping_add(1);
        self.busy = false;
        self.seq
    }
}

#[derive(Debug, Default)]
struct ResolverState {
    snapshot: FieldSnapshot,
    suggest: LookupSlot,
    resolve: LookupSlot,
}

impl ResolverState {
    fn slot_mut(&mut self, kind: LookupKind) -> &mut LookupSlot {
        match kind {
            LookupKind::Suggest => &mut self.suggest,
            LookupKind::Resolve => &mut self.resolve,
        }
    }

    fn cancel_lookups(&mut self) {
        self.suggest.invalidate();
        self.resolve.invalidate();
    }

    fn refresh_loading(&mut self) {
        self.snapshot.loading = self.suggest.busy || self.resolve.busy;
    }
}

struct Inner {
    name: String,
    suggester: Arc<dyn GeocodingPort>,
    locator: Arc<dyn GeocodingPort>,
    config: ResolverConfig,
    state: Mutex<ResolverState>,
    updates: watch::Sender<FieldSnapshot>,
}

impl Inner {
    fn publish(&self, state: &ResolverState) {
        self.updates.send_replace(state.snapshot.clone());
    }

    async fn run_lookup(&self, kind: LookupKind, ticket: u64, query: String) {
        let issued = {
            let mut state = self.state.lock();
            let slot = state.slot_mut(kind);
            if slot.seq != ticket {
                return;
            }
            // Fired: from here on the request is only ever discarded, never aborted
            slot.timer = None;
            slot.seq = slot.seq.wrapping_add(1);
            slot.seq
        };

        let (port, limit) = match kind {
            LookupKind::Suggest => (&self.suggester, self.config.suggestion_limit),
            LookupKind::Resolve => (&self.locator, 1),
        };
        debug!(field = %self.name, kind = kind.as_str(), seq = issued, query = %query, "Issuing lookup");
        let result = port.search(&query, limit).await;

        let mut state = self.state.lock();
        if state.slot_mut(kind).seq != issued {
            debug!(field = %self.name, kind = kind.as_str(), seq = issued, "Discarding stale lookup result");
            return;
        }
        state.slot_mut(kind).busy = false;

        match (kind, result) {
            (LookupKind::Suggest, Ok(candidates)) => {
                debug!(field = %self.name, count = candidates.len(), "Suggestions updated");
                state.snapshot.suggestions = candidates;
            },
            (LookupKind::Resolve, Ok(candidates)) => match candidates.first() {
                Some(best) => {
                    let resolved = best.to_lookup();
                    debug!(field = %self.name, location = %resolved.location(), "Address geocoded");
                    state.snapshot.field.apply_geocoded(resolved);
                },
                None => {
                    warn!(field = %self.name, query = %query, "No location found for address");
                    state.snapshot.suggestions.clear();
                    state.snapshot.field.clear_resolution();
                },
            },
            (LookupKind::Suggest, Err(e)) => {
                warn!(field = %self.name, error = %e, "Suggestion lookup failed");
                state.snapshot.suggestions.clear();
            },
            (LookupKind::Resolve, Err(e)) => {
                warn!(field = %self.name, error = %e, "Address lookup failed");
                state.snapshot.suggestions.clear();
                state.snapshot.field.clear_resolution();
            },
        }

        state.refresh_loading();
        self.publish(&state);
    }
}

/// Turns keystrokes on one address field into at most one lookup per quiet
/// period, and keeps only the newest answer.
///
/// Must be driven from within a Tokio runtime. Dropping the resolver cancels
/// its pending timers; requests already on the wire finish and are ignored.
pub struct DebouncedResolver {
    inner: Arc<Inner>,
}

impl fmt::Debug for DebouncedResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncedResolver")
            .field("name", &self.inner.name)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl DebouncedResolver {
    /// Create a resolver that uses one provider for both lookup kinds
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        geocoder: Arc<dyn GeocodingPort>,
        config: ResolverConfig,
    ) -> Self {
        Self::with_providers(name, Arc::clone(&geocoder), geocoder, config)
    }

    /// Create a resolver with separate suggestion and map lookup providers
    #[must_use]
    pub fn with_providers(
        name: impl Into<String>,
        suggester: Arc<dyn GeocodingPort>,
        locator: Arc<dyn GeocodingPort>,
        config: ResolverConfig,
    ) -> Self {
        let (updates, _) = watch::channel(FieldSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                suggester,
                locator,
                config,
                state: Mutex::new(ResolverState::default()),
                updates,
            }),
        }
    }

    /// Field name used in logs
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.inner.config
    }

    /// Handle a keystroke: store the text and restart the quiet periods
    pub fn on_input_change(&self, text: &str) {
        let mut state = self.inner.state.lock();
        state.snapshot.field.set_text(text);

        let query = text.trim();
        if query.chars().count() < self.inner.config.min_query_chars {
            state.cancel_lookups();
            state.snapshot.suggestions.clear();
        } else {
            self.schedule(&mut state, LookupKind::Suggest, query);
            if self.inner.config.auto_resolve {
                self.schedule(&mut state, LookupKind::Resolve, query);
            } else {
                state.resolve.invalidate();
            }
        }

        state.refresh_loading();
        self.inner.publish(&state);
    }

    /// Install an explicitly chosen location, cancelling any lookup
    pub fn on_location_select(&self, display_address: impl Into<String>, location: GeoLocation) {
        let resolved = ResolvedLocation::new(location, display_address);
        let mut state = self.inner.state.lock();
        self.apply_selection(&mut state, resolved);
    }

    /// Pick a suggestion from the current dropdown
    ///
    /// Returns `None` if `index` is out of range.
    pub fn select_suggestion(&self, index: usize) -> Option<ResolvedLocation> {
        let mut state = self.inner.state.lock();
        let resolved = state.snapshot.suggestions.get(index)?.to_selection();
        self.apply_selection(&mut state, resolved.clone());
        Some(resolved)
    }

    /// Reset the field
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        state.cancel_lookups();
        state.snapshot.field.clear();
        state.snapshot.suggestions.clear();
        state.refresh_loading();
        self.inner.publish(&state);
    }

    /// Current state of the field
    #[must_use]
    pub fn snapshot(&self) -> FieldSnapshot {
        self.inner.state.lock().snapshot.clone()
    }

    /// Receive every published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FieldSnapshot> {
        self.inner.updates.subscribe()
    }

    /// Wait until no lookup is pending or in flight, or until `timeout`
    pub async fn settled(&self, timeout: Duration) -> FieldSnapshot {
        let mut updates = self.subscribe();
        let wait = async {
            loop {
                if !updates.borrow_and_update().loading {
                    break;
                }
                if updates.changed().await.is_err() {
                    break;
                }
            }
        };
        if tokio::time::timeout(timeout, wait).await.is_err() {
            debug!(field = %self.inner.name, "Timed out waiting for lookups to settle");
        }
        self.snapshot()
    }

    /// Cancel pending timers and ignore any response still on the wire
    pub fn shutdown(&self) {
        let mut state = self.inner.state.lock();
        state.cancel_lookups();
        state.refresh_loading();
        self.inner.publish(&state);
    }

    fn apply_selection(&self, state: &mut ResolverState, resolved: ResolvedLocation) {
        state.cancel_lookups();
        debug!(field = %self.inner.name, location = %resolved.location(), "Location selected");
        state.snapshot.field.select(resolved);
        state.snapshot.suggestions.clear();
        state.refresh_loading();
        self.inner.publish(state);
    }

    fn schedule(&self, state: &mut ResolverState, kind: LookupKind, query: &str) {
        let delay = match kind {
            LookupKind::Suggest => self.inner.config.suggest_delay,
            LookupKind::Resolve => self.inner.config.resolve_delay,
        };
        let slot = state.slot_mut(kind);
        let ticket = slot.invalidate();
        slot.busy = true;

        let inner = Arc::clone(&self.inner);
        let query = query.to_string();
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.run_lookup(kind, ticket, query).await;
        }));
    }
}

impl Drop for DebouncedResolver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
