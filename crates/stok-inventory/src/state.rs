//! Per-screen view state and its transition function.

/// Lifecycle phase of a data screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No fetch has run yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last applied fetch succeeded.
    Ready,
    /// The last applied fetch failed.
    Failed,
}

/// The in-memory view snapshot for one screen.
///
/// Rows survive both a new fetch starting and a fetch failing: previously
/// loaded data stays visible underneath a loading indicator or an error
/// message, and is only replaced wholesale by a successful fetch.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    /// Current lifecycle phase.
    pub phase: Phase,
    /// The loaded rows.
    pub rows: Vec<T>,
    /// Surfaced error message, static prefix included.
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            rows: Vec::new(),
            error: None,
        }
    }
}

impl<T> ViewState<T> {
    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

/// A state transition input.
#[derive(Debug, Clone)]
pub enum ViewAction<T> {
    /// A fetch was started (initial mount or explicit refresh).
    FetchStarted,
    /// A fetch resolved with normalized rows.
    FetchSucceeded(Vec<T>),
    /// A fetch resolved with an error message.
    FetchFailed(String),
}

/// Apply an action to the view state.
///
/// There is no request-generation guard: overlapping fetches are legal,
/// and the state reflects whichever result is applied last, not
/// necessarily the most recently requested one. Callers that start a
/// second fetch while one is in flight accept that hazard.
pub fn reduce<T>(state: &mut ViewState<T>, action: ViewAction<T>) {
    match action {
        ViewAction::FetchStarted => {
            state.phase = Phase::Loading;
            state.error = None;
        }
        ViewAction::FetchSucceeded(rows) => {
            state.phase = Phase::Ready;
            state.rows = rows;
            state.error = None;
        }
        ViewAction::FetchFailed(message) => {
            state.phase = Phase::Failed;
            state.error = Some(message);
        }
    }
}
