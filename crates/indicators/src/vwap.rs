use crate::Indicator;

/// Number of leading timestamp characters forming the session key
/// (`YYYY-MM-DD` for ISO-like timestamps).
pub const SESSION_KEY_LEN: usize = 10;

/// Session key of a timestamp: its first [`SESSION_KEY_LEN`] characters, or
/// the whole timestamp when shorter. The date is never parsed, only compared.
pub fn session_key(timestamp: &str) -> &str {
    match timestamp.char_indices().nth(SESSION_KEY_LEN) {
        Some((idx, _)) => &timestamp[..idx],
        None => timestamp,
    }
}

/// One trade fed to [`Vwap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VwapInput<'a> {
    pub price: f64,
    pub volume: i64,
    pub timestamp: &'a str,
}

/// Volume Weighted Average Price (VWAP).
///
/// Resets each session: the accumulators are zeroed whenever the session key
/// derived from the trade timestamp changes.
#[derive(Debug, Clone, Default)]
pub struct Vwap {
    cumulative_pv: f64,
    cumulative_vol: i64,
    session: String,
    sessions: usize,
}

impl Vwap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key of the session currently being accumulated.
    pub fn session(&self) -> &str {
        &self.session
    }

    /// Number of sessions started so far.
    pub fn sessions(&self) -> usize {
        self.sessions
    }

    fn start_session(&mut self, key: &str) {
        self.cumulative_pv = 0.0;
        self.cumulative_vol = 0;
        self.session.clear();
        self.session.push_str(key);
        self.sessions += 1;
    }
}

impl Indicator for Vwap {
    type Input<'a> = VwapInput<'a>;

    fn update(&mut self, trade: VwapInput<'_>) {
        let key = session_key(trade.timestamp);
        if key != self.session || self.sessions == 0 {
            self.start_session(key);
        }
        self.cumulative_pv += trade.price * trade.volume as f64;
        self.cumulative_vol = self.cumulative_vol.saturating_add(trade.volume);
    }

    fn value(&self) -> f64 {
        if self.cumulative_vol == 0 {
            return 0.0;
        }
        self.cumulative_pv / self.cumulative_vol as f64
    }

    fn reset(&mut self) {
        self.cumulative_pv = 0.0;
        self.cumulative_vol = 0;
        self.session.clear();
        self.sessions = 0;
    }

    fn period(&self) -> usize {
        1
    }

    fn is_ready(&self) -> bool {
        self.cumulative_vol != 0
    }
}
