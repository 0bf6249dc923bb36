use std::collections::HashMap;
use std::sync::Arc;
use tickstats_core::IndicatorParams;
use tickstats_indicators::Series;
use tracing::debug;

/// Owns one [`Series`] per symbol, created lazily on first sighting.
///
/// Series are kept in first-seen order. Symbols are never removed.
#[derive(Debug, Clone)]
pub struct SeriesRegistry {
    params: IndicatorParams,
    index: HashMap<Arc<str>, usize>,
    entries: Vec<(Arc<str>, Series)>,
}

impl SeriesRegistry {
    pub fn new(params: IndicatorParams) -> Self {
        Self {
            params,
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// The series for `symbol`, creating it from the shared parameters if
    /// this is the first time the symbol is seen. Lookups of known symbols
    /// do not allocate.
    pub fn get_or_create(&mut self, symbol: &str) -> &mut Series {
        let idx = match self.index.get(symbol) {
            Some(&idx) => idx,
            None => {
                let key: Arc<str> = Arc::from(symbol);
                let idx = self.entries.len();
                self.entries
                    .push((Arc::clone(&key), Series::new(&self.params)));
                self.index.insert(key, idx);
                debug!(symbol, total = idx + 1, "Created series");
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, symbol: &str) -> Option<&Series> {
        self.index.get(symbol).map(|&idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known symbols in first-seen order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(symbol, _)| symbol.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series)> + '_ {
        self.entries
            .iter()
            .map(|(symbol, series)| (symbol.as_ref(), series))
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }
}
