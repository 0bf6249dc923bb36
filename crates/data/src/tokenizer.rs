//! Zero-copy comma tokenizer.
//!
//! Fields are returned as byte spans into the caller's line; resolving a span
//! borrows from that line, so nothing outlives the buffer it came from.

/// Number of comma-separated fields in one trade record.
pub const RECORD_FIELDS: usize = 4;

/// A field's position within a line. Holds no data of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSpan {
    pub start: usize,
    pub len: usize,
}

impl FieldSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Resolve the span against the line it was produced from.
    ///
    /// Spans only ever start and end next to an ASCII comma or at the line
    /// ends, so the slice is always on a char boundary.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end()]
    }
}

/// Up to `N` spans from one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields<const N: usize> {
    spans: [FieldSpan; N],
    count: usize,
}

impl<const N: usize> Fields<N> {
    /// Number of fields found, at most `N`.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// True when all `N` fields were found.
    pub fn is_complete(&self) -> bool {
        self.count == N
    }

    pub fn spans(&self) -> &[FieldSpan] {
        &self.spans[..self.count]
    }

    pub fn get(&self, index: usize) -> Option<FieldSpan> {
        self.spans().get(index).copied()
    }
}

/// Split `line` on `,` into at most `N` fields.
///
/// The last field runs to the end of the line, so surplus commas stay inside
/// it. A line with fewer than `N - 1` commas yields a short field set; an
/// empty line yields a single empty field.
pub fn tokenize<const N: usize>(line: &str) -> Fields<N> {
    let mut fields = Fields {
        spans: [FieldSpan::default(); N],
        count: 0,
    };
    if N == 0 {
        return fields;
    }

    let mut start = 0;
    for (i, byte) in line.bytes().enumerate() {
        if fields.count == N - 1 {
            break;
        }
        if byte == b',' {
            fields.spans[fields.count] = FieldSpan {
                start,
                len: i - start,
            };
            fields.count += 1;
            start = i + 1;
        }
    }
    fields.spans[fields.count] = FieldSpan {
        start,
        len: line.len() - start,
    };
    fields.count += 1;
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve<'a, const N: usize>(line: &'a str, fields: &Fields<N>) -> Vec<&'a str> {
        fields.spans().iter().map(|s| s.slice(line)).collect()
    }

    #[test]
    fn test_four_fields() {
        let line = "2024-01-15 09:30:00,AAPL,150.25,1000000";
        let fields = tokenize::<RECORD_FIELDS>(line);
        assert!(fields.is_complete());
        assert_eq!(
            resolve(line, &fields),
            vec!["2024-01-15 09:30:00", "AAPL", "150.25", "1000000"]
        );
    }

    #[test]
    fn test_empty_line_is_one_empty_field() {
        let fields = tokenize::<RECORD_FIELDS>("");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(0), Some(FieldSpan { start: 0, len: 0 }));
        assert!(!fields.is_complete());
    }

    #[test]
    fn test_short_line() {
        let line = "t,AAPL,1.0";
        let fields = tokenize::<RECORD_FIELDS>(line);
        assert_eq!(fields.len(), 3);
        assert_eq!(resolve(line, &fields), vec!["t", "AAPL", "1.0"]);
    }

    #[test]
    fn test_surplus_commas_stay_in_last_field() {
        let line = "t,AAPL,1.0,10,extra";
        let fields = tokenize::<RECORD_FIELDS>(line);
        assert!(fields.is_complete());
        assert_eq!(fields.get(3).map(|s| s.slice(line)), Some("10,extra"));
    }

    #[test]
    fn test_trailing_comma_gives_empty_last_field() {
        let line = "t,AAPL,1.0,";
        let fields = tokenize::<RECORD_FIELDS>(line);
        assert!(fields.is_complete());
        assert_eq!(fields.get(3).map(|s| s.slice(line)), Some(""));
    }

    #[test]
    fn test_spans_cover_line_contiguously() {
        let line = "a,bb,,dddd,e";
        let fields = tokenize::<RECORD_FIELDS>(line);
        let spans = fields.spans();
        assert_eq!(spans[0].start, 0);
        for pair in spans.windows(2) {
            // Exactly one comma between neighbours.
            assert_eq!(pair[0].end() + 1, pair[1].start);
        }
        assert_eq!(spans.last().map(|s| s.end()), Some(line.len()));
    }

    #[test]
    fn test_multibyte_fields() {
        let line = "2024-01-01,日経,1.5,2";
        let fields = tokenize::<RECORD_FIELDS>(line);
        assert_eq!(fields.get(1).map(|s| s.slice(line)), Some("日経"));
    }
}
