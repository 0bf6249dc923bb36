use crate::tokenizer::{tokenize, RECORD_FIELDS};
use tickstats_core::{ParseError, ParsedRecord};

/// Parse one `timestamp,symbol,price,volume` line.
///
/// `timestamp` and `symbol` are taken verbatim. `price` must be a float
/// literal and `volume` an integer literal, each consuming its whole field:
/// no surrounding whitespace, no trailing characters. Malformed input is an
/// ordinary `Err`, never a panic.
pub fn parse_record(line: &str) -> Result<ParsedRecord<'_>, ParseError> {
    let fields = tokenize::<RECORD_FIELDS>(line);
    let spans = fields.spans();
    let [timestamp, symbol, price, volume] = spans else {
        return Err(ParseError::FieldCount {
            found: fields.len(),
        });
    };

    let volume = volume.slice(line);
    if volume.contains(',') {
        return Err(ParseError::FieldCount {
            found: RECORD_FIELDS + volume.matches(',').count(),
        });
    }

    let price_str = price.slice(line);
    let price: f64 = price_str
        .parse()
        .map_err(|_| ParseError::Price(price_str.to_string()))?;
    // Integer volumes take an optional `-` only; `str::parse` would also
    // accept a leading `+`.
    if volume.starts_with('+') {
        return Err(ParseError::Volume(volume.to_string()));
    }
    let volume: i64 = volume
        .parse()
        .map_err(|_| ParseError::Volume(volume.to_string()))?;

    Ok(ParsedRecord {
        timestamp: timestamp.slice(line),
        symbol: symbol.slice(line),
        price,
        volume,
    })
}
