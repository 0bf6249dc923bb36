use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tickstats_core::{LineSource, StreamError};
use tracing::debug;

/// Reads lines from any `BufRead`, reusing one buffer for the whole stream.
///
/// Line terminators (`\n` or `\r\n`) are stripped. Invalid UTF-8 is replaced
/// lossily rather than aborting the stream; such a line will simply fail to
/// parse downstream.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    text: String,
    line_no: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
            text: String::with_capacity(256),
            line_no: 0,
        }
    }

    /// 1-based number of the line most recently returned.
    pub fn line_no(&self) -> u64 {
        self.line_no
    }
}

impl LineReader<Box<dyn BufRead>> {
    /// Open `path`, or standard input when `path` is `-`.
    pub fn open(path: &Path) -> io::Result<Self> {
        let reader: Box<dyn BufRead> = if path == Path::new("-") {
            debug!("Reading from stdin");
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = File::open(path)?;
            debug!(path = %path.display(), "Opened input file");
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> Result<Option<&str>, StreamError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        self.text.clear();
        match std::str::from_utf8(&self.buf) {
            Ok(s) => self.text.push_str(s),
            Err(_) => {
                debug!(line = self.line_no, "Replacing invalid UTF-8 in input line");
                self.text.push_str(&String::from_utf8_lossy(&self.buf));
            }
        }
        Ok(Some(&self.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn collect<S: LineSource>(source: &mut S) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line.to_string());
        }
        lines
    }

    #[test]
    fn test_strips_terminators() {
        let input: &[u8] = b"a,b\r\nc,d\n\nlast";
        let mut reader = LineReader::new(input);
        assert_eq!(collect(&mut reader), vec!["a,b", "c,d", "", "last"]);
        assert_eq!(reader.line_no(), 4);
    }

    #[test]
    fn test_empty_input() {
        let input: &[u8] = b"";
        let mut reader = LineReader::new(input);
        assert!(reader.next_line().unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let input: &[u8] = b"t,\xff,1,1\n";
        let mut reader = LineReader::new(input);
        assert_eq!(reader.next_line().unwrap(), Some("t,\u{fffd},1,1"));
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2024-01-01,AAPL,1.5,10").unwrap();
        writeln!(file, "2024-01-01,MSFT,2.5,20").unwrap();

        let mut reader = LineReader::open(file.path()).unwrap();
        assert_eq!(
            collect(&mut reader),
            vec!["2024-01-01,AAPL,1.5,10", "2024-01-01,MSFT,2.5,20"]
        );
    }

    #[test]
    fn test_open_missing_file() {
        let err = LineReader::open(Path::new("/definitely/not/here.csv"))
            .err()
            .unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
