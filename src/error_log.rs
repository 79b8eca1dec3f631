//! The error log: one `"<terms> <residual>"` line per sweep iteration. Residuals are written in
//! their shortest round-trip form with a `.` decimal separator; older logs written with a `,`
//! separator are still readable.
use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use log::debug;

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepSample {
    pub terms: u32,
    pub residual: f64,
}

impl fmt::Display for SweepSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.terms, self.residual)
    }
}

/// Writes samples as they come. Every line is flushed right away so whatever was recorded
/// before a failure stays on disk.
pub struct ErrorLog<W: Write> {
    out: W,
    written: usize,
}

impl ErrorLog<BufWriter<File>> {
    /// Creates (or truncates) the log at `path`, along with any missing parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<ErrorLog<BufWriter<File>>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Couldn't create the directory '{}'", parent.display())
            })?;
        }
        let file = File::create(path)
            .with_context(|| format!("Couldn't create the error log '{}'", path.display()))?;
        debug!("Writing error log to '{}'", path.display());
        Ok(ErrorLog::new(BufWriter::new(file)))
    }
}

impl<W: Write> ErrorLog<W> {
    pub fn new(out: W) -> ErrorLog<W> {
        ErrorLog { out, written: 0 }
    }

    pub fn record(&mut self, sample: SweepSample) -> Result<()> {
        writeln!(self.out, "{}", sample)
            .and_then(|_| self.out.flush())
            .with_context(|| format!("Couldn't write sample '{}' to the error log", sample))?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

fn parse_line(line: &str) -> Result<SweepSample> {
    let (terms, residual) = line
        .split_whitespace()
        .collect_tuple()
        .ok_or_else(|| anyhow!("Expected '<terms> <residual>', got '{}'", line))?;
    Ok(SweepSample {
        terms: terms
            .parse()
            .with_context(|| format!("Term count '{}' isn't an unsigned integer", terms))?,
        residual: residual
            .replace(',', ".")
            .parse()
            .with_context(|| format!("Residual '{}' isn't a number", residual))?,
    })
}

/// Parses a whole log. Blank lines and lines starting with `#` are skipped.
pub fn parse_log(content: &str) -> Result<Vec<SweepSample>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| parse_line(line).with_context(|| format!("Error log line {}", number)))
        .collect()
}

pub fn read_log<P: AsRef<Path>>(path: P) -> Result<Vec<SweepSample>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Couldn't read the error log '{}'", path.display()))?;
    parse_log(&content).with_context(|| format!("Malformed error log '{}'", path.display()))
}

/// The sample with the smallest residual. Ties go to the fewest terms.
pub fn best(samples: &[SweepSample]) -> Option<SweepSample> {
    samples
        .iter()
        .copied()
        .filter(|s| !s.residual.is_nan())
        .min_by(|a, b| {
            a.residual
                .total_cmp(&b.residual)
                .then(a.terms.cmp(&b.terms))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample(terms: u32, residual: f64) -> SweepSample {
        SweepSample { terms, residual }
    }

    #[rstest]
    fn lines_have_two_columns() {
        let mut log = ErrorLog::new(Vec::new());
        log.record(sample(1, 1767.9177828795446)).unwrap();
        log.record(sample(17, 0.5)).unwrap();
        log.record(sample(4, 3.0)).unwrap();
        assert_eq!(log.written(), 3);
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(text, "1 1767.9177828795446\n17 0.5\n4 3\n");
    }

    #[rstest]
    fn written_lines_parse_back() {
        let samples = vec![sample(1, 1767.9177828795446), sample(2, 159.06845214052532)];
        let mut log = ErrorLog::new(Vec::new());
        for s in &samples {
            log.record(*s).unwrap();
        }
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(parse_log(&text).unwrap(), samples);
    }

    #[rstest]
    fn comments_blanks_and_commas() {
        let text = "# n err\n\n1 1767,91\n  2   159.06 \n";
        assert_eq!(
            parse_log(text).unwrap(),
            vec![sample(1, 1767.91), sample(2, 159.06)]
        );
    }

    #[rstest]
    #[case("1")]
    #[case("1 2 3")]
    #[case("x 2.0")]
    #[case("-1 2.0")]
    #[case("3 abc")]
    fn malformed_lines_are_errors(#[case] line: &str) {
        let text = format!("1 2.0\n{}\n", line);
        let err = parse_log(&text).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"), "{:#}", err);
    }

    #[rstest]
    fn best_prefers_smallest_residual_then_fewest_terms() {
        let samples = vec![
            sample(1, 1767.9),
            sample(8, 0.638),
            sample(9, 0.638),
            sample(3, f64::NAN),
        ];
        assert_eq!(best(&samples), Some(sample(8, 0.638)));
        assert_eq!(best(&[]), None);
    }

    #[rstest]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result").join("data.txt");
        let mut log = ErrorLog::create(&path).unwrap();
        log.record(sample(1, 2.5)).unwrap();
        drop(log);
        assert_eq!(read_log(&path).unwrap(), vec![sample(1, 2.5)]);
    }

    #[rstest]
    fn missing_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_log(dir.path().join("nope.txt")).is_err());
    }
}
