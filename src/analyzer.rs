use rayon::prelude::*;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::parser::{LineFormatError, LineParser};
use crate::report::{render_report, write_report};
use crate::stats::{AggregateState, AnalysisOutcome};

/// Reads one line into `buf`, terminator excluded. A line ends at `\n`, `\r`
/// or `\r\n`. Returns `false` once the reader is exhausted.
fn read_line_bytes<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    let mut read_any = false;
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(read_any);
        }
        read_any = true;

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let terminator = available[end];
                buf.extend_from_slice(&available[..end]);
                reader.consume(end + 1);
                if terminator == b'\r' && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(true);
            }
            None => {
                let len = available.len();
                buf.extend_from_slice(available);
                reader.consume(len);
            }
        }
    }
}

fn decode_line(buf: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(buf)
}

fn log_rejection(line_number: u64, line: &str, reason: LineFormatError) {
    warn!(
        action = "reject",
        component = "line_parser",
        line_number = line_number,
        reason = %reason,
        "Invalid email format found: {}",
        line
    );
}

/// Single streaming pass. Rejections are logged as they are read.
pub fn analyze_reader<R: BufRead>(mut reader: R, parser: &LineParser) -> Result<AnalysisOutcome> {
    let start_time = Instant::now();
    debug!(
        action = "start",
        component = "line_processing",
        mode = "sequential",
        "Starting line processing"
    );

    let mut outcome = AnalysisOutcome::default();
    let mut buf = Vec::new();

    while read_line_bytes(&mut reader, &mut buf).map_err(AnalyzerError::Read)? {
        outcome.lines_read += 1;
        let line = decode_line(&buf);
        match parser.parse_line(&line) {
            Ok(record) => outcome.state.record_parsed(record),
            Err(reason) => {
                outcome.lines_rejected += 1;
                log_rejection(outcome.lines_read, &line, reason);
            }
        }
    }

    debug!(
        action = "complete",
        component = "line_processing",
        lines_read = outcome.lines_read,
        lines_rejected = outcome.lines_rejected,
        duration_ms = start_time.elapsed().as_millis(),
        "Line processing completed"
    );
    Ok(outcome)
}

pub fn read_lines<R: BufRead>(mut reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    while read_line_bytes(&mut reader, &mut buf).map_err(AnalyzerError::Read)? {
        lines.push(decode_line(&buf).into_owned());
    }
    Ok(lines)
}

/// Parses on a dedicated pool of `workers` threads. Each worker folds into its
/// own partial state; partials are merged afterwards and rejections are logged
/// in input order.
pub fn analyze_lines_parallel(
    lines: &[String],
    parser: &LineParser,
    workers: usize,
) -> Result<AnalysisOutcome> {
    let start_time = Instant::now();
    debug!(
        action = "start",
        component = "line_processing",
        mode = "parallel",
        workers = workers,
        line_count = lines.len(),
        "Starting line processing"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;

    let partials: Vec<(AggregateState, Vec<(usize, LineFormatError)>)> = pool.install(|| {
        lines
            .par_iter()
            .enumerate()
            .fold(
                || (AggregateState::new(), Vec::new()),
                |(mut state, mut rejected), (index, line)| {
                    match parser.parse_line(line) {
                        Ok(record) => state.record_parsed(record),
                        Err(reason) => rejected.push((index, reason)),
                    }
                    (state, rejected)
                },
            )
            .collect()
    });

    let mut outcome = AnalysisOutcome {
        lines_read: lines.len() as u64,
        ..AnalysisOutcome::default()
    };
    let mut rejected = Vec::new();
    for (state, partial_rejected) in partials {
        outcome.state.merge(state);
        rejected.extend(partial_rejected);
    }

    rejected.sort_unstable_by_key(|(index, _)| *index);
    for (index, reason) in &rejected {
        log_rejection(*index as u64 + 1, &lines[*index], *reason);
    }
    outcome.lines_rejected = rejected.len() as u64;

    debug!(
        action = "complete",
        component = "line_processing",
        lines_read = outcome.lines_read,
        lines_rejected = outcome.lines_rejected,
        duration_ms = start_time.elapsed().as_millis(),
        "Line processing completed"
    );
    Ok(outcome)
}

/// Reads the input, aggregates it and writes the report. The report file is
/// created before processing starts, so a fatal read leaves it empty.
pub fn run(config: &AnalyzerConfig) -> Result<AnalysisOutcome> {
    let total_start_time = Instant::now();
    debug!(action = "start", component = "analysis", config = ?config, "Starting email analysis");

    let parser = LineParser::new()?;

    let input = File::open(&config.input_path).map_err(|source| AnalyzerError::OpenInput {
        path: config.input_path.clone(),
        source,
    })?;
    let reader = BufReader::new(input);

    let output =
        File::create(&config.output_path).map_err(|source| AnalyzerError::CreateReport {
            path: config.output_path.clone(),
            source,
        })?;
    let mut writer = BufWriter::new(output);

    let outcome = match config.workers {
        Some(workers) if workers > 1 => {
            let lines = read_lines(reader)?;
            analyze_lines_parallel(&lines, &parser, workers)?
        }
        _ => analyze_reader(reader, &parser)?,
    };

    let report = render_report(&outcome.state, &config.report);
    write_report(&mut writer, &report).map_err(AnalyzerError::Write)?;

    info!(
        action = "complete",
        component = "report",
        total_emails = outcome.state.total_emails,
        lines_rejected = outcome.lines_rejected,
        "Email analysis report generated successfully."
    );
    debug!(
        action = "complete",
        component = "analysis",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "[Hello] [user@example.com]\n\
                          no brackets here\n\
                          [Hello] [ann@example.com]\r\n\
                          [World] [bob@other.org]\n\
                          [only one]";

    #[test]
    fn sequential_counts_and_invariant() {
        let parser = LineParser::new().unwrap();
        let outcome = analyze_reader(Cursor::new(SAMPLE), &parser).unwrap();

        assert_eq!(outcome.lines_read, 5);
        assert_eq!(outcome.lines_rejected, 2);
        assert_eq!(outcome.state.total_emails, 3);
        assert_eq!(
            outcome.state.total_emails + outcome.lines_rejected,
            outcome.lines_read
        );
        assert!(outcome.state.is_consistent());
        assert_eq!(outcome.state.domain_counts["example.com"], 2);
        assert_eq!(outcome.state.subject_keyword_counts["World"], 1);
    }

    #[test]
    fn parallel_matches_sequential() {
        let parser = LineParser::new().unwrap();
        let sequential = analyze_reader(Cursor::new(SAMPLE), &parser).unwrap();

        let lines = read_lines(Cursor::new(SAMPLE)).unwrap();
        let parallel = analyze_lines_parallel(&lines, &parser, 4).unwrap();

        assert_eq!(parallel.state, sequential.state);
        assert_eq!(parallel.lines_read, sequential.lines_read);
        assert_eq!(parallel.lines_rejected, sequential.lines_rejected);
    }

    #[test]
    fn splits_on_every_terminator_style() {
        let lines = read_lines(Cursor::new("a\nb\r\nc\rd\r\re")).unwrap();
        assert_eq!(lines, vec!["a", "b", "c", "d", "", "e"]);

        let lines = read_lines(Cursor::new("only\n")).unwrap();
        assert_eq!(lines, vec!["only"]);
    }

    #[test]
    fn crlf_split_across_buffer_refill() {
        let reader = BufReader::with_capacity(4, Cursor::new("abc\r\ndef"));
        let lines = read_lines(reader).unwrap();
        assert_eq!(lines, vec!["abc", "def"]);
    }

    #[test]
    fn lone_carriage_return_ends_a_record() {
        let parser = LineParser::new().unwrap();
        let input = Cursor::new("[Hi] [a@b.com]\r[Yo] [c@d.org]\n");
        let outcome = analyze_reader(input, &parser).unwrap();

        assert_eq!(outcome.lines_read, 2);
        assert_eq!(outcome.state.total_emails, 2);
        assert_eq!(outcome.state.domain_counts["d.org"], 1);
    }

    #[test]
    fn decodes_invalid_utf8_lossily() {
        assert_eq!(decode_line(b"a\xffb"), "a\u{fffd}b");

        let parser = LineParser::new().unwrap();
        let input: &[u8] = b"[Hi] [x@y.io] \xfe\n";
        let outcome = analyze_reader(input, &parser).unwrap();
        assert_eq!(outcome.state.total_emails, 1);
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn read_failure_is_fatal() {
        let parser = LineParser::new().unwrap();
        let err = analyze_reader(BufReader::new(FailingReader), &parser).unwrap_err();
        assert!(matches!(err, AnalyzerError::Read(_)));

        let err = read_lines(BufReader::new(FailingReader)).unwrap_err();
        assert!(matches!(err, AnalyzerError::Read(_)));
    }

    #[test]
    fn empty_input_yields_empty_state() {
        let parser = LineParser::new().unwrap();
        let outcome = analyze_reader(Cursor::new(""), &parser).unwrap();
        assert_eq!(outcome.lines_read, 0);
        assert_eq!(outcome.state, AggregateState::new());
    }
}
