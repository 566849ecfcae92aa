#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use email_analyzer::AnalyzerConfig;
use tracing::Level;

/// In-memory diagnostic sink shared with a fmt subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capture_subscriber(logs: &CapturedLogs) -> impl tracing::Subscriber + Send + Sync {
    let writer = logs.clone();
    tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::INFO)
        .finish()
}

pub fn write_input(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("emails.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn config_in(dir: &Path) -> AnalyzerConfig {
    AnalyzerConfig {
        input_path: dir.join("emails.txt"),
        output_path: dir.join("email_analysis_report.txt"),
        log_path: dir.join("email_analysis.log"),
        ..AnalyzerConfig::default()
    }
}

/// Report body lines grouped per section, order ignored.
pub fn section_set(report: &str, header: &str) -> std::collections::BTreeSet<String> {
    report
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
