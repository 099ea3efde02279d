//! Test support: logging setup and outline fixtures

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// The sample document used across the test suites: preamble, two
/// top-level sections, a nested subsection with body text and a table.
pub const SAMPLE_OUTLINE: &[&str] = &[
    "项目年度报告",
    "一、总体情况",
    "本年度整体运行平稳。",
    "（一）收入情况",
    "|项目|金额|",
    "|主营收入|100w|",
    "1.主营业务",
    "主营业务占比最高。",
    "（二）支出情况",
    "支出控制在预算内。",
    "二、下一步计划",
    "继续推进重点项目。",
];

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "outliner=trace");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("outliner=debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Write outline lines to `dir/name`, one per line, and return the path.
pub fn write_outline<S: AsRef<str>>(dir: &Path, name: &str, lines: &[S]) -> PathBuf {
    let path = dir.join(name);
    let content = lines
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {}", path.display(), e));
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_lines_when_writing_outline_then_file_reads_back() {
        init_test_setup();
        let temp = tempfile::TempDir::new().unwrap();
        let path = write_outline(temp.path(), "doc.txt", SAMPLE_OUTLINE);
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), SAMPLE_OUTLINE.len());
    }
}
