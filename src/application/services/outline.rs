//! Outline service
//!
//! Parses line sources into outlines, reconciles report numbering against a
//! template, and serializes sections back into lines.

use std::io;
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    reconcile, Correction, Outline, OutlineBuilder, TemplateNumberMap, DEFAULT_INDENT,
};
use crate::infrastructure::traits::FileSystem;

/// Output from reconciling a report against a template.
#[derive(Debug)]
pub struct Reconciliation {
    /// Report outline with numbering corrected to the template's
    pub outline: Outline,
    /// Numbering rewrites in document order
    pub corrections: Vec<Correction>,
    /// Template wordings numbered in more than one way (first one won)
    pub conflicts: Vec<(String, Vec<String>)>,
}

/// Service for parsing and reconciling outlines.
pub struct OutlineService {
    fs: Arc<dyn FileSystem>,
    builder: OutlineBuilder,
    indent: String,
}

impl OutlineService {
    /// Create a service with the default heading patterns and separators.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_builder(fs, OutlineBuilder::default(), DEFAULT_INDENT)
    }

    pub fn with_builder(
        fs: Arc<dyn FileSystem>,
        builder: OutlineBuilder,
        indent: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            builder,
            indent: indent.into(),
        }
    }

    pub fn builder(&self) -> &OutlineBuilder {
        &self.builder
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Outline {
        self.builder.build(lines)
    }

    /// Read a flattened text source, one outline line per text line.
    #[instrument(level = "debug", skip(self))]
    pub fn load_lines(&self, path: &Path) -> ApplicationResult<Vec<String>> {
        if self.fs.exists(path) && !self.fs.is_file(path) {
            return Err::<Vec<String>, _>(io::Error::new(io::ErrorKind::InvalidInput, "not a file"))
                .with_path_context("read outline", path);
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read outline", path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let lines: Vec<String> = content.lines().map(str::to_owned).collect();
        debug!("load_lines: {} lines from {}", lines.len(), path.display());
        Ok(lines)
    }

    pub fn parse_file(&self, path: &Path) -> ApplicationResult<Outline> {
        let lines = self.load_lines(path)?;
        Ok(self.parse(&lines))
    }

    pub fn build_template_number_map<S: AsRef<str>>(&self, template_lines: &[S]) -> TemplateNumberMap {
        TemplateNumberMap::from_outline(&self.parse(template_lines))
    }

    /// Parse the report and renumber it after the template.
    #[instrument(level = "debug", skip_all)]
    pub fn parse_report_with_template<T: AsRef<str>, R: AsRef<str>>(
        &self,
        template_lines: &[T],
        report_lines: &[R],
    ) -> Reconciliation {
        let map = self.build_template_number_map(template_lines);
        let conflicts: Vec<(String, Vec<String>)> = map
            .conflicts()
            .into_iter()
            .map(|(key, tokens)| (key.to_string(), tokens.into_iter().map(str::to_owned).collect()))
            .collect();
        for (key, tokens) in &conflicts {
            warn!("template numbers '{}' as {}; using the first", key, tokens.iter().join(", "));
        }

        let mut outline = self.parse(report_lines);
        let corrections = reconcile(&mut outline, &map);
        info!(
            "reconciled {} headings, {} corrections",
            outline.len(),
            corrections.len()
        );

        Reconciliation {
            outline,
            corrections,
            conflicts,
        }
    }

    pub fn reconcile_files(&self, template: &Path, report: &Path) -> ApplicationResult<Reconciliation> {
        let template_lines = self.load_lines(template)?;
        let report_lines = self.load_lines(report)?;
        Ok(self.parse_report_with_template(&template_lines, &report_lines))
    }

    pub fn extract_section(&self, outline: &Outline, key: &str) -> Vec<String> {
        outline.extract_section(key, &self.indent)
    }

    pub fn render_keys(&self, outline: &Outline) -> Vec<String> {
        outline.render_keys(&self.indent)
    }
}
