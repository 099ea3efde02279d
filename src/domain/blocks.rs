//! Body text grouping.
//!
//! Upstream adapters flatten tables into one line per row (`| a | b |`).
//! Body lines are grouped into runs of plain text and runs of table rows so
//! a section body can be rendered or re-embedded block by block.

/// Contiguous run of body lines of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Text(Vec<String>),
    Table(Vec<String>),
}

impl ContentBlock {
    pub fn lines(&self) -> &[String] {
        match self {
            ContentBlock::Text(lines) | ContentBlock::Table(lines) => lines,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table(_))
    }
}

/// A trimmed line that starts and ends with `|`.
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Group lines into alternating text and table blocks. Blank lines are
/// dropped and do not break a run.
pub fn group_lines<S: AsRef<str>>(lines: &[S]) -> Vec<ContentBlock> {
    let mut blocks: Vec<ContentBlock> = Vec::new();

    for line in lines {
        let trimmed = line.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let table = is_table_row(trimmed);
        let extended = match blocks.last_mut() {
            Some(ContentBlock::Table(rows)) if table => {
                rows.push(trimmed.to_string());
                true
            }
            Some(ContentBlock::Text(text)) if !table => {
                text.push(trimmed.to_string());
                true
            }
            _ => false,
        };
        if !extended {
            let run = vec![trimmed.to_string()];
            blocks.push(if table {
                ContentBlock::Table(run)
            } else {
                ContentBlock::Text(run)
            });
        }
    }
    blocks
}

/// Render table cells as one row line, `| c1 | c2 |`.
/// Line breaks inside a cell become spaces so the row stays on one line.
pub fn format_table_row<S: AsRef<str>>(cells: &[S]) -> String {
    let mut row = String::new();
    for cell in cells {
        let text = cell.as_ref().replace("\r\n", " ").replace('\n', " ");
        row.push_str("| ");
        row.push_str(text.trim());
        row.push(' ');
    }
    row.push('|');
    row
}
