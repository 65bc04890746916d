use super::types::{Loc, Located};

const COMMENT: &str = "//";

/// One non-empty source line, split into its mnemonic and operand tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub mnemonic: Located<&'a str>,
    pub operands: Vec<Located<&'a str>>,
}

fn is_delimiter(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Splits a line at delimiters, collapsing runs of them, and records the
/// (1-based, in chars) column each token starts at.
fn split_located(line_no: usize, line: &str) -> Vec<Located<&str>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (col, (idx, c)) in line.char_indices().enumerate() {
        match (start, is_delimiter(c)) {
            (None, false) => start = Some((idx, col)),
            (Some((begin, begin_col)), true) => {
                tokens.push(Located::with_loc(
                    Loc::new(line_no, begin_col + 1),
                    &line[begin..idx],
                ));
                start = None;
            }
            _ => (),
        }
    }

    if let Some((begin, begin_col)) = start {
        tokens.push(Located::with_loc(
            Loc::new(line_no, begin_col + 1),
            &line[begin..],
        ));
    }

    tokens
}

pub fn tokenize_line(line_no: usize, line: &str) -> Option<Line<'_>> {
    let mut tokens = split_located(line_no, strip_comment(line)).into_iter();
    let mnemonic = tokens.next()?;
    Some(Line {
        mnemonic,
        operands: tokens.collect(),
    })
}

/// Lines are numbered from 1. Blank and comment-only lines are skipped.
pub fn tokenize(source: &str) -> impl Iterator<Item = Line<'_>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| tokenize_line(idx + 1, line))
}
