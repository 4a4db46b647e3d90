use std::{fmt, fs, io, path::Path};

/// First point where two output files disagree.
#[derive(Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number when both lines tokenize to the same length.
    pub column: Option<usize>,
    pub left: String,
    pub right: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(
                f,
                "line {}, column {column}: {} != {}",
                self.line, self.left, self.right
            ),
            None => write!(f, "line {}: {:?} != {:?}", self.line, self.left, self.right),
        }
    }
}

/// Compares two output files line by line.
///
/// # Returns
/// `None` when the files are identical, otherwise the first mismatch: the
/// differing value and its column when both lines hold the same number of
/// tokens, the raw lines when they don't.
pub fn compare_outputs(left: &Path, right: &Path) -> io::Result<Option<Mismatch>> {
    let left_text = fs::read_to_string(left)?;
    let right_text = fs::read_to_string(right)?;

    let mut left_lines = left_text.lines();
    let mut right_lines = right_text.lines();

    for line in 1usize.. {
        match (left_lines.next(), right_lines.next()) {
            (None, None) => return Ok(None),
            (Some(l), Some(r)) => {
                if l == r {
                    continue;
                }
                return Ok(Some(first_difference(line, l, r)));
            }
            (l, r) => {
                return Ok(Some(Mismatch {
                    line,
                    column: None,
                    left: l.unwrap_or("<end of file>").to_string(),
                    right: r.unwrap_or("<end of file>").to_string(),
                }));
            }
        }
    }

    unreachable!("the loop only exits by returning");
}

fn first_difference(line: usize, left: &str, right: &str) -> Mismatch {
    let left_toks: Vec<&str> = left.split_whitespace().collect();
    let right_toks: Vec<&str> = right.split_whitespace().collect();

    if left_toks.len() == right_toks.len() {
        for (i, (l, r)) in left_toks.iter().zip(&right_toks).enumerate() {
            if l != r {
                return Mismatch {
                    line,
                    column: Some(i + 1),
                    left: l.to_string(),
                    right: r.to_string(),
                };
            }
        }
    }

    // Lines differ only in whitespace layout or token count.
    Mismatch {
        line,
        column: None,
        left: left.to_string(),
        right: right.to_string(),
    }
}
