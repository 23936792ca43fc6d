//! Line sources and fenced code block collection.

use std::collections::VecDeque;
use std::io::{self, BufRead};

use crate::error::InputError;

const FENCE: &str = "```";

/// Where the session gets its input from, one line at a time.
pub trait LineSource {
    /// Next line without its line terminator, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads from the process's standard input.
#[derive(Debug, Default)]
pub struct StdinLines;

impl LineSource for StdinLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }
}

/// Pre-recorded input, for driving a session without a terminal.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Code collected from a fenced block, plus any text after the closing fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub code: String,
    pub trailing: Option<String>,
}

/// Accumulates lines until a closing fence.
///
/// An optional opening fence (with an optional language tag) is dropped. A
/// line starting with the fence closes the block; so does a line ending in
/// it, whose text before the fence is kept as code.
///
/// A bare fence as the very first line always opens the block, so a block
/// typed as just one fence needs a second one to end (and comes back empty).
#[derive(Debug, Default)]
pub struct BlockReader {
    lines: Vec<String>,
    started: bool,
}

impl BlockReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line; returns the block once it is closed.
    pub fn push(&mut self, line: &str) -> Option<CodeBlock> {
        if !self.started {
            self.started = true;
            if let Some(rest) = line.trim_start().strip_prefix(FENCE) {
                if let Some((code, after)) = rest.split_once(FENCE) {
                    self.lines.push(code.to_string());
                    return Some(self.finish(after));
                }
                if !is_fence_tag(rest) {
                    self.lines.push(rest.to_string());
                }
                return None;
            }
        }

        if let Some(after) = line.trim_start().strip_prefix(FENCE) {
            return Some(self.finish(after));
        }
        if let Some(code) = line.trim_end().strip_suffix(FENCE) {
            self.lines.push(code.to_string());
            return Some(self.finish(""));
        }
        self.lines.push(line.to_string());
        None
    }

    /// Called at end of input.
    pub fn eof(self) -> Result<(), InputError> {
        if self.started {
            Err(InputError::UnclosedBlock)
        } else {
            Ok(())
        }
    }

    fn finish(&mut self, after: &str) -> CodeBlock {
        let code = std::mem::take(&mut self.lines).join("\n");
        let after = after.trim();
        CodeBlock {
            code,
            trailing: (!after.is_empty()).then(|| after.to_string()),
        }
    }
}

fn is_fence_tag(rest: &str) -> bool {
    rest.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '.' | '_'))
}

/// Splits program input into whitespace-separated tokens.
pub fn stdin_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(lines: &[&str]) -> Option<CodeBlock> {
        let mut r = BlockReader::new();
        lines.iter().find_map(|l| r.push(l))
    }

    #[test]
    fn closes_on_fence_line() {
        let b = feed(&["int x = 1;", "printf(\"%d\", x);", "```"]).unwrap();
        assert_eq!(b.code, "int x = 1;\nprintf(\"%d\", x);");
        assert_eq!(b.trailing, None);
    }

    #[test]
    fn opening_fence_and_tag_are_dropped() {
        let b = feed(&["```python", "print(1)", "```"]).unwrap();
        assert_eq!(b.code, "print(1)");
        let b = feed(&["```", "print(2)", "```"]).unwrap();
        assert_eq!(b.code, "print(2)");
    }

    #[test]
    fn bare_fence_first_opens_rather_than_closes() {
        let mut r = BlockReader::new();
        assert_eq!(r.push("```"), None);
        let b = r.push("```").unwrap();
        assert_eq!(b.code, "");
    }

    #[test]
    fn one_line_block_with_trailing_input() {
        let b = feed(&["```print(input())``` 4 5"]).unwrap();
        assert_eq!(b.code, "print(input())");
        assert_eq!(b.trailing.as_deref(), Some("4 5"));
    }

    #[test]
    fn code_on_the_opening_fence_line_is_kept() {
        let b = feed(&["```x = 1 + 2", "print(x)", "```"]).unwrap();
        assert_eq!(b.code, "x = 1 + 2\nprint(x)");
    }

    #[test]
    fn fence_at_end_of_line_closes() {
        let b = feed(&["print('hi')```"]).unwrap();
        assert_eq!(b.code, "print('hi')");
    }

    #[test]
    fn text_after_closing_fence_is_trailing() {
        let b = feed(&["puts gets", "``` hello"]).unwrap();
        assert_eq!(b.trailing.as_deref(), Some("hello"));
    }

    #[test]
    fn unfinished_block_is_an_error_at_eof() {
        let mut r = BlockReader::new();
        assert!(r.push("print(1)").is_none());
        assert_eq!(r.eof(), Err(InputError::UnclosedBlock));
        assert_eq!(BlockReader::new().eof(), Ok(()));
    }

    #[test]
    fn tokens_split_on_any_whitespace() {
        let t: Vec<_> = stdin_tokens(" 1  2\t3 ").collect();
        assert_eq!(t, ["1", "2", "3"]);
    }

    #[test]
    fn scripted_lines_run_out() {
        let mut s = ScriptedLines::new(["a"]);
        assert_eq!(s.next_line().unwrap().as_deref(), Some("a"));
        assert_eq!(s.next_line().unwrap(), None);
    }
}
