// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Function body scanning: balanced braces with quotes, comments and
//! here-documents kept opaque.

use super::Scanner;
use crate::error::{ScanError, Unclosed};
use crate::node::Atom;
use crate::token::{is_blank, is_control_operator, is_space};

/// Here-document waiting for its body after the current line.
struct PendingHereDoc {
    delimiter: String,
    /// `<<-`: leading tabs are stripped before matching the delimiter.
    strip_tabs: bool,
}

impl Scanner<'_> {
    /// Read a `{ ... }` body, starting on the opening brace.
    pub(super) fn scan_body(&mut self) -> Result<Atom, ScanError> {
        let begin = self.pos;
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut comment = false;
        let mut prev = ' ';
        let mut heredocs: Vec<PendingHereDoc> = Vec::new();

        loop {
            let Some(ch) = self.bump() else {
                let unclosed = match quote {
                    _ if escaped => Unclosed::Escape,
                    Some('\'') => Unclosed::SingleQuote,
                    Some('"') => Unclosed::DoubleQuote,
                    Some(_) => Unclosed::Backtick,
                    None if !heredocs.is_empty() => Unclosed::HereDoc,
                    None => Unclosed::Brace,
                };
                return Err(self.unterminated(unclosed));
            };

            if escaped {
                escaped = false;
            } else if comment {
                if ch == '\n' {
                    comment = false;
                    self.scan_heredoc_bodies(&mut heredocs)?;
                }
            } else if let Some(q) = quote {
                if ch == q {
                    quote = None;
                } else if ch == '\\' && q != '\'' {
                    escaped = true;
                }
            } else {
                match ch {
                    '\\' => escaped = true,
                    '\'' | '"' | '`' => quote = Some(ch),
                    '#' if is_blank(prev) || prev == ';' => comment = true,
                    '{' => depth += 1,
                    '}' => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            break;
                        }
                    }
                    '<' if self.peek_char() == Some('<') => {
                        self.bump();
                        if let Some(heredoc) = self.scan_heredoc_operator() {
                            heredocs.push(heredoc);
                        }
                    }
                    '\n' => self.scan_heredoc_bodies(&mut heredocs)?,
                    _ => {}
                }
            }
            prev = ch;
        }

        Ok(Atom::new(self.slice(begin, self.pos), begin))
    }

    /// Parse what follows `<<`: an optional `-` and the delimiter word.
    /// `<<<` here-strings yield nothing.
    fn scan_heredoc_operator(&mut self) -> Option<PendingHereDoc> {
        if self.peek_char() == Some('<') {
            self.bump();
            return None;
        }
        let strip_tabs = self.peek_char() == Some('-');
        if strip_tabs {
            self.bump();
        }
        self.skip_spaces();

        let mut delimiter = String::new();
        let mut quote: Option<char> = None;
        while let Some(ch) = self.peek_char() {
            match quote {
                Some(q) if ch == q => quote = None,
                Some(_) if ch == '\n' => break,
                Some(_) => delimiter.push(ch),
                None if ch == '\'' || ch == '"' => quote = Some(ch),
                None if ch == '\\' => {}
                None if is_blank(ch) || is_control_operator(ch) || ch == ')' || ch == '}' => break,
                None => delimiter.push(ch),
            }
            self.bump();
        }

        (!delimiter.is_empty()).then_some(PendingHereDoc { delimiter, strip_tabs })
    }

    /// Consume the bodies of pending here-documents, right after a newline.
    fn scan_heredoc_bodies(&mut self, heredocs: &mut Vec<PendingHereDoc>) -> Result<(), ScanError> {
        for heredoc in heredocs.drain(..) {
            loop {
                if self.peek_char().is_none() {
                    return Err(self.unterminated(Unclosed::HereDoc));
                }
                let line_begin = self.pos;
                self.skip_to_line_end();
                let line = self.slice(line_begin, self.pos);
                self.bump_newline();
                let line = if heredoc.strip_tabs { line.trim_start_matches('\t') } else { line };
                if line.trim_end_matches(is_space) == heredoc.delimiter {
                    break;
                }
            }
        }
        Ok(())
    }
}
