//! Action-string scanner.
//!
//! A single left-to-right pass over the input, driving a `MatchSink`. The
//! grammar is fixed:
//!
//! ```text
//! sep       := whitespace | ','
//! actions   := sep* ( '*' | tokenlist ) sep*
//! tokenlist := token (sep+ token)*
//! token     := maximal run of chars that are neither whitespace nor ','
//! ```
//!
//! ## States
//!
//! ```text
//!            ┌──────────── ',' ◀───────────────┐
//!            ▼                                 │
//!   separator-skip ── end ──▶ Ok               │
//!       │  │                                   │
//!       │  └─ '*' ─▶ wildcard ─ sep* ─ end ─▶ Ok
//!       │                  └─ other ─▶ UnexpectedCharacter
//!       ▼
//!   token-scan ── trie miss ─▶ InvalidAction
//!       └─ hit ─ ws* ─┬─ end ─▶ Ok
//!                     ├─ ',' ──────────────────┘
//!                     └─ other ─▶ UnexpectedCharacter
//! ```
//!
//! The scan fails fast on the first violation. A sink may already hold earlier
//! matches when an error is returned; the public API drops the sink in that
//! case, so no partial result escapes.
//!
//! Indices reported in errors and spans are byte offsets into the input.
//!
//! "Whitespace" is the narrower separator set of `is_separator_space`, not
//! `char::is_whitespace`: no-break spaces belong to tokens, and the ASCII
//! information separators U+001C..=U+001F separate.

use super::metrics::{MatchKind, MatchRecord, RunMetrics};
use super::registry::ActionInfo;
use super::sink::MatchSink;
use crate::{ActionError, ActionType, Result};
use std::ops::Range;
use std::time::Instant;

/// Scans one action string against one action type.
///
/// Usage: `Parser::new(input, &info).run(&mut sink)`.
#[derive(Debug)]
pub struct Parser<'a, A: ActionType> {
    input: &'a str,
    info: &'a ActionInfo<A>,
}

impl<'a, A: ActionType> Parser<'a, A> {
    pub fn new(input: &'a str, info: &'a ActionInfo<A>) -> Self {
        Parser { input, info }
    }

    /// Scan the input, reporting matches to `sink`.
    pub(crate) fn run<S: MatchSink<A>>(&self, sink: &mut S) -> Result<()> {
        self.scan(sink, None)
    }

    /// Scan the input like [`Parser::run`], additionally recording every match
    /// with its span and the elapsed time.
    pub(crate) fn run_with_metrics<S: MatchSink<A>>(&self, sink: &mut S) -> Result<RunMetrics<A>> {
        let start = Instant::now();
        let mut metrics = RunMetrics::default();
        self.scan(sink, Some(&mut metrics))?;
        metrics.total = start.elapsed();
        Ok(metrics)
    }

    fn scan<S: MatchSink<A>>(&self, sink: &mut S, mut metrics: Option<&mut RunMetrics<A>>) -> Result<()> {
        let mut chars = self.input.char_indices();

        loop {
            // Separator-skip, then dispatch on the first significant char.
            let (start, first) = loop {
                match chars.next() {
                    None => return Ok(()),
                    Some((_, ',')) => {
                        if let Some(m) = metrics.as_deref_mut() {
                            m.empty_segments += 1;
                        }
                    }
                    Some((_, c)) if is_separator_space(c) => {}
                    Some(found) => break found,
                }
            };

            if first == '*' {
                sink.matched_all(self.info);
                self.record(&mut metrics, start..start + 1, MatchKind::All);
                for (idx, c) in chars.by_ref() {
                    if c != ',' && !is_separator_space(c) {
                        return Err(self.unexpected(c, idx));
                    }
                }
                return Ok(());
            }

            // Token-scan: a maximal run up to the next separator.
            let mut terminator = None;
            for (idx, c) in chars.by_ref() {
                if c == ',' || is_separator_space(c) {
                    terminator = Some((idx, c));
                    break;
                }
            }
            let end = terminator.map_or(self.input.len(), |(idx, _)| idx);

            let Some(action) = self.info.lookup(self.input, start..end) else {
                let err = ActionError::InvalidAction {
                    action: self.input[start..end].to_string(),
                    index: start,
                    input: self.input.to_string(),
                };
                tracing::debug!(%err, "action string rejected");
                return Err(err);
            };
            sink.matched(action);
            self.record(&mut metrics, start..end, MatchKind::Action(action));

            // After a token only whitespace may precede the comma or the end.
            let mut next = terminator;
            loop {
                match next {
                    None => return Ok(()),
                    Some((_, ',')) => break,
                    Some((_, c)) if is_separator_space(c) => next = chars.next(),
                    Some((idx, c)) => return Err(self.unexpected(c, idx)),
                }
            }
        }
    }

    fn record(&self, metrics: &mut Option<&mut RunMetrics<A>>, span: Range<usize>, kind: MatchKind<A>) {
        tracing::trace!(?span, ?kind, "matched");
        if let Some(m) = metrics.as_deref_mut() {
            m.matches.push(MatchRecord { span, kind });
        }
    }

    fn unexpected(&self, ch: char, index: usize) -> ActionError {
        let err = ActionError::UnexpectedCharacter { ch, index, input: self.input.to_string() };
        tracing::debug!(%err, "action string rejected");
        err
    }
}

/// Whitespace that separates tokens.
///
/// Control whitespace `\t \n \u{B} \u{C} \r` and `U+001C..=U+001F`, plus the
/// Unicode space, line and paragraph separators other than the no-break
/// spaces `U+00A0`, `U+2007` and `U+202F`. `U+0085` is not a separator.
fn is_separator_space(c: char) -> bool {
    match c {
        '\t' | '\n' | '\u{B}' | '\u{C}' | '\r' | '\u{1C}'..='\u{1F}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => c.is_whitespace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sink::{MaskSink, SetSink};

    crate::actions! {
        enum Op {
            Read => "read",
            Write => "write",
            Execute => "execute",
            ReadLink => "readlink",
        }
    }

    fn mask(input: &str) -> Result<u32> {
        let info = ActionInfo::<Op>::get();
        let mut sink = MaskSink::<u32>::new();
        Parser::new(input, &info).run(&mut sink)?;
        Ok(sink.into_mask())
    }

    fn spans(input: &str) -> Vec<(Range<usize>, MatchKind<Op>)> {
        let info = ActionInfo::<Op>::get();
        let mut sink = SetSink::new();
        let metrics = Parser::new(input, &info).run_with_metrics(&mut sink).unwrap();
        metrics.matches.into_iter().map(|m| (m.span, m.kind)).collect()
    }

    #[test]
    fn accepts_separator_variations() {
        let cases: Vec<(u32, &str)> = vec![
            (0, ""),
            (0, "   "),
            (0, ",,,"),
            (0b0001, "read"),
            (0b0011, "read,write"),
            (0b0011, " read , write "),
            (0b0011, "read,  write,"),
            (0b0011, ",,read,,,write,,"),
            (0b0011, "read ,\t\nwrite"),
            (0b1001, "readlink,read"),
            (0b0001, "read,read"),
            (0b1111, "*"),
            (0b1111, " * "),
            (0b1111, ",*,"),
            (0b1111, "*,,  ,"),
        ];
        for (expected, input) in cases {
            assert_eq!(mask(input), Ok(expected), "input {input:?}");
        }
    }

    #[test]
    fn rejects_unknown_action() {
        assert_eq!(
            mask("read,bogus"),
            Err(ActionError::InvalidAction { action: "bogus".into(), index: 5, input: "read,bogus".into() })
        );
        assert_eq!(
            mask("rea"),
            Err(ActionError::InvalidAction { action: "rea".into(), index: 0, input: "rea".into() })
        );
        assert_eq!(
            mask("READ"),
            Err(ActionError::InvalidAction { action: "READ".into(), index: 0, input: "READ".into() })
        );
    }

    #[test]
    fn requires_a_comma_between_tokens() {
        assert_eq!(
            mask("read write"),
            Err(ActionError::UnexpectedCharacter { ch: 'w', index: 5, input: "read write".into() })
        );
        assert_eq!(
            mask("read\t\nwrite"),
            Err(ActionError::UnexpectedCharacter { ch: 'w', index: 6, input: "read\t\nwrite".into() })
        );
    }

    #[test]
    fn star_inside_a_token_is_part_of_the_token() {
        assert_eq!(
            mask("read*"),
            Err(ActionError::InvalidAction { action: "read*".into(), index: 0, input: "read*".into() })
        );
    }

    #[test]
    fn rejects_anything_after_wildcard() {
        assert_eq!(mask("*x"), Err(ActionError::UnexpectedCharacter { ch: 'x', index: 1, input: "*x".into() }));
        assert_eq!(
            mask("*, read"),
            Err(ActionError::UnexpectedCharacter { ch: 'r', index: 3, input: "*, read".into() })
        );
        assert_eq!(mask("*,*"), Err(ActionError::UnexpectedCharacter { ch: '*', index: 2, input: "*,*".into() }));
    }

    #[test]
    fn wildcard_after_tokens_is_accepted() {
        assert_eq!(mask("read, *"), Ok(0b1111));
    }

    #[test]
    fn reports_byte_offsets() {
        let err = mask("é,bogus").unwrap_err();
        assert_eq!(err, ActionError::InvalidAction { action: "é".into(), index: 0, input: "é,bogus".into() });
        let err = mask("read,\u{3000}nope").unwrap_err();
        assert_eq!(
            err,
            ActionError::InvalidAction { action: "nope".into(), index: 8, input: "read,\u{3000}nope".into() }
        );
    }

    #[test]
    fn no_break_spaces_belong_to_the_token() {
        assert_eq!(
            mask("read,\u{a0}write"),
            Err(ActionError::InvalidAction {
                action: "\u{a0}write".into(),
                index: 5,
                input: "read,\u{a0}write".into()
            })
        );
        assert_eq!(
            mask("read\u{85},write"),
            Err(ActionError::InvalidAction {
                action: "read\u{85}".into(),
                index: 0,
                input: "read\u{85},write".into()
            })
        );
        for nbsp in ['\u{2007}', '\u{202f}'] {
            let input = format!("write{nbsp}");
            assert!(matches!(mask(&input), Err(ActionError::InvalidAction { index: 0, .. })), "input {input:?}");
        }
    }

    #[test]
    fn information_separators_separate() {
        assert_eq!(mask("read,\u{1f}write"), Ok(0b011));
        assert_eq!(mask("\u{1c}read\u{1d},\u{1e}execute"), Ok(0b101));
        assert_eq!(mask("*\u{1f}"), Ok(0b1111));
    }

    #[test]
    fn separator_space_classification() {
        let separators =
            ['\t', '\n', '\u{b}', '\u{c}', '\r', '\u{1c}', '\u{1f}', ' ', '\u{1680}', '\u{2000}', '\u{2028}', '\u{3000}'];
        for c in separators {
            assert!(is_separator_space(c), "{c:?}");
        }
        for c in ['\u{85}', '\u{a0}', '\u{2007}', '\u{202f}', 'a', ',', '*', '\u{0}'] {
            assert!(!is_separator_space(c), "{c:?}");
        }
    }

    #[test]
    fn records_match_spans() {
        assert_eq!(
            spans(" write ,read"),
            vec![(1..6, MatchKind::Action(Op::Write)), (8..12, MatchKind::Action(Op::Read))]
        );
        assert_eq!(spans("  *"), vec![(2..3, MatchKind::All)]);
    }

    #[test]
    fn counts_empty_segments() {
        let info = ActionInfo::<Op>::get();
        let mut sink = SetSink::new();
        let metrics = Parser::new(",read,,write", &info).run_with_metrics(&mut sink).unwrap();
        assert_eq!(metrics.empty_segments, 2);
        assert!(!metrics.wildcard());
    }

    #[test]
    fn sink_may_hold_partial_matches_on_error() {
        let info = ActionInfo::<Op>::get();
        let mut sink = SetSink::new();
        assert!(Parser::new("write,nope", &info).run(&mut sink).is_err());
        assert_eq!(sink.into_set().len(), 1);
    }
}
