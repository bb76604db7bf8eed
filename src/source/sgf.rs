//! SGF game records: one file per game.
//!
//! Minimal parser for what the corpus actually needs: the root node's
//! board-size gate and the main-line move sequence. Variations are parsed
//! but only the first child at each branch is followed; the root node never
//! carries a move and is always skipped.
//!
//! Move coordinates are SGF letter pairs, `'a' + n`, already 0-indexed. An
//! empty value is a pass; so is `tt` on boards up to 19x19 (FF[3] legacy).

use log::debug;

use crate::board::Color;
use crate::error::DecodeError;
use crate::replay::{GameRecord, MoveRecord};

/// Decode one SGF document into a normalized [`GameRecord`].
///
/// Fails with [`DecodeError::SizeMismatch`] when the declared `SZ` differs
/// from `requested_size` (missing `SZ` defaults to 19), and with
/// [`DecodeError::MalformedGameRecord`] on structural parse failures.
/// Nodes without a move property are skipped; malformed move values skip
/// just that node.
pub fn decode_sgf(text: &str, requested_size: usize) -> Result<GameRecord, DecodeError> {
    let nodes = Parser::new(text).parse_main_line()?;
    let root = nodes
        .first()
        .ok_or_else(|| malformed("game tree has no nodes"))?;

    let declared = match root.prop("SZ") {
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| malformed(format!("unparseable SZ value: {value:?}")))?,
        None => 19,
    };
    if declared != requested_size {
        return Err(DecodeError::SizeMismatch {
            declared,
            requested: requested_size,
        });
    }

    let mut record = GameRecord::new();
    for node in &nodes[1..] {
        let (color, value) = match node.move_prop() {
            Some(mv) => mv,
            None => continue,
        };
        match parse_move_value(value, requested_size) {
            Ok(None) => record.push(MoveRecord::Pass { color }),
            Ok(Some((x, y))) => record.push(MoveRecord::Play { color, x, y }),
            Err(()) => debug!("skipping malformed SGF move value {value:?}"),
        }
    }
    Ok(record)
}

fn malformed(reason: impl Into<String>) -> DecodeError {
    DecodeError::MalformedGameRecord(reason.into())
}

/// A move value: `Ok(None)` for a pass, `Ok(Some((x, y)))` for a placement
/// (0-indexed, unchecked range), `Err(())` for a malformed value.
fn parse_move_value(value: &str, size: usize) -> Result<Option<(i32, i32)>, ()> {
    if value.is_empty() {
        return Ok(None);
    }
    if value == "tt" && size <= 19 {
        return Ok(None);
    }
    let bytes = value.as_bytes();
    if bytes.len() != 2 || !bytes[0].is_ascii_lowercase() || !bytes[1].is_ascii_lowercase() {
        return Err(());
    }
    Ok(Some((
        (bytes[0] - b'a') as i32,
        (bytes[1] - b'a') as i32,
    )))
}

/// One SGF node: property identifier plus its values, in document order.
struct Node {
    props: Vec<(String, Vec<String>)>,
}

impl Node {
    fn prop(&self, id: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(key, _)| key.as_str() == id)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// The node's move property, if any (first of `B`/`W` wins).
    fn move_prop(&self) -> Option<(Color, &str)> {
        for (key, values) in &self.props {
            let color = match key.as_str() {
                "B" => Color::Black,
                "W" => Color::White,
                _ => continue,
            };
            return values.first().map(|v| (color, v.as_str()));
        }
        None
    }
}

/// Parser over the SGF grammar: `GameTree = "(" Node+ GameTree* ")"`.
/// Returns main-line nodes only.
///
/// The tree walk is iterative (explicit open-tree stack, like the board's
/// flood fill): nesting depth is corpus data, and a corrupt deeply nested
/// file must come back as a `DecodeError`, not blow the call stack.
struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn parse_main_line(mut self) -> Result<Vec<Node>, DecodeError> {
        self.skip_whitespace();
        self.expect(b'(')?;

        let mut nodes = Vec::new();
        // One entry per open tree: whether a child tree has been seen there.
        let mut saw_child: Vec<bool> = vec![false];
        // Depth at which we left the main line (entered a non-first child);
        // nodes below it are abandoned variations, parsed but dropped.
        let mut off_main: Option<usize> = None;
        // Every "(" must be followed by at least one node.
        let mut expect_node = true;

        loop {
            self.skip_whitespace();
            match self.next_byte() {
                None => return Err(malformed("unterminated game tree")),
                Some(b';') => {
                    expect_node = false;
                    let node = self.parse_node()?;
                    if off_main.is_none() {
                        nodes.push(node);
                    }
                }
                Some(b'(') => {
                    if expect_node {
                        return Err(malformed("game tree has no nodes"));
                    }
                    let first_child = match saw_child.last_mut() {
                        Some(parent) => !std::mem::replace(parent, true),
                        None => return Err(malformed("unbalanced parentheses")),
                    };
                    saw_child.push(false);
                    if !first_child && off_main.is_none() {
                        off_main = Some(saw_child.len());
                    }
                    expect_node = true;
                }
                Some(b')') => {
                    if expect_node {
                        return Err(malformed("game tree has no nodes"));
                    }
                    saw_child.pop();
                    if off_main.is_some_and(|depth| saw_child.len() < depth) {
                        off_main = None;
                    }
                    if saw_child.is_empty() {
                        return Ok(nodes);
                    }
                }
                Some(other) => {
                    return Err(malformed(format!(
                        "unexpected character {:?} at offset {}",
                        other as char,
                        self.pos - 1
                    )))
                }
            }
        }
    }

    fn parse_node(&mut self) -> Result<Node, DecodeError> {
        let mut props = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(c) if c.is_ascii_alphabetic() => {
                    let ident = self.parse_ident();
                    let mut values = Vec::new();
                    self.skip_whitespace();
                    while self.peek() == Some(b'[') {
                        values.push(self.parse_value()?);
                        self.skip_whitespace();
                    }
                    if values.is_empty() {
                        return Err(malformed(format!("property {ident} has no value")));
                    }
                    props.push((ident, values));
                }
                _ => break,
            }
        }
        Ok(Node { props })
    }

    fn parse_ident(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }

    fn parse_value(&mut self) -> Result<String, DecodeError> {
        self.expect(b'[')?;
        let mut out = String::new();
        loop {
            match self.next_byte() {
                None => return Err(malformed("unterminated property value")),
                Some(b']') => return Ok(out),
                Some(b'\\') => {
                    if let Some(escaped) = self.next_byte() {
                        out.push(escaped as char);
                    }
                }
                Some(c) => out.push(c as char),
            }
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), DecodeError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(malformed(format!(
                "expected {:?} at offset {}",
                byte as char, self.pos
            )))
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_game() {
        let text = "(;GM[1]FF[4]SZ[9];B[dd];W[cc])";
        let record = decode_sgf(text, 9).unwrap();
        assert_eq!(
            record.moves,
            vec![
                MoveRecord::Play {
                    color: Color::Black,
                    x: 3,
                    y: 3
                },
                MoveRecord::Play {
                    color: Color::White,
                    x: 2,
                    y: 2
                },
            ]
        );
    }

    #[test]
    fn test_size_gate() {
        let text = "(;SZ[19];B[dd])";
        let err = decode_sgf(text, 9).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SizeMismatch {
                declared: 19,
                requested: 9
            }
        ));
    }

    #[test]
    fn test_missing_size_defaults_to_19() {
        let text = "(;GM[1];B[dd])";
        assert!(decode_sgf(text, 19).is_ok());
        assert!(decode_sgf(text, 9).is_err());
    }

    #[test]
    fn test_passes() {
        let text = "(;SZ[19];B[dd];W[];B[tt])";
        let record = decode_sgf(text, 19).unwrap();
        assert_eq!(record.len(), 3);
        assert!(record.moves[1].is_pass());
        assert!(record.moves[2].is_pass());
    }

    #[test]
    fn test_tt_is_a_move_on_large_boards() {
        let text = "(;SZ[21];B[tt])";
        let record = decode_sgf(text, 21).unwrap();
        assert_eq!(
            record.moves[0],
            MoveRecord::Play {
                color: Color::Black,
                x: 19,
                y: 19
            }
        );
    }

    #[test]
    fn test_root_never_contributes_a_move() {
        // Root with setup properties only; first move comes from node two.
        let text = "(;SZ[9]AB[aa][bb]C[setup];B[cc])";
        let record = decode_sgf(text, 9).unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_main_line_through_variations() {
        let text = "(;SZ[9];B[aa](;W[bb];B[cc])(;W[dd]))";
        let record = decode_sgf(text, 9).unwrap();
        let coords: Vec<(i32, i32)> = record
            .moves
            .iter()
            .map(|m| match *m {
                MoveRecord::Play { x, y, .. } => (x, y),
                MoveRecord::Pass { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(coords, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_escaped_value_characters() {
        let text = "(;SZ[9]C[a \\] bracket];B[dd])";
        let record = decode_sgf(text, 9).unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_structural_garbage_is_malformed() {
        assert!(matches!(
            decode_sgf("not sgf at all", 9),
            Err(DecodeError::MalformedGameRecord(_))
        ));
        assert!(matches!(
            decode_sgf("(;SZ[9];B[dd", 9),
            Err(DecodeError::MalformedGameRecord(_))
        ));
        assert!(matches!(
            decode_sgf("()", 9),
            Err(DecodeError::MalformedGameRecord(_))
        ));
    }

    #[test]
    fn test_deeply_nested_variations_parse_without_recursion() {
        // Corrupt or adversarial files nest variations arbitrarily deep;
        // 200k levels must decode (or fail) without exhausting the stack.
        let depth = 200_000;
        let mut text = String::from("(;SZ[9]");
        for _ in 0..depth {
            text.push_str("(;B[aa]");
        }
        text.push_str(&")".repeat(depth + 1));
        let record = decode_sgf(&text, 9).unwrap();
        // Each level is the first child of its parent, so every node is on
        // the main line.
        assert_eq!(record.len(), depth);
    }

    #[test]
    fn test_truncated_nested_document_is_malformed() {
        let mut text = String::from("(;SZ[9]");
        for _ in 0..10_000 {
            text.push_str("(;B[aa]");
        }
        assert!(matches!(
            decode_sgf(&text, 9),
            Err(DecodeError::MalformedGameRecord(_))
        ));
    }

    #[test]
    fn test_malformed_move_value_skips_node() {
        let text = "(;SZ[9];B[ddd];W[ee])";
        let record = decode_sgf(text, 9).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.moves[0].color(), Color::White);
    }
}
