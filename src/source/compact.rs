//! Compact game format: one JSON array per line, one line per game.
//!
//! Each array element is a single-key object `{"B": [x, y]}` or
//! `{"W": [x, y]}` with 1-indexed coordinates. The container failing to
//! parse as a JSON array skips the whole game; a malformed element skips
//! just that move.

use log::debug;
use serde_json::Value;

use crate::board::Color;
use crate::error::DecodeError;
use crate::replay::{GameRecord, MoveRecord};

/// Decode one physical line into a normalized [`GameRecord`].
///
/// Coordinates are normalized to 0-indexed here; range checking stays with
/// the replayer, which is why records carry `i32` coordinates.
pub fn decode_game_line(line: &str) -> Result<GameRecord, DecodeError> {
    let entries: Vec<Value> = serde_json::from_str(line)
        .map_err(|e| DecodeError::MalformedGameRecord(e.to_string()))?;

    let mut record = GameRecord::new();
    for entry in &entries {
        match decode_entry(entry) {
            Some(mv) => record.push(mv),
            None => debug!("skipping malformed move entry: {entry}"),
        }
    }
    Ok(record)
}

/// Decode one move entry, or `None` if it is malformed (not an object,
/// key count != 1, unknown color key, or the value is not a 2-element
/// integer array).
fn decode_entry(entry: &Value) -> Option<MoveRecord> {
    let obj = entry.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    let (key, coords) = obj.iter().next()?;
    let color = match key.as_str() {
        "B" => Color::Black,
        "W" => Color::White,
        _ => return None,
    };
    let pair = coords.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    let x = pair[0].as_i64()?;
    let y = pair[1].as_i64()?;
    Some(MoveRecord::Play {
        color,
        x: to_zero_indexed(x),
        y: to_zero_indexed(y),
    })
}

/// 1-indexed to 0-indexed, saturating so absurd values stay representable
/// (and get range-skipped later) instead of wrapping.
fn to_zero_indexed(coord: i64) -> i32 {
    (coord - 1).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
