//! Parsed representation of a statusResponse body and the parser itself.
//!
//! The body is backslash-delimited key/value text, optionally followed by a
//! newline and one line per connected player (`<score> <ping> "<name>"`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A game-data value, typed by its textual form: all-digit tokens become
/// integers, signed decimal-point numerics become floats, everything else
/// stays a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

/// One entry of the player list, in the order the server reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub score: i32,
    pub ping: i32,
    /// Name exactly as the server sent it, color codes included.
    pub raw_name: String,
    /// `raw_name` with every caret-plus-one-character color code removed.
    pub name: String,
}

/// Everything a server reports in one statusResponse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server cvars keyed by lower-cased name.
    pub game_data: HashMap<String, Value>,
    /// `None` when the response carried no player section at all;
    /// `Some(vec)` (possibly empty) when it did.
    pub players: Option<Vec<PlayerRecord>>,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response body is not valid UTF-8")]
    InvalidEncoding(#[from] std::str::Utf8Error),
    #[error("malformed player line: {0:?}")]
    PlayerLine(String),
}

/// Parses a validated response body into a [`ServerInfo`].
///
/// The leading backslash is dropped, then the body splits at the first
/// newline into the game-data segment and the player segment. An absent
/// player segment maps to `players: None`, a present one (stripped of its
/// trailing terminator) parses line by line.
pub fn parse_info(body: &[u8]) -> Result<ServerInfo, ParseError> {
    let text = std::str::from_utf8(body)?;
    let text = text.strip_prefix('\\').unwrap_or(text);

    let (game, player_segment) = match text.split_once('\n') {
        Some((game, rest)) => (game, rest),
        None => (text, ""),
    };

    let game_data = parse_game_data(game);
    let players = if player_segment.is_empty() {
        None
    } else {
        let lines = player_segment.strip_suffix('\n').unwrap_or(player_segment);
        Some(parse_players(lines)?)
    };

    Ok(ServerInfo { game_data, players })
}

/// Splits backslash-delimited key/value text into a typed map.
///
/// Delimiters may be flanked by a single space on either side, which is
/// consumed with them. Keys are lower-cased. A trailing unpaired token is
/// dropped, matching the observed protocol behavior.
pub fn parse_game_data(text: &str) -> HashMap<String, Value> {
    let fields = split_fields(text);
    let mut game_data = HashMap::new();
    for pair in fields.chunks_exact(2) {
        game_data.insert(pair[0].to_lowercase(), infer_value(pair[1]));
    }
    game_data
}

/// Parses newline-separated player lines. Each line is
/// `<score> <ping> <quoted name>`; the name keeps any inner spaces and
/// loses only its surrounding quote characters. Empty input is an empty
/// player list, not an error.
pub fn parse_players(text: &str) -> Result<Vec<PlayerRecord>, ParseError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut players = Vec::new();
    for line in text.split('\n') {
        let mut fields = line.splitn(3, ' ');
        let (score, ping, quoted) = match (fields.next(), fields.next(), fields.next()) {
            (Some(score), Some(ping), Some(quoted)) => (score, ping, quoted),
            _ => return Err(ParseError::PlayerLine(line.to_string())),
        };

        let score = score
            .parse::<i32>()
            .map_err(|_| ParseError::PlayerLine(line.to_string()))?;
        let ping = ping
            .parse::<i32>()
            .map_err(|_| ParseError::PlayerLine(line.to_string()))?;

        // Drop the surrounding quote characters.
        let mut inner = quoted.chars();
        inner.next();
        inner.next_back();
        let raw_name = inner.as_str().to_string();
        let name = strip_color_codes(&raw_name);

        players.push(PlayerRecord {
            score,
            ping,
            raw_name,
            name,
        });
    }
    Ok(players)
}

/// Removes every two-character `^X` color code. A caret with nothing after
/// it is not a color code and stays.
pub fn strip_color_codes(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '^' {
            if chars.next().is_none() {
                name.push('^');
            }
        } else {
            name.push(c);
        }
    }
    name
}

/// Splits on backslashes, consuming at most one space on each side of every
/// delimiter. Spaces inside a key or value survive.
fn split_fields(text: &str) -> Vec<&str> {
    let parts: Vec<&str> = text.split('\\').collect();
    let last = parts.len() - 1;
    parts
        .into_iter()
        .enumerate()
        .map(|(i, mut field)| {
            if i > 0 {
                field = field.strip_prefix(' ').unwrap_or(field);
            }
            if i < last {
                field = field.strip_suffix(' ').unwrap_or(field);
            }
            field
        })
        .collect()
}

fn infer_value(token: &str) -> Value {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = token.parse::<i64>() {
            return Value::Int(n);
        }
    }
    if is_decimal(token) {
        if let Ok(f) = token.parse::<f64>() {
            return Value::Float(f);
        }
    }
    Value::Text(token.to_string())
}

// Signed decimal with a mandatory fraction part, e.g. "-12.5". Plain "-5"
// is not a digit string and not a decimal, so it stays text.
fn is_decimal(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    match unsigned.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
