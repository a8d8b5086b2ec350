//! Seat identifiers and grid geometry.
//!
//! A seat is identified by the text `r<row>c<col>` with 1-based row and
//! column. Parsing never fails loudly: an identifier that does not match the
//! grammar is simply "not a seat" (outside every layout, adjacent to nothing).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use lazy_regex::regex_captures;
use serde::{Deserialize, Serialize};

use super::project::{Layout, PersonId};

/// Partial seat → person mapping. Iterates in row-major seat order.
pub type SeatToPersonMap = BTreeMap<SeatKey, PersonId>;

/// Parsed 1-based grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatPos {
    pub row: u32,
    pub col: u32,
}

/// Textual seat identifier as used at every boundary (`r3c12`).
///
/// The wrapped string is not guaranteed to be well-formed; stored data and
/// user input may carry anything. Use [`SeatKey::pos`] to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatKey(String);

impl SeatKey {
    pub fn new(row: u32, col: u32) -> Self {
        Self(format!("r{row}c{col}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn pos(&self) -> Option<SeatPos> {
        parse_seat_key(&self.0)
    }
}

impl From<&str> for SeatKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SeatKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<SeatPos> for SeatKey {
    fn from(pos: SeatPos) -> Self {
        Self::new(pos.row, pos.col)
    }
}

impl fmt::Display for SeatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for SeatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_seat_key(self, other)
    }
}

impl PartialOrd for SeatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Format a seat identifier from a 1-based row and column.
#[inline]
pub fn make_seat_key(row: u32, col: u32) -> SeatKey {
    SeatKey::new(row, col)
}

/// Parse `r<row>c<col>`; `None` for anything else.
///
/// Only ASCII digits are accepted, with no sign, whitespace or trailing
/// characters. Values that overflow `u32` are rejected as well.
pub fn parse_seat_key(s: &str) -> Option<SeatPos> {
    let (_, row, col) = regex_captures!(r"^r([0-9]+)c([0-9]+)$", s)?;
    Some(SeatPos {
        row: row.parse().ok()?,
        col: col.parse().ok()?,
    })
}

/// True iff `seat` parses and lies within `1..=rows` × `1..=cols`.
pub fn is_seat_inside_layout(layout: &Layout, seat: &SeatKey) -> bool {
    match seat.pos() {
        Some(SeatPos { row, col }) => {
            (1..=layout.rows).contains(&row) && (1..=layout.cols).contains(&col)
        }
        None => false,
    }
}

/// Orthogonal neighbours only: Manhattan distance exactly 1.
pub fn is_adjacent_seat(a: &SeatKey, b: &SeatKey) -> bool {
    match (a.pos(), b.pos()) {
        (Some(pa), Some(pb)) => pa.row.abs_diff(pb.row) + pa.col.abs_diff(pb.col) == 1,
        _ => false,
    }
}

/// Every seat of the layout, row-major (row outer, column inner, both ascending).
pub fn list_all_seats(layout: &Layout) -> Vec<SeatKey> {
    let mut seats = Vec::with_capacity((layout.rows as usize) * (layout.cols as usize));
    for row in 1..=layout.rows {
        for col in 1..=layout.cols {
            seats.push(SeatKey::new(row, col));
        }
    }
    seats
}

/// [`list_all_seats`] minus the layout's disabled seats, order preserved.
pub fn list_assignable_seats(layout: &Layout) -> Vec<SeatKey> {
    list_all_seats(layout)
        .into_iter()
        .filter(|seat| !layout.disabled_seats.contains(seat))
        .collect()
}

/// Row-major total order over seat identifiers.
///
/// Well-formed identifiers compare by (row, col); identifiers that denote the
/// same cell with different spellings (`r01c1` vs `r1c1`) are separated by
/// their text. Malformed identifiers sort after all well-formed ones and
/// compare lexicographically among themselves.
///
/// A mixed pair is not compared as plain strings (`"aa"` would otherwise
/// precede `"r1c1"`): that rule is not transitive, and this order keys every
/// `BTreeMap` of seats.
pub fn compare_seat_key(a: &SeatKey, b: &SeatKey) -> Ordering {
    match (a.pos(), b.pos()) {
        (Some(pa), Some(pb)) => pa.cmp(&pb).then_with(|| a.0.cmp(&b.0)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    }
}
