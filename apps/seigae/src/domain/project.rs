//! Project aggregate: layout, persons and rules, plus the editing operations
//! that keep rule references consistent with the person list and layout.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;
use uuid::Uuid;

use super::seat::{is_seat_inside_layout, SeatKey};
use super::validation::Severity;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

pub type PersonId = String;
pub type RuleId = String;

/// Layout bounds accepted by [`Project::resize_layout`].
pub const MIN_LAYOUT_SIDE: u32 = 1;
pub const MAX_LAYOUT_SIDE: u32 = 20;
pub const DEFAULT_LAYOUT_SIDE: u32 = 6;

/// Grid of `rows` × `cols` seats, some of which may be disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub rows: u32,
    pub cols: u32,
    #[serde(default)]
    pub disabled_seats: BTreeSet<SeatKey>,
}

impl Layout {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            disabled_seats: BTreeSet::new(),
        }
    }

    pub fn is_disabled(&self, seat: &SeatKey) -> bool {
        self.disabled_seats.contains(seat)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_SIDE, DEFAULT_LAYOUT_SIDE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn toggled(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

// Anything other than "female" reads back as male so older or hand-edited
// stores still load.
impl Serialize for Gender {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Gender::Male => "male",
            Gender::Female => "female",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(match s.as_deref() {
            Some("female") => Gender::Female,
            _ => Gender::Male,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    /// Absent persons take no seat and are ignored by every rule.
    #[serde(default)]
    pub absent: bool,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender: Gender::Male,
            absent: false,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.absent
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeparationKind {
    #[default]
    NotAdjacent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleScope {
    /// Compare against the most recent assignment only.
    #[default]
    Last,
}

/// Seating rule. Closed set; the validator matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Rule {
    /// `person_id` must sit exactly at `seat`.
    FixedSeat {
        id: RuleId,
        person_id: PersonId,
        seat: SeatKey,
    },
    /// The two persons must not sit in orthogonally adjacent seats.
    Separate {
        id: RuleId,
        person_a_id: PersonId,
        person_b_id: PersonId,
        #[serde(default)]
        kind: SeparationKind,
    },
    /// Soft preference to avoid repeating the previous seat. Not evaluated yet.
    AvoidSameSeatFromLast {
        id: RuleId,
        #[serde(default)]
        scope: RuleScope,
    },
}

impl Rule {
    pub fn fixed_seat(person_id: impl Into<PersonId>, seat: impl Into<SeatKey>) -> Self {
        Rule::FixedSeat {
            id: new_id(),
            person_id: person_id.into(),
            seat: seat.into(),
        }
    }

    pub fn separate(a: impl Into<PersonId>, b: impl Into<PersonId>) -> Self {
        Rule::Separate {
            id: new_id(),
            person_a_id: a.into(),
            person_b_id: b.into(),
            kind: SeparationKind::NotAdjacent,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Rule::FixedSeat { id, .. }
            | Rule::Separate { id, .. }
            | Rule::AvoidSameSeatFromLast { id, .. } => id,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Rule::FixedSeat { .. } | Rule::Separate { .. } => Severity::Hard,
            Rule::AvoidSameSeatFromLast { .. } => Severity::Soft,
        }
    }

    /// True when every person this rule names is in `existing`.
    fn references_only(&self, existing: &HashSet<&str>) -> bool {
        match self {
            Rule::FixedSeat { person_id, .. } => existing.contains(person_id.as_str()),
            Rule::Separate {
                person_a_id,
                person_b_id,
                ..
            } => existing.contains(person_a_id.as_str()) && existing.contains(person_b_id.as_str()),
            Rule::AvoidSameSeatFromLast { .. } => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub layout: Layout,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Project {
    /// Fresh project with the default 6×6 layout and nobody in it.
    pub fn new(name: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            layout: Layout::default(),
            persons: Vec::new(),
            rules: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn active_persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.iter().filter(|p| p.is_active())
    }

    pub fn person(&self, person_id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == person_id)
    }

    fn person_mut(&mut self, person_id: &str) -> Result<&mut Person, DomainError> {
        self.persons
            .iter_mut()
            .find(|p| p.id == person_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Person, person_id.to_string()))
    }

    fn require_person(&self, person_id: &str) -> Result<(), DomainError> {
        match self.person(person_id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(
                NotFoundKind::Person,
                person_id.to_string(),
            )),
        }
    }

    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = require_name(name)?;
        Ok(())
    }

    /// Append a present, male-by-default person and return the new id.
    pub fn add_person(&mut self, name: &str) -> Result<PersonId, DomainError> {
        let person = Person::new(new_id(), require_name(name)?);
        let id = person.id.clone();
        self.persons.push(person);
        Ok(id)
    }

    /// Add one person per non-blank line of `text`.
    pub fn add_persons_bulk(&mut self, text: &str) -> Result<Vec<PersonId>, DomainError> {
        let names: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if names.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyName,
                "no names to add",
            ));
        }
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(self.add_person(name)?);
        }
        Ok(ids)
    }

    /// Flip the absent flag; returns the new value.
    pub fn toggle_absent(&mut self, person_id: &str) -> Result<bool, DomainError> {
        let person = self.person_mut(person_id)?;
        person.absent = !person.absent;
        Ok(person.absent)
    }

    pub fn toggle_gender(&mut self, person_id: &str) -> Result<Gender, DomainError> {
        let person = self.person_mut(person_id)?;
        person.gender = person.gender.toggled();
        Ok(person.gender)
    }

    /// Remove a person together with every rule that names them.
    pub fn remove_person(&mut self, person_id: &str) -> Result<Person, DomainError> {
        let idx = self
            .persons
            .iter()
            .position(|p| p.id == person_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Person, person_id.to_string()))?;
        let removed = self.persons.remove(idx);

        let existing: HashSet<&str> = self.persons.iter().map(|p| p.id.as_str()).collect();
        self.rules.retain(|rule| rule.references_only(&existing));
        Ok(removed)
    }

    /// Resize the grid (each side clamped to 1..=20).
    ///
    /// Disabled seats that fall outside the new bounds are forgotten, and fixed
    /// seat rules pointing outside the grid or at a disabled seat are dropped.
    pub fn resize_layout(&mut self, rows: u32, cols: u32) {
        let rows = rows.clamp(MIN_LAYOUT_SIDE, MAX_LAYOUT_SIDE);
        let cols = cols.clamp(MIN_LAYOUT_SIDE, MAX_LAYOUT_SIDE);
        let mut layout = Layout::new(rows, cols);
        layout.disabled_seats = self
            .layout
            .disabled_seats
            .iter()
            .filter(|seat| is_seat_inside_layout(&layout, seat))
            .cloned()
            .collect();
        self.layout = layout;
        self.drop_unreachable_fixed_seats();
    }

    /// Enable or disable one seat; returns whether it is now disabled.
    pub fn toggle_disabled_seat(&mut self, seat: &SeatKey) -> Result<bool, DomainError> {
        self.require_seat_in_layout(seat)?;
        let now_disabled = if self.layout.disabled_seats.remove(seat) {
            false
        } else {
            self.layout.disabled_seats.insert(seat.clone());
            true
        };
        self.drop_unreachable_fixed_seats();
        Ok(now_disabled)
    }

    /// Pin a person to a seat, replacing any earlier pin for that person.
    pub fn add_fixed_seat_rule(
        &mut self,
        person_id: &str,
        seat: &SeatKey,
    ) -> Result<RuleId, DomainError> {
        self.require_person(person_id)?;
        self.require_seat_in_layout(seat)?;
        if self.layout.is_disabled(seat) {
            return Err(DomainError::validation(
                ValidationKind::SeatDisabled,
                format!("seat {seat} is disabled and cannot be a fixed seat"),
            ));
        }

        self.rules.retain(
            |rule| !matches!(rule, Rule::FixedSeat { person_id: p, .. } if p == person_id),
        );
        let rule = Rule::fixed_seat(person_id, seat.clone());
        let id = rule.id().to_string();
        self.rules.push(rule);
        Ok(id)
    }

    /// Keep two different persons apart. The pair is unordered.
    pub fn add_separate_rule(&mut self, a: &str, b: &str) -> Result<RuleId, DomainError> {
        if a == b {
            return Err(DomainError::validation(
                ValidationKind::SamePerson,
                "a separation rule needs two different persons",
            ));
        }
        self.require_person(a)?;
        self.require_person(b)?;

        let duplicate = self.rules.iter().any(|rule| match rule {
            Rule::Separate {
                person_a_id,
                person_b_id,
                ..
            } => (person_a_id == a && person_b_id == b) || (person_a_id == b && person_b_id == a),
            _ => false,
        });
        if duplicate {
            return Err(DomainError::validation(
                ValidationKind::DuplicateRule,
                format!("{a} and {b} are already separated"),
            ));
        }

        let rule = Rule::separate(a, b);
        let id = rule.id().to_string();
        self.rules.push(rule);
        Ok(id)
    }

    pub fn remove_rule(&mut self, rule_id: &str) -> Result<Rule, DomainError> {
        let idx = self
            .rules
            .iter()
            .position(|r| r.id() == rule_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Rule, rule_id.to_string()))?;
        Ok(self.rules.remove(idx))
    }

    fn require_seat_in_layout(&self, seat: &SeatKey) -> Result<(), DomainError> {
        if seat.pos().is_none() {
            return Err(DomainError::validation(
                ValidationKind::InvalidSeat,
                format!("seat {seat:?} must look like r<row>c<col>"),
            ));
        }
        if !is_seat_inside_layout(&self.layout, seat) {
            return Err(DomainError::validation(
                ValidationKind::SeatOutsideLayout,
                format!(
                    "seat {seat} is outside the {}x{} layout",
                    self.layout.rows, self.layout.cols
                ),
            ));
        }
        Ok(())
    }

    fn drop_unreachable_fixed_seats(&mut self) {
        let layout = &self.layout;
        self.rules.retain(|rule| match rule {
            Rule::FixedSeat { seat, .. } => {
                is_seat_inside_layout(layout, seat) && !layout.is_disabled(seat)
            }
            _ => true,
        });
    }
}

fn require_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyName,
            "name must not be empty",
        ));
    }
    Ok(trimmed.to_string())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
