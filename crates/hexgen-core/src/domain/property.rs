//! Property specification grammar.
//!
//! A property specification is a comma-separated list of clauses:
//!
//! ```text
//! name:type[(min,max)][:option[:option...]]
//! ```
//!
//! e.g. `nom:string(3,100):unique,age:int(0,150),bio:text:nullable`.
//!
//! The bound group itself contains a comma, so clauses are split with a
//! depth-aware scan: a comma only separates clauses outside parentheses.
//!
//! # Adding a type
//!
//! 1. Add the [`BaseType`] variant
//! 2. Add its keywords to [`BaseType::from_keyword`]
//! 3. Give it a [`BoundKind`] row in [`BaseType::bound_kind`]

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::{error::PropertyParseError, naming::is_identifier};

// ── BaseType ─────────────────────────────────────────────────────────────────

/// Closed set of property types understood by the generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Text,
    Integer,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Email,
    Uuid,
}

impl BaseType {
    /// Canonical keyword, accepted back by [`BaseType::from_keyword`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Email => "email",
            Self::Uuid => "uuid",
        }
    }

    /// Resolve a type keyword, case-insensitively.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let ty = match keyword.to_ascii_lowercase().as_str() {
            "text" | "string" | "str" => Self::Text,
            "integer" | "int" => Self::Integer,
            "decimal" | "float" | "double" => Self::Decimal,
            "boolean" | "bool" => Self::Boolean,
            "date" => Self::Date,
            "datetime" | "date_time" | "timestamp" => Self::DateTime,
            "email" => Self::Email,
            "uuid" => Self::Uuid,
            _ => return None,
        };
        Some(ty)
    }

    /// Which bound pair, if any, this type accepts.
    pub const fn bound_kind(&self) -> BoundKind {
        match self {
            Self::Text => BoundKind::Length,
            Self::Integer => BoundKind::IntegerValue,
            Self::Decimal => BoundKind::DecimalValue,
            Self::Boolean | Self::Date | Self::DateTime | Self::Email | Self::Uuid => {
                BoundKind::None
            }
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The meaning of a `(min,max)` group for a given type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// `(minLength,maxLength)`
    Length,
    /// `(minValue,maxValue)` over integers
    IntegerValue,
    /// `(minValue,maxValue)` over decimals
    DecimalValue,
    /// No bound group accepted.
    None,
}

// ── Constraints / flags ──────────────────────────────────────────────────────

/// Optional bounds on a property. A `None` side means "no bound".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraints {
    #[default]
    Unbounded,
    Length { min: Option<u64>, max: Option<u64> },
    IntegerRange { min: Option<i64>, max: Option<i64> },
    DecimalRange { min: Option<f64>, max: Option<f64> },
}

impl Constraints {
    pub const fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Bounds rendered as `(min, max)` strings, for templates and display.
    pub fn bounds(&self) -> Option<(Option<String>, Option<String>)> {
        fn s<T: ToString>(v: Option<T>) -> Option<String> {
            v.map(|v| v.to_string())
        }
        match *self {
            Self::Unbounded => None,
            Self::Length { min, max } => Some((s(min), s(max))),
            Self::IntegerRange { min, max } => Some((s(min), s(max))),
            Self::DecimalRange { min, max } => Some((s(min), s(max))),
        }
    }
}

impl fmt::Display for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds() {
            None => Ok(()),
            Some((min, max)) => write!(
                f,
                "({},{})",
                min.unwrap_or_default(),
                max.unwrap_or_default()
            ),
        }
    }
}

/// Independent boolean options of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PropertyFlags {
    pub unique: bool,
    pub nullable: bool,
}

// ── PropertyDescriptor ───────────────────────────────────────────────────────

/// One parsed attribute. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    name: String,
    base_type: BaseType,
    constraints: Constraints,
    flags: PropertyFlags,
}

impl PropertyDescriptor {
    /// Parse a single `name:type(...):options` clause.
    pub fn parse(clause: &str) -> Result<Self, PropertyParseError> {
        parse_clause(clause)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn base_type(&self) -> BaseType {
        self.base_type
    }
    pub const fn constraints(&self) -> Constraints {
        self.constraints
    }
    pub const fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Unique properties get generated lookup and existence accessors.
    pub const fn is_lookup_key(&self) -> bool {
        self.flags.unique
    }
}

impl fmt::Display for PropertyDescriptor {
    /// Canonical grammar form; parsing it yields an equal descriptor.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.name, self.base_type, self.constraints)?;
        if self.flags.unique {
            f.write_str(":unique")?;
        }
        if self.flags.nullable {
            f.write_str(":nullable")?;
        }
        Ok(())
    }
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Parse a full property specification.
///
/// Empty (or all-whitespace) input yields an empty list.
pub fn parse_properties(raw: &str) -> Result<Vec<PropertyDescriptor>, PropertyParseError> {
    let clauses = split_clauses(raw)?;

    let mut seen = HashSet::with_capacity(clauses.len());
    let mut properties = Vec::with_capacity(clauses.len());
    for clause in &clauses {
        let property = parse_clause(clause)?;
        if !seen.insert(property.name.clone()) {
            return Err(PropertyParseError::DuplicateProperty {
                name: property.name,
            });
        }
        properties.push(property);
    }

    Ok(properties)
}

/// Split on commas at parenthesis depth zero.
fn split_clauses(raw: &str) -> Result<Vec<String>, PropertyParseError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;

    for (position, c) in raw.char_indices() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(PropertyParseError::UnexpectedClose { position })?;
                current.push(c);
            }
            ',' if depth == 0 => {
                push_clause(&mut clauses, &current)?;
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if depth != 0 {
        return Err(PropertyParseError::UnterminatedGroup {
            clause: current.trim().to_string(),
        });
    }
    push_clause(&mut clauses, &current)?;

    Ok(clauses)
}

fn push_clause(clauses: &mut Vec<String>, buffer: &str) -> Result<(), PropertyParseError> {
    let clause = buffer.trim();
    if clause.is_empty() {
        return Err(PropertyParseError::EmptyClause {
            index: clauses.len(),
        });
    }
    clauses.push(clause.to_string());
    Ok(())
}

/// Split a clause on `:` outside parentheses.
fn split_segments(clause: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, c) in clause.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                segments.push(clause[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(clause[start..].trim());
    segments
}

fn parse_clause(clause: &str) -> Result<PropertyDescriptor, PropertyParseError> {
    let clause = clause.trim();
    let segments = split_segments(clause);

    let (name, type_token, tail) = match segments.as_slice() {
        [name, type_token, tail @ ..] => (*name, *type_token, tail),
        _ => {
            return Err(PropertyParseError::MalformedClause {
                clause: clause.to_string(),
            });
        }
    };

    if !is_identifier(name) {
        return Err(PropertyParseError::InvalidName {
            name: name.to_string(),
        });
    }

    // The bound group is either glued to the type or the first group-shaped
    // tail segment.
    let (keyword, mut group) = match type_token.find('(') {
        Some(open) => (
            type_token[..open].trim(),
            Some(type_token[open..].trim()),
        ),
        None => (type_token, None),
    };

    if keyword.is_empty() {
        return Err(PropertyParseError::MalformedClause {
            clause: clause.to_string(),
        });
    }

    let base_type =
        BaseType::from_keyword(keyword).ok_or_else(|| PropertyParseError::UnknownType {
            name: name.to_string(),
            type_name: keyword.to_string(),
        })?;

    let mut options: Vec<&str> = tail.to_vec();
    if group.is_none() {
        if let Some(pos) = options.iter().position(|s| s.starts_with('(')) {
            group = Some(options.remove(pos));
        }
    }

    let constraints = match group {
        Some(group) => parse_bounds(name, base_type, group)?,
        None => Constraints::Unbounded,
    };

    let mut flags = PropertyFlags::default();
    for option in &options {
        match option.to_ascii_lowercase().as_str() {
            "unique" => flags.unique = true,
            "nullable" => flags.nullable = true,
            "" => {
                return Err(PropertyParseError::MalformedClause {
                    clause: clause.to_string(),
                });
            }
            _ => {
                return Err(PropertyParseError::UnknownOption {
                    name: name.to_string(),
                    option: option.to_string(),
                });
            }
        }
    }

    Ok(PropertyDescriptor {
        name: name.to_string(),
        base_type,
        constraints,
        flags,
    })
}

fn parse_bounds(
    name: &str,
    base_type: BaseType,
    group: &str,
) -> Result<Constraints, PropertyParseError> {
    let malformed = |reason: &str| PropertyParseError::MalformedBounds {
        name: name.to_string(),
        group: group.to_string(),
        reason: reason.to_string(),
    };

    let inner = group
        .strip_prefix('(')
        .and_then(|g| g.strip_suffix(')'))
        .ok_or_else(|| malformed("expected a (min,max) group"))?;

    let pair = |inner: &str| -> Result<(String, String), PropertyParseError> {
        let (min, max) = inner
            .split_once(',')
            .ok_or_else(|| malformed("expected two values separated by a comma"))?;
        if max.contains(',') {
            return Err(malformed("expected exactly two values"));
        }
        let (min, max) = (min.trim(), max.trim());
        if min.is_empty() && max.is_empty() {
            return Err(malformed("at least one bound is required"));
        }
        Ok((min.to_string(), max.to_string()))
    };

    let constraints = match base_type.bound_kind() {
        BoundKind::None => {
            return Err(PropertyParseError::BoundsNotAllowed {
                name: name.to_string(),
                base_type: base_type.to_string(),
            });
        }
        BoundKind::Length => {
            let (min, max) = pair(inner)?;
            let min = parse_bound::<u64>(name, &min, "non-negative integer")?;
            let max = parse_bound::<u64>(name, &max, "non-negative integer")?;
            check_order(name, min, max)?;
            Constraints::Length { min, max }
        }
        BoundKind::IntegerValue => {
            let (min, max) = pair(inner)?;
            let min = parse_bound::<i64>(name, &min, "integer")?;
            let max = parse_bound::<i64>(name, &max, "integer")?;
            check_order(name, min, max)?;
            Constraints::IntegerRange { min, max }
        }
        BoundKind::DecimalValue => {
            let (min, max) = pair(inner)?;
            let min = parse_decimal(name, &min)?;
            let max = parse_decimal(name, &max)?;
            check_order(name, min, max)?;
            Constraints::DecimalRange { min, max }
        }
    };

    Ok(constraints)
}

fn parse_bound<T: std::str::FromStr>(
    name: &str,
    value: &str,
    expected: &'static str,
) -> Result<Option<T>, PropertyParseError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| PropertyParseError::NonNumericBound {
            name: name.to_string(),
            value: value.to_string(),
            expected,
        })
}

fn parse_decimal(name: &str, value: &str) -> Result<Option<f64>, PropertyParseError> {
    match parse_bound::<f64>(name, value, "decimal number")? {
        Some(v) if !v.is_finite() => Err(PropertyParseError::NonNumericBound {
            name: name.to_string(),
            value: value.to_string(),
            expected: "decimal number",
        }),
        other => Ok(other),
    }
}

fn check_order<T: PartialOrd + fmt::Display>(
    name: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), PropertyParseError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(PropertyParseError::InvertedBounds {
            name: name.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }),
        _ => Ok(()),
    }
}
