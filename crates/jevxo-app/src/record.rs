// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result, anyhow, bail};
use time::{Date, Time};

use crate::ids::EntityId;
use crate::model::{Choice, EntityKind};
use crate::validation::{
    ValidationError, ValidationResult, format_cents, format_time, parse_bool, parse_int_in_range,
    parse_percent, parse_required_cents, parse_required_date, parse_required_time, plain_cents,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer { min: i64, max: i64 },
    Money,
    Percent,
    Date,
    Time,
    Bool,
    Choice(&'static [(&'static str, &'static str)]),
    Reference(EntityKind),
}

impl FieldKind {
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer { .. } => "whole number",
            Self::Money => "amount like 1,250.00",
            Self::Percent => "0-100",
            Self::Date => "YYYY-MM-DD",
            Self::Time => "HH:MM",
            Self::Bool => "yes/no",
            Self::Choice(_) => "pick an option",
            Self::Reference(_) => "pick a record",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

impl ColumnSpec {
    pub const fn sortable(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: true,
        }
    }

    pub const fn plain(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
        }
    }
}

/// Tagged field value exchanged between records, forms and tables.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Empty,
    Text(String),
    Integer(i64),
    Money(i64),
    Percent(f64),
    Date(Date),
    Time(Time),
    Bool(bool),
    Choice(&'static str),
    Reference(i64),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn choice<T: Choice>(value: T) -> Self {
        Self::Choice(value.value())
    }

    pub fn reference<I: EntityId>(id: I) -> Self {
        Self::Reference(id.get())
    }

    pub fn optional_reference<I: EntityId>(id: Option<I>) -> Self {
        id.map_or(Self::Empty, Self::reference)
    }

    pub fn optional_date(value: Option<Date>) -> Self {
        value.map_or(Self::Empty, Self::Date)
    }

    pub fn optional_time(value: Option<Time>) -> Self {
        value.map_or(Self::Empty, Self::Time)
    }

    pub fn optional_percent(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Percent)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Parses free text typed into a form field. Blank input is `Empty`.
    pub fn parse(kind: FieldKind, raw: &str) -> ValidationResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::Empty);
        }
        match kind {
            FieldKind::Text => Ok(Self::Text(trimmed.to_owned())),
            FieldKind::Integer { min, max } => parse_int_in_range(trimmed, min, max).map(Self::Integer),
            FieldKind::Money => parse_required_cents(trimmed).map(Self::Money),
            FieldKind::Percent => parse_percent(trimmed).map(Self::Percent),
            FieldKind::Date => parse_required_date(trimmed).map(Self::Date),
            FieldKind::Time => parse_required_time(trimmed).map(Self::Time),
            FieldKind::Bool => parse_bool(trimmed).map(Self::Bool),
            FieldKind::Choice(options) => options
                .iter()
                .find(|(value, label)| {
                    value.eq_ignore_ascii_case(trimmed) || label.eq_ignore_ascii_case(trimmed)
                })
                .map(|(value, _)| Self::Choice(*value))
                .ok_or(ValidationError::InvalidChoice),
            FieldKind::Reference(_) => trimmed
                .parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .map(Self::Reference)
                .ok_or(ValidationError::InvalidReference),
        }
    }

    /// Checks this value against a field kind. `Empty` always passes;
    /// required-ness is enforced at form submit.
    pub fn check_kind(&self, kind: FieldKind) -> ValidationResult<()> {
        match (kind, self) {
            (_, Self::Empty) => Ok(()),
            (FieldKind::Text, Self::Text(_)) => Ok(()),
            (FieldKind::Integer { min, max }, Self::Integer(value)) => {
                if *value < min || *value > max {
                    Err(ValidationError::OutOfRange { min, max })
                } else {
                    Ok(())
                }
            }
            (FieldKind::Money, Self::Money(value)) => {
                if *value < 0 {
                    Err(ValidationError::NegativeMoney)
                } else {
                    Ok(())
                }
            }
            (FieldKind::Percent, Self::Percent(value)) => {
                if (0.0..=100.0).contains(value) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidPercent)
                }
            }
            (FieldKind::Date, Self::Date(_))
            | (FieldKind::Time, Self::Time(_))
            | (FieldKind::Bool, Self::Bool(_)) => Ok(()),
            (FieldKind::Choice(options), Self::Choice(value)) => {
                if options.iter().any(|(option, _)| option == value) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidChoice)
                }
            }
            (FieldKind::Reference(_), Self::Reference(id)) => {
                if *id > 0 {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidReference)
                }
            }
            _ => Err(ValidationError::WrongKind),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Money(cents) => format_cents(*cents),
            Self::Percent(value) => format!("{value:.1}%"),
            Self::Date(value) => value.to_string(),
            Self::Time(value) => format_time(*value),
            Self::Bool(true) => "yes".to_owned(),
            Self::Bool(false) => "no".to_owned(),
            Self::Choice(value) => (*value).to_owned(),
            Self::Reference(id) => format!("#{id}"),
        }
    }

    /// Text suitable for editing; money drops the currency formatting.
    pub fn raw_text(&self) -> String {
        match self {
            Self::Money(cents) => plain_cents(*cents),
            Self::Percent(value) => format!("{value}"),
            Self::Reference(id) => id.to_string(),
            other => other.display(),
        }
    }

    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Empty, Self::Empty) => Ordering::Equal,
            (Self::Empty, _) => Ordering::Less,
            (_, Self::Empty) => Ordering::Greater,
            (Self::Text(left), Self::Text(right)) => {
                left.to_lowercase().cmp(&right.to_lowercase())
            }
            (Self::Integer(left), Self::Integer(right))
            | (Self::Money(left), Self::Money(right))
            | (Self::Reference(left), Self::Reference(right)) => left.cmp(right),
            (Self::Percent(left), Self::Percent(right)) => left.total_cmp(right),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Time(left), Self::Time(right)) => left.cmp(right),
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Choice(left), Self::Choice(right)) => {
                left.to_lowercase().cmp(&right.to_lowercase())
            }
            _ => self.display().cmp(&other.display()),
        }
    }

    pub fn into_text(self, key: &str) -> Result<String> {
        match self {
            Self::Empty => Ok(String::new()),
            Self::Text(value) => Ok(value),
            other => Err(mismatch(key, "text", &other)),
        }
    }

    pub fn into_integer(self, key: &str) -> Result<i64> {
        match self {
            Self::Integer(value) => Ok(value),
            Self::Empty => Err(missing(key)),
            other => Err(mismatch(key, "whole number", &other)),
        }
    }

    pub fn into_money(self, key: &str) -> Result<i64> {
        match self {
            Self::Money(cents) if cents >= 0 => Ok(cents),
            Self::Money(_) => bail!("{key} cannot be negative -- enter a positive amount and retry"),
            Self::Empty => Err(missing(key)),
            other => Err(mismatch(key, "money", &other)),
        }
    }

    pub fn into_optional_percent(self, key: &str) -> Result<Option<f64>> {
        match self {
            Self::Empty => Ok(None),
            Self::Percent(value) => Ok(Some(value)),
            other => Err(mismatch(key, "percentage", &other)),
        }
    }

    pub fn into_date(self, key: &str) -> Result<Date> {
        self.into_optional_date(key)?.ok_or_else(|| missing(key))
    }

    pub fn into_optional_date(self, key: &str) -> Result<Option<Date>> {
        match self {
            Self::Empty => Ok(None),
            Self::Date(value) => Ok(Some(value)),
            other => Err(mismatch(key, "date", &other)),
        }
    }

    pub fn into_optional_time(self, key: &str) -> Result<Option<Time>> {
        match self {
            Self::Empty => Ok(None),
            Self::Time(value) => Ok(Some(value)),
            other => Err(mismatch(key, "time", &other)),
        }
    }

    pub fn into_bool(self, key: &str) -> Result<bool> {
        match self {
            Self::Bool(value) => Ok(value),
            Self::Empty => Ok(false),
            other => Err(mismatch(key, "yes/no", &other)),
        }
    }

    pub fn into_choice<T: Choice>(self, key: &str) -> Result<T> {
        match self {
            Self::Choice(value) => T::from_value(value)
                .ok_or_else(|| anyhow!("{key} does not accept {value:?} -- pick a listed option")),
            Self::Empty => Err(missing(key)),
            other => Err(mismatch(key, "option", &other)),
        }
    }

    pub fn into_reference<I: EntityId>(self, key: &str) -> Result<I> {
        self.into_optional_reference(key)?
            .ok_or_else(|| missing(key))
    }

    pub fn into_optional_reference<I: EntityId>(self, key: &str) -> Result<Option<I>> {
        match self {
            Self::Empty => Ok(None),
            Self::Reference(id) => Ok(Some(I::new(id))),
            other => Err(mismatch(key, "record reference", &other)),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn missing(key: &str) -> anyhow::Error {
    anyhow!("{key} is required -- enter a value and retry")
}

fn mismatch(key: &str, expected: &str, got: &FieldValue) -> anyhow::Error {
    anyhow!("{key} expects {expected}, got {got:?}")
}

/// Partial set of field values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    values: BTreeMap<&'static str, FieldValue>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: FieldValue) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &'static str, value: FieldValue) -> Option<FieldValue> {
        self.values.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A typed entity record that can be edited through field patches.
pub trait Record: Clone + fmt::Debug {
    type Id: EntityId;
    const ENTITY: EntityKind;

    fn id(&self) -> Self::Id;

    /// Default field values for a freshly created record.
    fn blank(id: Self::Id, today: Date) -> Self;

    /// Editable form fields, in form order.
    fn fields() -> &'static [FieldSpec];

    /// Table columns, in display order.
    fn columns() -> &'static [ColumnSpec];

    /// Human name used for references and confirmations.
    fn label(&self) -> String;

    /// Current value for a field or column key; unknown keys are `Empty`.
    fn value(&self, key: &str) -> FieldValue;

    fn set(&mut self, key: &str, value: FieldValue) -> Result<()>;

    fn field(key: &str) -> Option<&'static FieldSpec> {
        Self::fields().iter().find(|spec| spec.key == key)
    }

    /// Applies every patch entry or none of them.
    fn merge(&mut self, patch: &Patch) -> Result<()> {
        let mut next = self.clone();
        for (key, value) in patch.iter() {
            if let Some(spec) = Self::field(key) {
                value
                    .check_kind(spec.kind)
                    .with_context(|| format!("{} {}", Self::ENTITY.label(), spec.label))?;
            }
            next.set(key, value.clone())
                .with_context(|| format!("update {} field {key}", Self::ENTITY.label()))?;
        }
        *self = next;
        Ok(())
    }

    /// Form values for every editable field.
    fn values(&self) -> Patch {
        Self::fields()
            .iter()
            .fold(Patch::new(), |patch, spec| patch.with(spec.key, self.value(spec.key)))
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKind, FieldValue, Patch};
    use crate::model::{Choice, ClientStatus};
    use crate::validation::ValidationError;
    use std::cmp::Ordering;
    use time::macros::{date, time};

    #[test]
    fn parse_choice_accepts_value_or_label() {
        let kind = FieldKind::Choice(ClientStatus::OPTIONS);
        assert_eq!(
            FieldValue::parse(kind, "Inactive"),
            Ok(FieldValue::Choice("inactive"))
        );
        assert_eq!(
            FieldValue::parse(kind, "active"),
            Ok(FieldValue::Choice("active"))
        );
        assert_eq!(
            FieldValue::parse(kind, "archived"),
            Err(ValidationError::InvalidChoice)
        );
    }

    #[test]
    fn parse_blank_is_empty_for_every_kind() {
        for kind in [
            FieldKind::Text,
            FieldKind::Money,
            FieldKind::Date,
            FieldKind::Time,
            FieldKind::Integer { min: 1, max: 5 },
        ] {
            assert_eq!(FieldValue::parse(kind, "   "), Ok(FieldValue::Empty));
        }
    }

    #[test]
    fn check_kind_rejects_mismatches() {
        assert_eq!(
            FieldValue::text("abc").check_kind(FieldKind::Money),
            Err(ValidationError::WrongKind)
        );
        assert_eq!(
            FieldValue::Integer(7).check_kind(FieldKind::Integer { min: 1, max: 5 }),
            Err(ValidationError::OutOfRange { min: 1, max: 5 })
        );
        assert_eq!(
            FieldValue::Money(-1).check_kind(FieldKind::Money),
            Err(ValidationError::NegativeMoney)
        );
        assert!(FieldValue::Empty.check_kind(FieldKind::Date).is_ok());
    }

    #[test]
    fn display_and_raw_text_differ_for_money() {
        let value = FieldValue::Money(123_456);
        assert_eq!(value.display(), "$1,234.56");
        assert_eq!(value.raw_text(), "1234.56");
        assert_eq!(FieldValue::Time(time!(9:05)).display(), "09:05");
        assert_eq!(FieldValue::Percent(42.0).display(), "42.0%");
    }

    #[test]
    fn cmp_value_orders_empty_first_and_text_case_insensitively() {
        assert_eq!(
            FieldValue::Empty.cmp_value(&FieldValue::Date(date!(2024 - 01 - 01))),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::text("alpha").cmp_value(&FieldValue::text("Beta")),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Money(900).cmp_value(&FieldValue::Money(10_000)),
            Ordering::Less
        );
    }

    #[test]
    fn into_helpers_report_field_key() -> anyhow::Result<()> {
        let err = FieldValue::text("x")
            .into_money("amount")
            .expect_err("text is not money");
        assert!(err.to_string().contains("amount"));
        let status: ClientStatus = FieldValue::Choice("inactive").into_choice("status")?;
        assert_eq!(status, ClientStatus::Inactive);
        Ok(())
    }

    #[test]
    fn patch_builder_keeps_latest_value() {
        let patch = Patch::new()
            .with("name", FieldValue::text("A"))
            .with("name", FieldValue::text("B"));
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("name"), Some(&FieldValue::text("B")));
    }
}
