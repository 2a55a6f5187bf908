// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;
use time::{Date, Time};

const DATE_LAYOUT: &str = "YYYY-MM-DD";
const TIME_LAYOUT: &str = "HH:MM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidMoney,
    NegativeMoney,
    InvalidDate,
    InvalidTime,
    InvalidInt,
    OutOfRange { min: i64, max: i64 },
    InvalidPercent,
    InvalidBool,
    InvalidChoice,
    InvalidReference,
    WrongKind,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMoney => f.write_str("invalid money value"),
            Self::NegativeMoney => f.write_str("negative money value"),
            Self::InvalidDate => write!(f, "invalid date value; use {DATE_LAYOUT}"),
            Self::InvalidTime => write!(f, "invalid time value; use {TIME_LAYOUT}"),
            Self::InvalidInt => f.write_str("invalid integer value"),
            Self::OutOfRange { min, max } => write!(f, "value must be between {min} and {max}"),
            Self::InvalidPercent => f.write_str("invalid percentage; use 0-100"),
            Self::InvalidBool => f.write_str("invalid yes/no value"),
            Self::InvalidChoice => f.write_str("value is not one of the listed options"),
            Self::InvalidReference => f.write_str("invalid record reference"),
            Self::WrongKind => f.write_str("value does not match the field type"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn parse_required_cents(input: &str) -> ValidationResult<i64> {
    parse_cents(input.trim())
}

pub fn format_cents(cents: i64) -> String {
    let (sign, cents) = split_sign(cents);
    let dollars = cents / 100;
    let remainder = cents % 100;
    format!("{sign}${}.{:02}", group_thousands(dollars), remainder)
}

/// Plain decimal rendering without currency symbol or grouping.
pub fn plain_cents(cents: i64) -> String {
    let (sign, cents) = split_sign(cents);
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

pub fn parse_required_date(input: &str) -> ValidationResult<Date> {
    Date::parse(input.trim(), &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

pub fn parse_required_time(input: &str) -> ValidationResult<Time> {
    Time::parse(input.trim(), &format_description!("[hour]:[minute]"))
        .map_err(|_| ValidationError::InvalidTime)
}

pub fn format_time(value: Time) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

pub fn parse_int_in_range(input: &str, min: i64, max: i64) -> ValidationResult<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidInt);
    }
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidInt)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange { min, max });
    }
    Ok(value)
}

pub fn parse_percent(input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidPercent);
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidPercent)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::InvalidPercent);
    }
    Ok(value)
}

pub fn parse_bool(input: &str) -> ValidationResult<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" | "y" => Ok(true),
        "0" | "false" | "off" | "no" | "n" => Ok(false),
        _ => Err(ValidationError::InvalidBool),
    }
}

/// Percentage of `cents` rounded half-up to the nearest cent.
pub fn percent_of_cents(cents: i64, percent: i64) -> i64 {
    let scaled = i128::from(cents) * i128::from(percent);
    let rounded = if scaled >= 0 {
        (scaled + 50) / 100
    } else {
        (scaled - 50) / 100
    };
    rounded as i64
}

/// Accepts `1234`, `1,234.5`, `$1,234.56` and `.75`; at most two decimals.
fn parse_cents(input: &str) -> ValidationResult<i64> {
    let clean = input.replace(',', "");
    if clean.starts_with('-') {
        return Err(ValidationError::NegativeMoney);
    }
    let clean = clean.strip_prefix('$').unwrap_or(&clean);

    let (whole, frac) = match clean.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (clean, None),
    };
    if whole.is_empty() && frac.is_none_or(str::is_empty) {
        return Err(ValidationError::InvalidMoney);
    }

    let dollars = if whole.is_empty() { 0 } else { digits(whole)? };
    let cents = match frac {
        None => 0,
        Some(frac) if frac.is_empty() || frac.len() > 2 => {
            return Err(ValidationError::InvalidMoney);
        }
        Some(frac) if frac.len() == 1 => digits(frac)? * 10,
        Some(frac) => digits(frac)?,
    };

    dollars
        .checked_mul(100)
        .and_then(|value| value.checked_add(cents))
        .ok_or(ValidationError::InvalidMoney)
}

fn digits(input: &str) -> ValidationResult<i64> {
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidMoney);
    }
    input.parse().map_err(|_| ValidationError::InvalidMoney)
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - head) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn split_sign(cents: i64) -> (&'static str, i64) {
    match cents {
        i64::MIN => ("-", i64::MAX),
        negative if negative < 0 => ("-", -negative),
        positive => ("", positive),
    }
}
