// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const MONTH_LABEL_LAYOUT: &str = "YYYY-MM";
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    InvalidId,
    InvalidValue,
    InvalidMonthLabel,
    ShortPassword,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => f.write_str("required name must not be empty"),
            Self::InvalidId => f.write_str("identifier must be a positive integer"),
            Self::InvalidValue => f.write_str("value must be a finite non-negative number"),
            Self::InvalidMonthLabel => {
                write!(f, "month label must use the {MONTH_LABEL_LAYOUT} layout")
            }
            Self::ShortPassword => {
                write!(f, "password must be at least {MIN_PASSWORD_LEN} characters")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn require_name(input: &str) -> ValidationResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

pub fn require_positive_id(value: i64) -> ValidationResult<i64> {
    if value <= 0 {
        return Err(ValidationError::InvalidId);
    }
    Ok(value)
}

pub fn require_measure(value: f64) -> ValidationResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue);
    }
    Ok(value)
}

pub fn require_password(input: &str) -> ValidationResult<&str> {
    if input.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::ShortPassword);
    }
    Ok(input)
}

/// Normalizes a `YYYY-MM` month label. The canonical form sorts
/// chronologically, which the loss report relies on.
pub fn parse_month_label(input: &str) -> ValidationResult<String> {
    let trimmed = input.trim();
    let (year, month) = trimmed
        .split_once('-')
        .ok_or(ValidationError::InvalidMonthLabel)?;
    if year.len() != 4 || !year.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidMonthLabel);
    }
    if month.len() != 2 || !month.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidMonthLabel);
    }
    let month_number = month
        .parse::<u8>()
        .map_err(|_| ValidationError::InvalidMonthLabel)?;
    if !(1..=12).contains(&month_number) {
        return Err(ValidationError::InvalidMonthLabel);
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{
        ValidationError, parse_month_label, require_measure, require_name, require_password,
        require_positive_id,
    };

    #[test]
    fn require_name_trims_surrounding_whitespace() {
        assert_eq!(require_name("  Tanque Norte  ").unwrap(), "Tanque Norte");
    }

    #[test]
    fn require_name_rejects_blank_input() {
        for input in ["", "   ", "\t\n"] {
            assert_eq!(require_name(input), Err(ValidationError::EmptyName));
        }
    }

    #[test]
    fn require_positive_id_test() {
        assert_eq!(require_positive_id(1).unwrap(), 1);
        for value in [0, -1, i64::MIN] {
            assert_eq!(require_positive_id(value), Err(ValidationError::InvalidId));
        }
    }

    #[test]
    fn require_measure_test() {
        assert_eq!(require_measure(0.0).unwrap(), 0.0);
        assert_eq!(require_measure(1523.75).unwrap(), 1523.75);
        for value in [-0.1, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(require_measure(value), Err(ValidationError::InvalidValue));
        }
    }

    #[test]
    fn require_password_enforces_minimum_length() {
        assert!(require_password("secreto").is_ok());
        assert_eq!(
            require_password("1234"),
            Err(ValidationError::ShortPassword)
        );
    }

    #[test]
    fn parse_month_label_test() {
        assert_eq!(parse_month_label("2026-03").unwrap(), "2026-03");
        assert_eq!(parse_month_label(" 2026-12 ").unwrap(), "2026-12");
        for input in ["", "03-2026", "2026-13", "2026-0", "2026/03", "abcd-ef"] {
            assert_eq!(
                parse_month_label(input),
                Err(ValidationError::InvalidMonthLabel),
                "input {input:?}"
            );
        }
    }
}
