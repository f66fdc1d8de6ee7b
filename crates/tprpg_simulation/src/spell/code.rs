//! Spell code: последовательность digit'ов затронутых spell points

use std::fmt;
use std::str::FromStr;

/// Максимальная длина spell code (при достижении — cast resolution)
pub const MAX_SPELL_LENGTH: usize = 5;

/// Identifier spell point (один digit 0..=9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpellPointId(u8);

impl SpellPointId {
    pub fn new(digit: u8) -> Result<Self, SpellError> {
        if digit > 9 {
            return Err(SpellError::InvalidPointId(digit.to_string()));
        }
        Ok(Self(digit))
    }

    pub fn digit(self) -> u8 {
        self.0
    }
}

impl fmt::Display for SpellPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SpellPointId {
    type Err = SpellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
            (Some(digit), None) => Ok(Self(digit as u8)),
            _ => Err(SpellError::InvalidPointId(s.to_string())),
        }
    }
}

/// Накопленный spell code
///
/// Инвариант: `len() <= MAX_SPELL_LENGTH` — push в полный code отклоняется.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SpellCode {
    digits: Vec<u8>,
}

impl SpellCode {
    pub fn new() -> Self {
        Self {
            digits: Vec::with_capacity(MAX_SPELL_LENGTH),
        }
    }

    /// Добавить point. `false` если code уже полный (ничего не меняется)
    pub fn push(&mut self, point: SpellPointId) -> bool {
        if self.is_complete() {
            return false;
        }
        self.digits.push(point.digit());
        true
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() >= MAX_SPELL_LENGTH
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }
}

impl fmt::Display for SpellCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.digits {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

impl FromStr for SpellCode {
    type Err = SpellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut code = SpellCode::new();
        for (index, c) in s.chars().enumerate() {
            if index >= MAX_SPELL_LENGTH {
                return Err(SpellError::CodeTooLong(s.chars().count()));
            }
            let point = c
                .to_digit(10)
                .map(|d| SpellPointId(d as u8))
                .ok_or_else(|| SpellError::InvalidPointId(c.to_string()))?;
            code.push(point);
        }
        Ok(code)
    }
}

/// Ошибки построения spell code / point id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellError {
    InvalidPointId(String),
    CodeTooLong(usize),
}

impl fmt::Display for SpellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpellError::InvalidPointId(raw) => write!(f, "Invalid spell point id: {:?}", raw),
            SpellError::CodeTooLong(len) => {
                write!(f, "Spell code too long: {} symbols (max {})", len, MAX_SPELL_LENGTH)
            }
        }
    }
}

impl std::error::Error for SpellError {}
