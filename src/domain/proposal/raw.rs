use std::fmt;

use crate::domain::AppError;
use crate::domain::proposal::Address;

/// One positional value of a contract read, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Uint(u128),
    Bool(bool),
    Address(Address),
    Text(String),
}

impl RawValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Uint(_) => "uint",
            RawValue::Bool(_) => "bool",
            RawValue::Address(_) => "address",
            RawValue::Text(_) => "string",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Uint(v) => write!(f, "{}", v),
            RawValue::Bool(v) => write!(f, "{}", v),
            RawValue::Address(v) => write!(f, "{}", v),
            RawValue::Text(v) => write!(f, "{:?}", v),
        }
    }
}

/// Positional result of a contract read.
pub type RawTuple = Vec<RawValue>;

/// Typed cursor over a raw tuple. Every accessor names the field it reads so
/// shape errors say which field was wrong.
pub(crate) struct TupleReader<'a> {
    what: &'static str,
    values: &'a [RawValue],
}

impl<'a> TupleReader<'a> {
    pub(crate) fn new(
        what: &'static str,
        values: &'a [RawValue],
        expected_len: usize,
    ) -> Result<Self, AppError> {
        if values.len() != expected_len {
            return Err(AppError::malformed(
                what,
                format!("expected {} fields, got {}", expected_len, values.len()),
            ));
        }
        Ok(Self { what, values })
    }

    fn mismatch(&self, position: usize, field: &str, expected: &str) -> AppError {
        AppError::malformed(
            self.what,
            format!(
                "field {} ({}) should be {}, got {}",
                position,
                field,
                expected,
                self.values[position].type_name()
            ),
        )
    }

    pub(crate) fn uint(&self, position: usize, field: &str) -> Result<u128, AppError> {
        match &self.values[position] {
            RawValue::Uint(v) => Ok(*v),
            _ => Err(self.mismatch(position, field, "uint")),
        }
    }

    pub(crate) fn u64(&self, position: usize, field: &str) -> Result<u64, AppError> {
        let value = self.uint(position, field)?;
        u64::try_from(value).map_err(|_| {
            let detail = format!("field {} ({}) out of range: {}", position, field, value);
            AppError::malformed(self.what, detail)
        })
    }

    pub(crate) fn text(&self, position: usize, field: &str) -> Result<String, AppError> {
        match &self.values[position] {
            RawValue::Text(v) => Ok(v.clone()),
            _ => Err(self.mismatch(position, field, "string")),
        }
    }

    pub(crate) fn address(&self, position: usize, field: &str) -> Result<Address, AppError> {
        match &self.values[position] {
            RawValue::Address(v) => Ok(v.clone()),
            _ => Err(self.mismatch(position, field, "address")),
        }
    }
}
