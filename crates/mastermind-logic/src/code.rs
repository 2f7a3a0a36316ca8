//! Code validation
//!
//! A code is a fixed-length sequence of symbols drawn from a bounded
//! alphabet `0..alphabet_size`. Guesses and revealed secrets go through
//! the same check.

/// Errors that can occur while validating a code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeError {
    /// Code length differs from the configured length.
    WrongLength { expected: u8, actual: usize },
    /// A symbol falls outside the configured alphabet.
    SymbolOutOfRange { index: usize, symbol: u8 },
}

impl core::fmt::Display for CodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CodeError::WrongLength { expected, actual } => {
                write!(f, "code has {} symbols, expected {}", actual, expected)
            }
            CodeError::SymbolOutOfRange { index, symbol } => {
                write!(f, "symbol {} at position {} outside alphabet", symbol, index)
            }
        }
    }
}

/// Validate a code against the configured length and alphabet.
pub fn validate_code(code: &[u8], code_length: u8, alphabet_size: u8) -> Result<(), CodeError> {
    if code.len() != code_length as usize {
        return Err(CodeError::WrongLength { expected: code_length, actual: code.len() });
    }
    for (index, &symbol) in code.iter().enumerate() {
        if symbol >= alphabet_size {
            return Err(CodeError::SymbolOutOfRange { index, symbol });
        }
    }
    Ok(())
}
