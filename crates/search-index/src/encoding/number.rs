use super::Token;
use crate::error::EncodingError;
use serde::Serialize;

/// Precision step used by the index when none is configured.
pub const DEFAULT_PRECISION_STEP: u32 = 16;

/// Header byte of a numeric term; the shift is added to it.
const NUMERIC_TERM_MARKER: u8 = 0x60;

/// Map an f64 onto a u64 whose unsigned order matches the numeric order.
///
/// Algorithm:
/// 1. Reject NaN.
/// 2. Normalize -0.0 to +0.0.
/// 3. Negative values flip all bits, everything else flips the sign bit.
pub fn sortable_bits(value: f64) -> Result<u64, EncodingError> {
    if value.is_nan() {
        return Err(EncodingError::NaN);
    }

    let value = if value == 0.0 { 0.0_f64 } else { value };
    let bits = value.to_bits();

    if bits & (1u64 << 63) != 0 {
        Ok(!bits)
    } else {
        Ok(bits ^ (1u64 << 63))
    }
}

/// Encode the sortable bits shifted right by `shift` as one term.
///
/// The term is the marker byte followed by the significant big-endian bytes
/// of `bits >> shift`, so terms of one shift sort like the values they cover.
fn shifted_term(bits: u64, shift: u32) -> Token {
    let width = (64 - shift).div_ceil(8) as usize;
    let shifted = (bits >> shift).to_be_bytes();

    let mut term = Vec::with_capacity(width + 1);
    term.push(NUMERIC_TERM_MARKER + shift as u8);
    term.extend_from_slice(&shifted[8 - width..]);
    Token::new(term)
}

/// Full-precision term of a number, used for exact matches.
pub fn exact_term(value: f64) -> Result<Token, EncodingError> {
    Ok(shifted_term(sortable_bits(value)?, 0))
}

/// Terms of one number at every precision level of the index.
///
/// `terms[0]` is the full-precision term; each following term drops another
/// `precision_step` low bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GranularTerms {
    precision_step: u32,
    terms: Vec<Token>,
}

impl GranularTerms {
    pub fn encode(value: f64, precision_step: u32) -> Result<Self, EncodingError> {
        if precision_step == 0 || precision_step > 64 {
            return Err(EncodingError::InvalidPrecisionStep(precision_step));
        }

        let bits = sortable_bits(value)?;
        let terms = (0..64)
            .step_by(precision_step as usize)
            .map(|shift| shifted_term(bits, shift))
            .collect();

        Ok(GranularTerms {
            precision_step,
            terms,
        })
    }

    pub fn precision_step(&self) -> u32 {
        self.precision_step
    }

    pub fn terms(&self) -> &[Token] {
        &self.terms
    }

    /// The full-precision term.
    pub fn exact(&self) -> &Token {
        &self.terms[0]
    }
}
