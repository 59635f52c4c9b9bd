//! Modular arithmetic over a prime modulus.

use crate::EcError;
use num_bigint::BigUint;
use num_traits::One;

/// Arithmetic in the integers mod a prime `p`. All results are reduced into
/// `[0, p)`. `BigUint` is arbitrary precision, so intermediate products never
/// overflow before reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    p: BigUint,
}

impl PrimeField {
    pub fn new(p: BigUint) -> Result<PrimeField, EcError> {
        if p <= BigUint::one() {
            return Err(EcError::InvalidOperand);
        }
        Ok(PrimeField { p })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        // lift a above b before subtracting; BigUint cannot go negative
        (a % &self.p + &self.p - b % &self.p) % &self.p
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    /// The unique `a'` with `a * a' == 1 (mod p)`. Inverting zero (or any
    /// multiple of `p`) is undefined and reported as `InvalidOperand`.
    pub fn invert(&self, a: &BigUint) -> Result<BigUint, EcError> {
        a.modinv(&self.p).ok_or(EcError::InvalidOperand)
    }
}
