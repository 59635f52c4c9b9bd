//! ElGamal-style digital signatures over short Weierstrass curves.
//!
//! The crate is split along the natural seams of the scheme: [`field`] does
//! modular arithmetic over the prime field, [`curve`] builds the point group
//! on top of it, [`digest`] folds a hash digest into a field-sized scalar,
//! and [`signature`] wires those together into key generation, signing and
//! verification. Hashing and randomness stay with the caller: the scheme
//! takes a ready digest and draws scalars from an injected [`signature::ScalarSource`].

pub mod curve;
pub mod digest;
pub mod field;
pub mod signature;

pub use curve::{Curve, CurveParameters, Point};
pub use field::PrimeField;
pub use signature::{KeyPair, PublicKey, ScalarSource, Signature, SignatureScheme};

#[derive(thiserror::Error, Debug)]
pub enum EcError {
    #[error("operand has no modular inverse (zero, or modulus too small)")]
    InvalidOperand,
    #[error("invalid curve configuration: {0}")]
    InvalidConfiguration(String),
    #[error("private key must be in [1, n-1]")]
    InvalidKey,
    #[error("the signature is malformed")]
    MalformedSignature,
    #[error("signing retry limit exhausted")]
    RetryExhausted,
    #[error("unexpected error: {0}")]
    Other(String),
}
