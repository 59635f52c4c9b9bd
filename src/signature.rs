//! ElGamal-style signatures: key generation, signing, verification.

use crate::curve::{Curve, Point};
use crate::digest;
use crate::EcError;
use log::trace;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// Hitting r == 0 or s == 0 is astronomically unlikely on a real curve, but
/// the loop stays bounded so embedders with deadlines get an error instead
/// of a spin.
const SIGN_RETRY_LIMIT: u32 = 64;

/// Source of uniformly random scalars in `[1, order - 1]`, used for private
/// keys and per-signature ephemerals. Injected rather than baked in so tests
/// can supply deterministic values.
pub trait ScalarSource {
    fn uniform_scalar(&mut self, order: &BigUint) -> BigUint;
}

/// Every cryptographically secure rng is a scalar source.
impl<R: RngCore + CryptoRng> ScalarSource for R {
    fn uniform_scalar(&mut self, order: &BigUint) -> BigUint {
        self.gen_biguint_range(&BigUint::one(), order)
    }
}

/// The shareable half of a key pair: `Q = d * G`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    point: Point,
}

impl PublicKey {
    pub fn point(&self) -> &Point {
        &self.point
    }
}

/// A private scalar `d` in `[1, n - 1]` and its derived public point. The
/// scalar never leaves this struct; only the public half is cloned out.
#[derive(Clone)]
pub struct KeyPair {
    d: BigUint,
    public: PublicKey,
}

impl KeyPair {
    pub fn public_key(&self) -> PublicKey {
        self.public.clone()
    }
}

/// A signature `(r, s)`: the reduced x-coordinate of the ephemeral point and
/// the proof scalar, both in `[1, n - 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

/// Sign/verify over one curve. Hashing stays with the caller: both
/// operations consume a ready digest and fold its leftmost bits into a
/// scalar sized to the subgroup order.
pub struct SignatureScheme {
    curve: Curve,
}

impl SignatureScheme {
    pub fn new(curve: Curve) -> SignatureScheme {
        SignatureScheme { curve }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn generate_key_pair<S: ScalarSource>(&self, source: &mut S) -> KeyPair {
        let d = source.uniform_scalar(self.curve.order());
        let point = self.curve.scalar_mul(&d, self.curve.base_point());
        KeyPair {
            d,
            public: PublicKey { point },
        }
    }

    /// Builds a key pair from an externally chosen private scalar, rejecting
    /// anything outside `[1, n - 1]`.
    pub fn key_pair_from_private(&self, d: BigUint) -> Result<KeyPair, EcError> {
        if d.is_zero() || &d >= self.curve.order() {
            return Err(EcError::InvalidKey);
        }
        let point = self.curve.scalar_mul(&d, self.curve.base_point());
        Ok(KeyPair {
            d,
            public: PublicKey { point },
        })
    }

    fn digest_scalar(&self, digest: &[u8]) -> BigUint {
        digest::leftmost_bits(digest, self.curve.order().bits())
    }

    /// Signs a message digest: draw an ephemeral `k`, compute `R = k * G`,
    /// `r = R.x mod n` and `s = k^-1 (z + r * d) mod n`, retrying on the
    /// degenerate `r == 0` / `s == 0` draws.
    pub fn sign<S: ScalarSource>(
        &self,
        digest: &[u8],
        key: &KeyPair,
        source: &mut S,
    ) -> Result<Signature, EcError> {
        let n = self.curve.order();
        let z = self.digest_scalar(digest);
        for attempt in 0..SIGN_RETRY_LIMIT {
            let k = source.uniform_scalar(n);
            let ephemeral = self.curve.scalar_mul(&k, self.curve.base_point());
            let r = match ephemeral.x() {
                Some(x) => x % n,
                None => continue,
            };
            if r.is_zero() {
                trace!("ephemeral x reduced to zero on attempt {}, retrying", attempt);
                continue;
            }
            let k_inv = match k.modinv(n) {
                Some(inv) => inv,
                None => continue,
            };
            let s = k_inv * (&z + &r * &key.d) % n;
            if s.is_zero() {
                trace!("proof scalar came out zero on attempt {}, retrying", attempt);
                continue;
            }
            return Ok(Signature { r, s });
        }
        Err(EcError::RetryExhausted)
    }

    /// Checks a signature against a digest and a public key. A shape
    /// violation (`r` or `s` outside `[1, n - 1]`) is reported as
    /// `MalformedSignature`; a well-formed signature that fails the
    /// verification equation is `Ok(false)`.
    pub fn verify(
        &self,
        digest: &[u8],
        signature: &Signature,
        public: &PublicKey,
    ) -> Result<bool, EcError> {
        let n = self.curve.order();
        let r = &signature.r;
        let s = &signature.s;
        if r.is_zero() || r >= n || s.is_zero() || s >= n {
            return Err(EcError::MalformedSignature);
        }
        let c = match s.modinv(n) {
            Some(inv) => inv,
            None => return Err(EcError::MalformedSignature),
        };
        let z = self.digest_scalar(digest);
        let u1 = z * &c % n;
        let u2 = r * &c % n;
        let point = self.curve.add(
            &self.curve.scalar_mul(&u1, self.curve.base_point()),
            &self.curve.scalar_mul(&u2, public.point()),
        );
        // accept iff the recomputed x-coordinate matches r; the identity
        // point has no x and always rejects
        Ok(match point.x() {
            Some(x) => &(x % n) == r,
            None => false,
        })
    }
}
