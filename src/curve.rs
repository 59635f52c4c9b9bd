//! Short Weierstrass curves `y^2 = x^3 + a*x + b (mod p)` and their point
//! group: addition, doubling, scalar multiplication, on-curve checks.

use crate::field::PrimeField;
use crate::EcError;
use log::debug;
use num::Integer;
use num_bigint::BigUint;
use num_traits::{Num, One, Zero};
use std::rc::Rc;

/// A point of the curve group: the identity (point at infinity) or an affine
/// coordinate pair reduced into `[0, p)`. Immutable value type; the group
/// operations on [`Curve`] produce fresh points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn affine(x: BigUint, y: BigUint) -> Point {
        Point::Affine { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// The affine x-coordinate, absent for the identity.
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }
}

/// Domain parameters for one curve: modulus, coefficients, base point,
/// subgroup order and cofactor.
#[derive(Debug, Clone)]
pub struct CurveParameters {
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
    pub g: Point,
    pub n: BigUint,
    pub h: BigUint,
}

struct CurveInternal {
    field: PrimeField,
    a: BigUint,
    b: BigUint,
    g: Point,
    n: BigUint,
    h: BigUint,
}

/// A validated curve. Cloning is cheap; the parameters are shared behind an
/// `Rc` and never mutated after construction.
#[derive(Clone)]
pub struct Curve {
    inner: Rc<CurveInternal>,
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        self.inner.field == other.inner.field
            && self.inner.a == other.inner.a
            && self.inner.b == other.inner.b
    }
}

impl Curve {
    /// Validates the parameters and builds the curve. A base point off the
    /// curve, a singular equation or an order that does not annihilate the
    /// base point are configuration errors, caught here rather than at use.
    pub fn new(params: CurveParameters) -> Result<Curve, EcError> {
        let CurveParameters { p, a, b, g, n, h } = params;
        let field = PrimeField::new(p)
            .map_err(|_| EcError::InvalidConfiguration("modulus must be at least 2".into()))?;
        let a = a % field.modulus();
        let b = b % field.modulus();
        // coordinates must sit in [0, p) or the addition formulas can feed
        // a zero denominator into the field inversion
        let g = match g {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => {
                Point::affine(x % field.modulus(), y % field.modulus())
            }
        };

        // 4a^3 + 27b^2 != 0 mod p, otherwise the curve is singular
        let disc = field.add(
            &field.mul(&BigUint::from(4u32), &field.mul(&a, &field.mul(&a, &a))),
            &field.mul(&BigUint::from(27u32), &field.mul(&b, &b)),
        );
        if disc.is_zero() {
            return Err(EcError::InvalidConfiguration(
                "singular curve: 4a^3 + 27b^2 == 0 mod p".into(),
            ));
        }
        if n.is_zero() {
            return Err(EcError::InvalidConfiguration(
                "subgroup order must be nonzero".into(),
            ));
        }

        let curve = Curve {
            inner: Rc::new(CurveInternal { field, a, b, g, n, h }),
        };
        if !curve.is_on_curve(curve.base_point()) {
            return Err(EcError::InvalidConfiguration(
                "base point is not on the curve".into(),
            ));
        }
        if !curve.scalar_mul(&curve.inner.n, &curve.inner.g).is_infinity() {
            return Err(EcError::InvalidConfiguration(
                "order does not annihilate the base point".into(),
            ));
        }
        debug!(
            "curve validated: p is {} bits, subgroup order is {} bits",
            curve.inner.field.modulus().bits(),
            curve.inner.n.bits()
        );
        Ok(curve)
    }

    /// Well-known parameter sets: `"P-256"` (NIST) and `"p1707"`, a toy
    /// 29-element-field curve handy for demos and hand-checked tests.
    pub fn named(name: &str) -> Result<Curve, EcError> {
        fn hex(s: &str) -> BigUint {
            BigUint::from_str_radix(s, 16).unwrap()
        }
        match name {
            "P-256" => Curve::new(CurveParameters {
                p: hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
                a: hex("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc"),
                b: hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
                g: Point::affine(
                    hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
                    hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
                ),
                n: hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
                h: BigUint::one(),
            }),
            // y^2 = x^3 - x + 16 mod 29, G = (5,7) of prime order 31
            "p1707" => Curve::new(CurveParameters {
                p: BigUint::from(29u32),
                a: BigUint::from(28u32),
                b: BigUint::from(16u32),
                g: Point::affine(BigUint::from(5u32), BigUint::from(7u32)),
                n: BigUint::from(31u32),
                h: BigUint::one(),
            }),
            _ => Err(EcError::Other(format!("unknown curve: {}", name))),
        }
    }

    pub fn base_point(&self) -> &Point {
        &self.inner.g
    }

    pub fn order(&self) -> &BigUint {
        &self.inner.n
    }

    pub fn cofactor(&self) -> &BigUint {
        &self.inner.h
    }

    pub fn field(&self) -> &PrimeField {
        &self.inner.field
    }

    /// True for the identity; for affine points, true iff the curve equation
    /// holds mod p.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        let (x, y) = match point {
            Point::Infinity => return true,
            Point::Affine { x, y } => (x, y),
        };
        let f = &self.inner.field;
        let lhs = f.mul(y, y);
        let x_cubed = f.mul(x, &f.mul(x, x));
        let rhs = f.add(&x_cubed, &f.add(&f.mul(&self.inner.a, x), &self.inner.b));
        lhs == rhs
    }

    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => {
                if y.is_zero() {
                    // -(x, 0) == (x, 0)
                    point.clone()
                } else {
                    Point::affine(x.clone(), self.inner.field.modulus() - y)
                }
            }
        }
    }

    /// Affine point addition with the full case analysis: identity operands,
    /// opposite points summing to the identity, doubling and the generic
    /// chord case.
    pub fn add(&self, p1: &Point, p2: &Point) -> Point {
        let (x1, y1) = match p1 {
            Point::Infinity => return p2.clone(),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match p2 {
            Point::Infinity => return p1.clone(),
            Point::Affine { x, y } => (x, y),
        };
        if x1 == x2 {
            if y1 != y2 || y1.is_zero() {
                // vertical chord or vertical tangent
                return Point::Infinity;
            }
            return self.double(p1);
        }
        let f = &self.inner.field;
        // chord slope (y2 - y1) / (x2 - x1); x1 != x2 so the inverse exists
        let slope = f.mul(
            &f.sub(y2, y1),
            &f.invert(&f.sub(x2, x1)).unwrap(),
        );
        self.apply_slope(&slope, x1, y1, x2)
    }

    /// Point doubling via the tangent slope `(3x^2 + a) / 2y`; a point with
    /// `y == 0` has a vertical tangent and doubles to the identity.
    pub fn double(&self, point: &Point) -> Point {
        let (x, y) = match point {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if y.is_zero() {
            return Point::Infinity;
        }
        let f = &self.inner.field;
        let three_x_sq = f.mul(&BigUint::from(3u32), &f.mul(x, x));
        let slope = f.mul(
            &f.add(&three_x_sq, &self.inner.a),
            &f.invert(&f.add(y, y)).unwrap(),
        );
        self.apply_slope(&slope, x, y, x)
    }

    fn apply_slope(&self, slope: &BigUint, x1: &BigUint, y1: &BigUint, x2: &BigUint) -> Point {
        let f = &self.inner.field;
        let x3 = f.sub(&f.sub(&f.mul(slope, slope), x1), x2);
        let y3 = f.sub(&f.mul(slope, &f.sub(x1, &x3)), y1);
        Point::affine(x3, y3)
    }

    /// `k * P` by double-and-add over the bits of `k`, least significant
    /// first. `k == 0` or `P` at infinity yields the identity.
    pub fn scalar_mul(&self, k: &BigUint, point: &Point) -> Point {
        let two = BigUint::from(2u32);
        let mut k = k.clone();
        let mut addend = point.clone();
        let mut acc = Point::Infinity;
        while !k.is_zero() {
            if k.is_odd() {
                acc = self.add(&acc, &addend);
            }
            addend = self.double(&addend);
            k = &k / &two;
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p1707() -> Curve {
        Curve::named("p1707").unwrap()
    }

    fn pt(x: u32, y: u32) -> Point {
        Point::affine(BigUint::from(x), BigUint::from(y))
    }

    #[test]
    fn base_point_is_on_curve() {
        let curve = p1707();
        assert!(curve.is_on_curve(curve.base_point()));
        assert!(curve.is_on_curve(&Point::Infinity));
        assert!(!curve.is_on_curve(&pt(5, 8)));
    }

    #[test]
    fn identity_is_neutral() {
        let curve = p1707();
        let g = curve.base_point();
        assert_eq!(&curve.add(g, &Point::Infinity), g);
        assert_eq!(&curve.add(&Point::Infinity, g), g);
        assert_eq!(curve.add(&Point::Infinity, &Point::Infinity), Point::Infinity);
    }

    #[test]
    fn opposite_points_sum_to_identity() {
        let curve = p1707();
        let g = curve.base_point();
        let neg_g = curve.negate(g);
        assert_eq!(neg_g, pt(5, 22));
        assert_eq!(curve.add(g, &neg_g), Point::Infinity);
    }

    #[test]
    fn known_small_multiples() {
        let curve = p1707();
        let g = curve.base_point();
        let two_g = curve.double(g);
        assert_eq!(two_g, pt(28, 4));
        assert_eq!(curve.add(g, &two_g), pt(18, 1));
        assert_eq!(curve.scalar_mul(&BigUint::from(3u32), g), pt(18, 1));
        assert_eq!(curve.scalar_mul(&BigUint::from(17u32), g), pt(1, 25));
    }

    #[test]
    fn scalar_mul_edge_cases() {
        let curve = p1707();
        let g = curve.base_point();
        assert_eq!(curve.scalar_mul(&BigUint::zero(), g), Point::Infinity);
        assert_eq!(&curve.scalar_mul(&BigUint::one(), g), g);
        assert_eq!(
            curve.scalar_mul(&BigUint::from(7u32), &Point::Infinity),
            Point::Infinity
        );
        // the subgroup order annihilates the base point
        assert_eq!(curve.scalar_mul(curve.order(), g), Point::Infinity);
    }

    #[test]
    fn doubling_a_two_torsion_point_gives_identity() {
        // y^2 = x^3 - x mod 5 has (0, 0), a point of order two
        let curve = Curve::new(CurveParameters {
            p: BigUint::from(5u32),
            a: BigUint::from(4u32),
            b: BigUint::zero(),
            g: pt(0, 0),
            n: BigUint::from(2u32),
            h: BigUint::from(4u32),
        })
        .unwrap();
        assert_eq!(curve.double(&pt(0, 0)), Point::Infinity);
        assert_eq!(curve.add(&pt(0, 0), &pt(0, 0)), Point::Infinity);
    }

    #[test]
    fn base_point_coordinates_are_reduced() {
        // (34, 36) is (5, 7) lifted by the modulus; Curve::new normalizes it
        let curve = Curve::new(CurveParameters {
            p: BigUint::from(29u32),
            a: BigUint::from(28u32),
            b: BigUint::from(16u32),
            g: pt(34, 36),
            n: BigUint::from(31u32),
            h: BigUint::one(),
        })
        .unwrap();
        assert_eq!(curve.base_point(), &pt(5, 7));
        // doubling the normalized point takes the tangent case, not the
        // vertical-chord case an unreduced duplicate would fall into
        assert_eq!(curve.add(curve.base_point(), &pt(5, 7)), pt(28, 4));
    }

    #[test]
    fn rejects_bad_configurations() {
        // base point off the curve
        let off = Curve::new(CurveParameters {
            p: BigUint::from(29u32),
            a: BigUint::from(28u32),
            b: BigUint::from(16u32),
            g: pt(5, 8),
            n: BigUint::from(31u32),
            h: BigUint::one(),
        });
        assert!(matches!(off, Err(EcError::InvalidConfiguration(_))));

        // singular: a == b == 0
        let singular = Curve::new(CurveParameters {
            p: BigUint::from(29u32),
            a: BigUint::zero(),
            b: BigUint::zero(),
            g: pt(0, 0),
            n: BigUint::from(31u32),
            h: BigUint::one(),
        });
        assert!(matches!(singular, Err(EcError::InvalidConfiguration(_))));

        // wrong subgroup order: 30 * G != infinity on p1707
        let wrong_order = Curve::new(CurveParameters {
            p: BigUint::from(29u32),
            a: BigUint::from(28u32),
            b: BigUint::from(16u32),
            g: pt(5, 7),
            n: BigUint::from(30u32),
            h: BigUint::one(),
        });
        assert!(matches!(wrong_order, Err(EcError::InvalidConfiguration(_))));
    }

    #[test]
    fn named_curves() {
        let p256 = Curve::named("P-256").unwrap();
        assert!(p256.is_on_curve(p256.base_point()));
        assert!(matches!(Curve::named("P-512"), Err(EcError::Other(_))));
    }
}
