//! 2D vector math for the layout engine
//!
//! `Vector2` is a small immutable value type. Every component is kept finite:
//! constructors replace non-finite inputs with zero, and [`Vector2::validate`]
//! collapses a non-finite result to the zero vector.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point or displacement in layout space.
///
/// The y axis points down (screen coordinates), so "north" is negative y.
///
/// # Example
///
/// ```
/// use areamap::geometry::Vector2;
///
/// let v = Vector2::new(3.0, 4.0);
/// assert_eq!(v.magnitude(), 5.0);
/// assert_eq!(Vector2::new(f64::NAN, 1.0), Vector2::new(0.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// The zero vector
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    /// Create a vector, substituting zero for any non-finite component
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: if x.is_finite() { x } else { 0.0 },
            y: if y.is_finite() { y } else { 0.0 },
        }
    }

    pub fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }

    /// Euclidean length
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance between two points
    pub fn distance_to(self, other: Vector2) -> f64 {
        other.subtract(self).magnitude()
    }

    /// Unit vector in the same direction, or the zero vector if `self` has
    /// zero length
    pub fn normalize(self) -> Vector2 {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Vector2::ZERO;
        }
        Vector2::new(self.x / magnitude, self.y / magnitude)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Return `self` when both components are finite, otherwise report the
    /// value and return the zero vector.
    ///
    /// `new` already sanitizes, so this only trips for values built through
    /// the public fields.
    pub fn validate(self) -> Vector2 {
        if self.is_finite() {
            self
        } else {
            tracing::warn!(x = self.x, y = self.y, "non-finite vector replaced with zero");
            Vector2::ZERO
        }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::add(self, rhs)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        self.subtract(rhs)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        self.multiply(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        self.multiply(-1.0)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        *self = Vector2::add(*self, rhs);
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        *self = self.subtract(rhs);
    }
}
