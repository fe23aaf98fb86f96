//! Fundamental geometric types for truss modelling.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};
use std::str::FromStr;

use nalgebra::Vector3;
use serde::Serialize;

use crate::errors::ParseError;

/// Point or direction in space.
///
/// Truss geometry only uses the X-Y plane, but the `z` component is carried
/// through all arithmetic so the type can be reused for spatial data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vector2D {
    /// Component along the global X axis.
    pub x: f64,
    /// Component along the global Y axis.
    pub y: f64,
    /// Component along the global Z axis.
    pub z: f64,
}

impl Vector2D {
    /// Create a [`Vector2D`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Assemble a vector from an optional tuple and optional components.
    ///
    /// Explicit components take precedence over the tuple. Anything left
    /// unspecified is zero.
    ///
    /// # Examples
    /// ```
    /// use trussview::Vector2D;
    ///
    /// let v = Vector2D::from_parts(Some((1.0, 2.0, 3.0)), None, Some(5.0), None);
    /// assert_eq!(v, Vector2D::new(1.0, 5.0, 3.0));
    /// ```
    #[must_use]
    pub fn from_parts(
        tuple: Option<(f64, f64, f64)>,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    ) -> Self {
        let base = tuple.map_or_else(Self::default, Self::from);
        Self {
            x: x.unwrap_or(base.x),
            y: y.unwrap_or(base.y),
            z: z.unwrap_or(base.z),
        }
    }

    /// Return the components as an `(x, y, z)` tuple.
    #[must_use]
    pub const fn to_tuple(self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Convert the vector into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean length of the vector.
    ///
    /// # Examples
    /// ```
    /// use trussview::Vector2D;
    ///
    /// assert_eq!(Vector2D::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// ```
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.to_vector().norm()
    }

    /// Multiply every component by `factor`.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Component-wise product of two vectors.
    #[must_use]
    pub fn elementwise_multiply(self, other: Self) -> Self {
        self.to_vector().component_mul(&other.to_vector()).into()
    }

    /// Divide every component by `divisor`.
    #[must_use]
    pub fn divide(self, divisor: f64) -> Self {
        Self::new(self.x / divisor, self.y / divisor, self.z / divisor)
    }

    /// Return a unit-length copy, or the vector unchanged when its magnitude
    /// is not positive.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut copy = self;
        copy.normalize_in_place();
        copy
    }

    /// Scale the vector to unit length in place.
    ///
    /// Zero-length vectors are left untouched.
    pub fn normalize_in_place(&mut self) {
        let length = self.magnitude();
        if length <= 0.0 {
            return;
        }
        *self /= length;
    }

    /// Angle of the vector in the X-Y plane, counterclockwise from +X.
    ///
    /// The result lies in `[0, 2π)`. Plain `acos` only covers the upper half
    /// plane, so vectors with negative `y` are reflected to `2π - acos`.
    ///
    /// # Examples
    /// ```
    /// use std::f64::consts::PI;
    /// use trussview::Vector2D;
    ///
    /// assert_eq!(Vector2D::new(-1.0, 0.0, 0.0).angle_rad(), PI);
    /// assert_eq!(Vector2D::new(0.0, 0.0, 0.0).angle_rad(), 0.0);
    /// ```
    #[must_use]
    pub fn angle_rad(self) -> f64 {
        let length = self.magnitude();
        if length <= 0.0 {
            return 0.0;
        }
        let base = (self.x / length).acos();
        if self.y >= 0.0 {
            base
        } else {
            2.0 * PI - base
        }
    }

    /// Angle of the vector in the X-Y plane in degrees.
    #[must_use]
    pub fn angle_deg(self) -> f64 {
        self.angle_rad().to_degrees()
    }

    /// Format the components as `x, y, z` rounded to `places` decimals.
    #[must_use]
    pub fn to_string_rounded(self, places: usize) -> String {
        format!(
            "{:.places$}, {:.places$}, {:.places$}",
            self.x,
            self.y,
            self.z,
            places = places
        )
    }
}

impl From<(f64, f64, f64)> for Vector2D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3<f64>> for Vector2D {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Vector2D> for Vector3<f64> {
    fn from(value: Vector2D) -> Self {
        value.to_vector()
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// Parses `x, y, z`, optionally wrapped in parentheses.
impl FromStr for Vector2D {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().trim_start_matches('(').trim_end_matches(')');
        let cells: Vec<&str> = cleaned.split(',').map(str::trim).collect();
        if cells.len() != 3 {
            return Err(ParseError::MissingFields {
                expected: 3,
                found: cells.len(),
            });
        }
        Ok(Self::new(
            parse_number("x", cells[0])?,
            parse_number("y", cells[1])?,
            parse_number("z", cells[2])?,
        ))
    }
}

/// Parse a single decimal field, naming it in the error.
///
/// Only finite values are accepted; `inf` and `NaN` are rejected.
pub(crate) fn parse_number(field: &'static str, value: &str) -> Result<f64, ParseError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(ParseError::InvalidNumber {
            field,
            value: value.to_owned(),
        }),
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        (self.to_vector() + rhs.to_vector()).into()
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        (self.to_vector() - rhs.to_vector()).into()
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Vector2D> for f64 {
    type Output = Vector2D;

    fn mul(self, rhs: Vector2D) -> Vector2D {
        rhs.scale(self)
    }
}

impl Mul for Vector2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.elementwise_multiply(rhs)
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.divide(rhs)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector2D {
    fn mul_assign(&mut self, rhs: f64) {
        *self = self.scale(rhs);
    }
}

impl DivAssign<f64> for Vector2D {
    fn div_assign(&mut self, rhs: f64) {
        *self = self.divide(rhs);
    }
}

/// Convenience helper for creating planar [`Vector2D`] instances with `z = 0`.
///
/// # Examples
/// ```
/// use trussview::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.z, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Vector2D {
    Vector2D::new(x, y, 0.0)
}
