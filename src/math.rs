//! Elements of linear algebra on the unit sphere: 3-vectors and 3x3 matrices.
//!
//! Matrices are stored by rows ([XYZt]) and multiply column vectors ([XYZ]).

use std::ops::{Add, Neg, Sub};

use crate::{error::Error, Customf64, TWICE_PI};

/// Returns `sin(x) / x`, including its limit `1` at `x = 0`.
///
/// ```rust
/// use skyplot_geom::math::sinc;
/// assert_eq!(sinc(0.0), 1.0);
/// assert!((sinc(1e-9) - 1.0).abs() < 1e-15);
/// ```
pub fn sinc(x: f64) -> f64 {
  // 1 - x^2/6 is exact to the last bit below 1e-4
  if x.abs() < 1e-4 {
    1.0 - x.pow2() / 6.0
  } else {
    x.sin() / x
  }
}

pub trait HasXYZ {
  fn x(&self) -> f64;
  fn y(&self) -> f64;
  fn z(&self) -> f64;

  fn norm(&self) -> f64 {
    self.squared_norm().sqrt()
  }

  fn squared_norm(&self) -> f64 {
    self.x().pow2() + self.y().pow2() + self.z().pow2()
  }

  fn scalar<T: HasXYZ>(&self, rhs: &T) -> f64 {
    self.x() * rhs.x() + self.y() * rhs.y() + self.z() * rhs.z()
  }

  /// Vector product `self x rhs`.
  fn cross<T: HasXYZ>(&self, rhs: &T) -> XYZ {
    XYZ(
      self.y() * rhs.z() - self.z() * rhs.y(),
      self.z() * rhs.x() - self.x() * rhs.z(),
      self.x() * rhs.y() - self.y() * rhs.x(),
    )
  }
}

/// 3 dimensional (column) vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XYZ(pub f64, pub f64, pub f64);

impl XYZ {
  pub const fn new(x: f64, y: f64, z: f64) -> XYZ {
    XYZ(x, y, z)
  }

  /// Unit vector of the given longitude and latitude, in radians.
  pub fn from_coo(lon: f64, lat: f64) -> XYZ {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    XYZ::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
  }

  /// Unit vector of the given longitude and latitude, in degrees.
  pub fn from_deg(lon: f64, lat: f64) -> XYZ {
    Self::from_coo(lon.to_radians(), lat.to_radians())
  }

  /// Returns `(lon, lat)` in radians, `lon` in `[0, 2pi[`.
  /// The vector do not have to be normalized.
  pub fn to_coo(&self) -> (f64, f64) {
    let mut lon = self.1.atan2(self.0);
    if lon < 0.0 {
      lon += TWICE_PI;
    } else if lon == TWICE_PI {
      lon = 0.0;
    }
    let lat = self.2.atan2(self.0.hypot(self.1));
    (lon, lat)
  }

  /// Returns `(lon, lat)` in degrees, `lon` in `[0, 360[`.
  pub fn to_deg(&self) -> (f64, f64) {
    let (lon, lat) = self.to_coo();
    (lon.to_degrees(), lat.to_degrees())
  }

  pub fn from_array(a: [f64; 3]) -> XYZ {
    XYZ(a[0], a[1], a[2])
  }

  pub fn to_array(&self) -> [f64; 3] {
    [self.0, self.1, self.2]
  }

  pub fn time(mut self, cte: f64) -> Self {
    self.0 *= cte;
    self.1 *= cte;
    self.2 *= cte;
    self
  }

  /// Returns the unit vector of same direction, `None` for the null (or a non finite) vector.
  pub fn normalized(&self) -> Option<XYZ> {
    let n = self.norm();
    if n.eq0() || !n.is_finite() {
      None
    } else {
      Some(self.time(1.0 / n))
    }
  }

  pub fn is_finite(&self) -> bool {
    self.0.is_finite() && self.1.is_finite() && self.2.is_finite()
  }
}

impl<T: HasXYZ> Add<T> for XYZ {
  type Output = Self;
  fn add(mut self, rhs: T) -> Self::Output {
    self.0 += rhs.x();
    self.1 += rhs.y();
    self.2 += rhs.z();
    self
  }
}

impl<T: HasXYZ> Sub<T> for XYZ {
  type Output = Self;
  fn sub(mut self, rhs: T) -> Self::Output {
    self.0 -= rhs.x();
    self.1 -= rhs.y();
    self.2 -= rhs.z();
    self
  }
}

impl Neg for XYZ {
  type Output = Self;
  fn neg(self) -> Self::Output {
    XYZ(-self.0, -self.1, -self.2)
  }
}

impl HasXYZ for XYZ {
  fn x(&self) -> f64 {
    self.0
  }
  fn y(&self) -> f64 {
    self.1
  }
  fn z(&self) -> f64 {
    self.2
  }
}

impl HasXYZ for &XYZ {
  fn x(&self) -> f64 {
    self.0
  }
  fn y(&self) -> f64 {
    self.1
  }
  fn z(&self) -> f64 {
    self.2
  }
}

/// Transpose of a 3 dimensional vector, i.e. a matrix row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XYZt(pub f64, pub f64, pub f64);

impl XYZt {
  pub const fn new(x: f64, y: f64, z: f64) -> XYZt {
    XYZt(x, y, z)
  }

  pub fn time(mut self, cte: f64) -> Self {
    self.0 *= cte;
    self.1 *= cte;
    self.2 *= cte;
    self
  }
}

impl HasXYZ for XYZt {
  fn x(&self) -> f64 {
    self.0
  }
  fn y(&self) -> f64 {
    self.1
  }
  fn z(&self) -> f64 {
    self.2
  }
}

/// 3x3 matrix, stored row by row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct M3x3(pub XYZt, pub XYZt, pub XYZt);

/// The defalt returns the identity matrix
impl Default for M3x3 {
  fn default() -> Self {
    Self::IDENTITY
  }
}

impl M3x3 {
  pub const IDENTITY: M3x3 = M3x3(
    XYZt(1.0, 0.0, 0.0),
    XYZt(0.0, 1.0, 0.0),
    XYZt(0.0, 0.0, 1.0),
  );

  pub const fn new(row_x: XYZt, row_y: XYZt, row_z: XYZt) -> M3x3 {
    M3x3(row_x, row_y, row_z)
  }

  /// Build from the 9 elements, row major.
  pub const fn from_row_major(m: [f64; 9]) -> M3x3 {
    M3x3(
      XYZt(m[0], m[1], m[2]),
      XYZt(m[3], m[4], m[5]),
      XYZt(m[6], m[7], m[8]),
    )
  }

  /// Build from a slice of 9 elements, row major.
  /// # Errors
  /// If the slice does not contain exactly 9 elements.
  ///
  /// ```rust
  /// use skyplot_geom::math::M3x3;
  /// assert!(M3x3::from_slice(&[1.0, 0.0, 0.0]).is_err());
  /// assert_eq!(
  ///   M3x3::from_slice(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]).unwrap(),
  ///   M3x3::IDENTITY
  /// );
  /// ```
  pub fn from_slice(m: &[f64]) -> Result<M3x3, Error> {
    <[f64; 9]>::try_from(m)
      .map(Self::from_row_major)
      .map_err(|_| Error::InvalidMatrixLength { len: m.len() })
  }

  pub fn to_row_major(&self) -> [f64; 9] {
    [
      self.0 .0, self.0 .1, self.0 .2, self.1 .0, self.1 .1, self.1 .2, self.2 .0, self.2 .1,
      self.2 .2,
    ]
  }

  /// Rotation matrix of angle `rotation_angle_rad` around the `x-axis`.
  pub fn from_rotx(rotation_angle_rad: f64) -> Self {
    let (s, c) = rotation_angle_rad.sin_cos();
    Self::new(
      XYZt(1_f64, 0_f64, 0_f64),
      XYZt(0_f64, c, -s),
      XYZt(0_f64, s, c),
    )
  }

  /// Rotation matrix of angle `rotation_angle_rad` around the `y-axis`.
  pub fn from_roty(rotation_angle_rad: f64) -> Self {
    let (s, c) = rotation_angle_rad.sin_cos();
    Self::new(
      XYZt(c, 0_f64, s),
      XYZt(0_f64, 1_f64, 0_f64),
      XYZt(-s, 0_f64, c),
    )
  }

  /// Rotation matrix of angle `rotation_angle_rad` around the `z-axis`.
  pub fn from_rotz(rotation_angle_rad: f64) -> Self {
    let (s, c) = rotation_angle_rad.sin_cos();
    Self::new(
      XYZt(c, -s, 0_f64),
      XYZt(s, c, 0_f64),
      XYZt(0_f64, 0_f64, 1_f64),
    )
  }

  /// Rotation around the direction of `w` of an angle equal to the norm of `w`
  /// (Rodrigues formula). The null vector leads to the identity.
  pub fn from_rotation_vector(w: &XYZ) -> Self {
    let theta = w.norm();
    // sin(t)/t and (1 - cos(t))/t^2 = sinc(t/2)^2 / 2, both regular at t = 0
    let a = sinc(theta);
    let b = sinc(theta.half()).pow2().half();
    let (x, y, z) = (w.x(), w.y(), w.z());
    Self::new(
      XYZt(
        1.0 - b * (y * y + z * z),
        -a * z + b * x * y,
        a * y + b * x * z,
      ),
      XYZt(
        a * z + b * x * y,
        1.0 - b * (x * x + z * z),
        -a * x + b * y * z,
      ),
      XYZt(
        -a * y + b * x * z,
        a * x + b * y * z,
        1.0 - b * (x * x + y * y),
      ),
    )
  }

  /// Rotation of `angle_rad` around the given axis (normalized internally).
  /// Returns the identity if the axis is null.
  pub fn from_axis_angle(axis: &XYZ, angle_rad: f64) -> Self {
    match axis.normalized() {
      Some(u) => Self::from_rotation_vector(&u.time(angle_rad)),
      None => Self::IDENTITY,
    }
  }

  pub fn xx(&self) -> f64 {
    self.0 .0
  }
  pub fn xy(&self) -> f64 {
    self.0 .1
  }
  pub fn xz(&self) -> f64 {
    self.0 .2
  }
  pub fn yx(&self) -> f64 {
    self.1 .0
  }
  pub fn yy(&self) -> f64 {
    self.1 .1
  }
  pub fn yz(&self) -> f64 {
    self.1 .2
  }
  pub fn zx(&self) -> f64 {
    self.2 .0
  }
  pub fn zy(&self) -> f64 {
    self.2 .1
  }
  pub fn zz(&self) -> f64 {
    self.2 .2
  }

  pub fn row_x(&self) -> &XYZt {
    &self.0
  }
  pub fn row_y(&self) -> &XYZt {
    &self.1
  }
  pub fn row_z(&self) -> &XYZt {
    &self.2
  }

  pub fn col_x(&self) -> XYZ {
    XYZ(self.xx(), self.yx(), self.zx())
  }
  pub fn col_y(&self) -> XYZ {
    XYZ(self.xy(), self.yy(), self.zy())
  }
  pub fn col_z(&self) -> XYZ {
    XYZ(self.xz(), self.yz(), self.zz())
  }

  pub fn scale(mut self, cte: f64) -> M3x3 {
    self.0 = self.0.time(cte);
    self.1 = self.1.time(cte);
    self.2 = self.2.time(cte);
    self
  }

  /// Matrix product `self x rhs`.
  pub fn time(&self, rhs: &M3x3) -> M3x3 {
    let (cx, cy, cz) = (rhs.col_x(), rhs.col_y(), rhs.col_z());
    let row = |r: &XYZt| XYZt(r.scalar(&cx), r.scalar(&cy), r.scalar(&cz));
    M3x3(row(self.row_x()), row(self.row_y()), row(self.row_z()))
  }

  pub fn transpose(&self) -> M3x3 {
    let (cx, cy, cz) = (self.col_x(), self.col_y(), self.col_z());
    M3x3(
      XYZt(cx.0, cx.1, cx.2),
      XYZt(cy.0, cy.1, cy.2),
      XYZt(cz.0, cz.1, cz.2),
    )
  }

  pub fn det(&self) -> f64 {
    self.row_x().scalar(&self.row_y().cross(self.row_z()))
  }

  /// General inverse (adjugate over determinant), `None` if the matrix is singular.
  /// For a rotation (or a reflected rotation) prefer [transpose](M3x3::transpose).
  pub fn invert(&self) -> Option<M3x3> {
    let det = self.det();
    if det.eq0() || !det.is_finite() {
      return None;
    }
    // the columns of the inverse are the cross products of the rows
    let c0 = self.row_y().cross(self.row_z());
    let c1 = self.row_z().cross(self.row_x());
    let c2 = self.row_x().cross(self.row_y());
    let inv_det = 1.0 / det;
    Some(
      M3x3(
        XYZt(c0.0, c1.0, c2.0),
        XYZt(c0.1, c1.1, c2.1),
        XYZt(c0.2, c1.2, c2.2),
      )
      .scale(inv_det),
    )
  }

  /// `M . v`
  pub fn rotate<T: HasXYZ>(&self, v: &T) -> XYZ {
    XYZ(
      self.row_x().scalar(v),
      self.row_y().scalar(v),
      self.row_z().scalar(v),
    )
  }

  /// `M^t . v`, i.e. the inverse rotation if the matrix is orthonormal.
  pub fn unrotate<T: HasXYZ>(&self, v: &T) -> XYZ {
    XYZ(
      self.col_x().scalar(v),
      self.col_y().scalar(v),
      self.col_z().scalar(v),
    )
  }

  /// Largest absolute difference between the elements of the two matrices.
  pub fn max_abs_diff(&self, rhs: &M3x3) -> f64 {
    self
      .to_row_major()
      .iter()
      .zip(rhs.to_row_major().iter())
      .map(|(a, b)| (a - b).abs())
      .fold(0.0, f64::max)
  }

  /// Tells whether `M . M^t = I` within the given tolerance.
  pub fn is_orthonormal(&self, tol: f64) -> bool {
    self.time(&self.transpose()).max_abs_diff(&Self::IDENTITY) <= tol
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_close(a: &XYZ, b: &XYZ, tol: f64) {
    assert!((*a - b).norm() < tol, "{:?} != {:?}", a, b);
  }

  #[test]
  fn test_elementary_rotations() {
    let v = XYZ::new(1.0, 0.0, 0.0);
    let r = M3x3::from_rotz(90_f64.to_radians()).rotate(&v);
    assert_close(&r, &XYZ::new(0.0, 1.0, 0.0), 1e-15);
    let r = M3x3::from_roty(90_f64.to_radians()).rotate(&v);
    assert_close(&r, &XYZ::new(0.0, 0.0, -1.0), 1e-15);
    let r = M3x3::from_rotx(90_f64.to_radians()).rotate(&XYZ::new(0.0, 1.0, 0.0));
    assert_close(&r, &XYZ::new(0.0, 0.0, 1.0), 1e-15);
  }

  #[test]
  fn test_rotation_vector_matches_elementary() {
    let angle = 0.7;
    let m1 = M3x3::from_rotation_vector(&XYZ::new(0.0, 0.0, angle));
    assert!(m1.max_abs_diff(&M3x3::from_rotz(angle)) < 1e-14);
    let m2 = M3x3::from_axis_angle(&XYZ::new(0.0, 3.0, 0.0), angle);
    assert!(m2.max_abs_diff(&M3x3::from_roty(angle)) < 1e-14);
    assert_eq!(
      M3x3::from_rotation_vector(&XYZ::new(0.0, 0.0, 0.0)),
      M3x3::IDENTITY
    );
    assert_eq!(
      M3x3::from_axis_angle(&XYZ::new(0.0, 0.0, 0.0), 1.0),
      M3x3::IDENTITY
    );
  }

  #[test]
  fn test_det_transpose_invert() {
    let m = M3x3::from_rotz(0.3).time(&M3x3::from_rotx(-1.1));
    assert!((m.det() - 1.0).abs() < 1e-15);
    assert!(m.is_orthonormal(1e-15));
    let inv = m.invert().unwrap();
    assert!(inv.max_abs_diff(&m.transpose()) < 1e-15);
    assert!(m.time(&inv).max_abs_diff(&M3x3::IDENTITY) < 1e-15);

    let reflect = M3x3::from_row_major([1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0]);
    assert_eq!(reflect.time(&m).det().signum(), -1.0);

    let singular = M3x3::from_row_major([1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0]);
    assert!(singular.invert().is_none());

    let general = M3x3::from_row_major([2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0]);
    let inv = general.invert().unwrap();
    assert!(general.time(&inv).max_abs_diff(&M3x3::IDENTITY) < 1e-15);
  }

  #[test]
  fn test_from_slice() {
    let e = M3x3::from_slice(&[0.0; 8]).unwrap_err();
    assert!(matches!(e, Error::InvalidMatrixLength { len: 8 }));
    let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
    let m = M3x3::from_slice(&a).unwrap();
    assert_eq!(m.to_row_major(), a);
    assert_eq!(m.xz(), 3.0);
    assert_eq!(m.zx(), 7.0);
    assert_eq!(m.transpose().to_row_major()[1], 4.0);
  }

  #[test]
  fn test_cross_and_coo() {
    let x = XYZ::new(1.0, 0.0, 0.0);
    let y = XYZ::new(0.0, 1.0, 0.0);
    assert_eq!(x.cross(&y), XYZ::new(0.0, 0.0, 1.0));
    let v = XYZ::from_deg(123.0, -45.0);
    let (lon, lat) = v.to_deg();
    assert!((lon - 123.0).abs() < 1e-12);
    assert!((lat + 45.0).abs() < 1e-12);
    assert!(XYZ::new(0.0, 0.0, 0.0).normalized().is_none());
    assert!(XYZ::new(f64::NAN, 0.0, 0.0).normalized().is_none());
  }
}
