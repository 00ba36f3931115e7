use std::hash::{Hash, Hasher};

use super::SkySys;
use crate::math::{M3x3, XYZ};

/// Transformation of unit vectors from one sky system to another.
#[derive(Debug, Clone, Copy)]
pub enum Rotation {
  /// No-op, used when the two systems are the same or unspecified.
  Identity,
  /// Fixed rotation matrix, `out = M . in`.
  Matrix(M3x3),
}

impl Rotation {
  /// Returns the rotation transforming a unit vector in the `from` system into
  /// a unit vector in the `to` system.
  /// If either system is unspecified, or if both are the same, returns [Rotation::Identity].
  pub fn create(from: Option<SkySys>, to: Option<SkySys>) -> Rotation {
    match (from, to) {
      (Some(from), Some(to)) if from != to => {
        // inverse(to2eq) x from2eq, the inverse of a rotation being its transpose
        Rotation::Matrix(to.from_equatorial().time(&from.to_equatorial()))
      }
      _ => Rotation::Identity,
    }
  }

  pub fn is_identity(&self) -> bool {
    matches!(self, Rotation::Identity)
  }

  /// The matrix of the rotation (the identity matrix for [Rotation::Identity]).
  pub fn matrix(&self) -> M3x3 {
    match self {
      Rotation::Identity => M3x3::IDENTITY,
      Rotation::Matrix(m) => *m,
    }
  }

  pub fn rotate(&self, v: &XYZ) -> XYZ {
    match self {
      Rotation::Identity => *v,
      Rotation::Matrix(m) => m.rotate(v),
    }
  }

  /// Rotates in place the given `[x, y, z]` vector.
  pub fn rotate_in_place(&self, v: &mut [f64; 3]) {
    if let Rotation::Matrix(m) = self {
      *v = m.rotate(&XYZ::from_array(*v)).to_array();
    }
  }

  /// Returns the inverse rotation.
  pub fn invert(&self) -> Rotation {
    match self {
      Rotation::Identity => Rotation::Identity,
      Rotation::Matrix(m) => Rotation::Matrix(m.transpose()),
    }
  }

  fn bits(&self) -> Option<[u64; 9]> {
    match self {
      Rotation::Identity => None,
      Rotation::Matrix(m) => Some(m.to_row_major().map(f64::to_bits)),
    }
  }
}

/// Exact (bitwise) equality of the matrix elements.
impl PartialEq for Rotation {
  fn eq(&self, other: &Self) -> bool {
    self.bits() == other.bits()
  }
}

impl Eq for Rotation {}

impl Hash for Rotation {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.bits().hash(state);
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use rand::Rng;

  use super::*;
  use crate::math::HasXYZ;

  fn random_unit_vectors(n: usize) -> Vec<XYZ> {
    let mut rng = rand::thread_rng();
    (0..n)
      .map(|_| XYZ::from_deg(rng.gen_range(0.0..360.0), rng.gen_range(-90.0..90.0)))
      .collect()
  }

  #[test]
  fn test_same_system_is_identity() {
    for sys in SkySys::ALL {
      let rot = Rotation::create(Some(sys), Some(sys));
      assert!(rot.is_identity());
      for v in random_unit_vectors(20) {
        assert_eq!(rot.rotate(&v), v);
      }
    }
    assert!(Rotation::create(None, Some(SkySys::Galactic)).is_identity());
    assert!(Rotation::create(Some(SkySys::Galactic), None).is_identity());
  }

  #[test]
  fn test_invert_is_reverse_rotation() {
    let vectors = random_unit_vectors(50);
    for a in SkySys::ALL {
      for b in SkySys::ALL {
        let inv = Rotation::create(Some(a), Some(b)).invert();
        let rev = Rotation::create(Some(b), Some(a));
        assert!(inv.matrix().max_abs_diff(&rev.matrix()) < 1e-12);
        for v in &vectors {
          assert!((inv.rotate(v) - rev.rotate(v)).norm() < 1e-12);
        }
      }
    }
  }

  #[test]
  fn test_round_trip_and_in_place() {
    let fwd = Rotation::create(Some(SkySys::Equatorial), Some(SkySys::Galactic));
    let bwd = fwd.invert();
    for v in random_unit_vectors(50) {
      let mut a = v.to_array();
      fwd.rotate_in_place(&mut a);
      assert!((XYZ::from_array(a) - fwd.rotate(&v)).norm() == 0.0);
      bwd.rotate_in_place(&mut a);
      assert!((XYZ::from_array(a) - v).norm() < 1e-14);
    }
    // Galactic center
    let (l, b) = fwd.rotate(&XYZ::from_deg(266.404_99, -28.936_17)).to_deg();
    assert!(l < 1e-3 || l > 360.0 - 1e-3, "{}", l);
    assert!(b.abs() < 1e-3, "{}", b);
  }

  #[test]
  fn test_exact_equality() {
    let r1 = Rotation::create(Some(SkySys::Galactic), Some(SkySys::Ecliptic2000));
    let r2 = Rotation::create(Some(SkySys::Galactic), Some(SkySys::Ecliptic2000));
    let r3 = Rotation::create(Some(SkySys::Ecliptic2000), Some(SkySys::Galactic));
    assert_eq!(r1, r2);
    assert_ne!(r1, r3);
    assert_eq!(r1.invert().invert(), r1);
    let set: HashSet<Rotation> = [r1, r2, r3, Rotation::Identity].into_iter().collect();
    assert_eq!(set.len(), 3);
  }
}
