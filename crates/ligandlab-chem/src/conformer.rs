//! 3D coordinates for one molecule.

use ligandlab_common::GeometryError;

use crate::molecule::Molecule;

/// One set of Cartesian coordinates, parallel to a molecule's atom list.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    pub coords: Vec<[f64; 3]>,
}

impl Conformer {
    pub fn new(coords: Vec<[f64; 3]>) -> Self {
        Conformer { coords }
    }

    pub fn atom_count(&self) -> usize {
        self.coords.len()
    }

    /// Fail unless the coordinate list matches the molecule's atom list.
    pub fn check_against(&self, mol: &Molecule) -> Result<(), GeometryError> {
        if self.coords.len() != mol.atom_count() {
            return Err(GeometryError::AtomMismatch {
                conformer: self.coords.len(),
                molecule: mol.atom_count(),
            });
        }
        Ok(())
    }

    pub fn distance(&self, i: usize, j: usize) -> f64 {
        let a = self.coords[i];
        let b = self.coords[j];
        let dx = a[0] - b[0];
        let dy = a[1] - b[1];
        let dz = a[2] - b[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Angle at `j` in the triple i-j-k, in radians.
    pub fn angle(&self, i: usize, j: usize, k: usize) -> f64 {
        let u = sub(self.coords[i], self.coords[j]);
        let v = sub(self.coords[k], self.coords[j]);
        let denom = norm(u) * norm(v);
        if denom < 1e-12 {
            return 0.0;
        }
        (dot(u, v) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Signed dihedral of i-j-k-l, in radians.
    pub fn dihedral(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        let b1 = sub(self.coords[j], self.coords[i]);
        let b2 = sub(self.coords[k], self.coords[j]);
        let b3 = sub(self.coords[l], self.coords[k]);
        let n1 = cross(b1, b2);
        let n2 = cross(b2, b3);
        let m1 = cross(n1, scale(b2, 1.0 / norm(b2).max(1e-12)));
        let x = dot(n1, n2);
        let y = dot(m1, n2);
        y.atan2(x)
    }

    /// RMSD against another conformer with the same atom ordering.
    /// No alignment is performed.
    pub fn rmsd(&self, other: &Conformer) -> Result<f64, GeometryError> {
        if self.coords.len() != other.coords.len() {
            return Err(GeometryError::AtomMismatch {
                conformer: self.coords.len(),
                molecule: other.coords.len(),
            });
        }
        if self.coords.is_empty() {
            return Ok(0.0);
        }
        let sum: f64 = self
            .coords
            .iter()
            .zip(&other.coords)
            .map(|(a, b)| {
                let d = sub(*a, *b);
                dot(d, d)
            })
            .sum();
        Ok((sum / self.coords.len() as f64).sqrt())
    }
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}
