//! Seeded 3D embedding via distance geometry.
//!
//! Bounds come from covalent radii (bonded pairs), the law of cosines
//! (1-3 pairs), and van der Waals radii (everything else), smoothed with
//! triangle inequalities. A distance matrix sampled inside the bounds is
//! converted to coordinates through the metric matrix and its three
//! dominant eigenvectors. The same seed always yields the same geometry.

use ligandlab_common::GeometryError;

use crate::conformer::Conformer;
use crate::element;
use crate::molecule::{BondOrder, Molecule};

#[derive(Debug, Clone, Copy)]
pub struct EmbedConfig {
    pub seed: u64,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        EmbedConfig { seed: 1 }
    }
}

/// Embed a molecule into 3D. Hydrogens must already be explicit if they
/// are expected in the output; every atom present gets a coordinate.
pub fn embed(mol: &Molecule, config: EmbedConfig) -> Result<Conformer, GeometryError> {
    let n = mol.atom_count();
    if n == 0 {
        return Err(GeometryError::Embed("cannot embed an empty molecule".into()));
    }
    if n == 1 {
        return Ok(Conformer::new(vec![[0.0; 3]]));
    }

    let (lower, upper) = bounds_matrices(mol);
    let mut rng = XorShift64::new(config.seed);

    // Sample a trial distance matrix inside the smoothed bounds.
    let mut dist = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let lo = lower[i][j];
            let hi = upper[i][j].max(lo);
            let d = lo + (hi - lo) * rng.next_f64();
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    let coords = metric_embed(&dist)?;
    let mut conf = Conformer::new(coords);
    refine_against_bounds(mol, &mut conf, &lower, &upper);

    if conf.coords.iter().flatten().any(|v| !v.is_finite()) {
        return Err(GeometryError::Embed(
            "embedding produced non-finite coordinates".into(),
        ));
    }
    Ok(conf)
}

/// Ideal length of a bond, from covalent radii shortened by bond order.
pub fn ideal_bond_length(mol: &Molecule, a: usize, b: usize, order: BondOrder) -> f64 {
    let base = element::covalent_radius(mol.atoms[a].atomic_number)
        + element::covalent_radius(mol.atoms[b].atomic_number);
    let factor = match order {
        BondOrder::Single => 1.0,
        BondOrder::Aromatic => 0.93,
        BondOrder::Double => 0.87,
        BondOrder::Triple => 0.78,
    };
    base * factor
}

/// Ideal angle at `center` in radians, picked from its bond pattern.
pub fn ideal_angle(mol: &Molecule, center: usize) -> f64 {
    let mut doubles = 0;
    let mut has_triple = false;
    let mut has_aromatic = false;
    for &(_, bi) in &mol.adjacency[center] {
        match mol.bonds[bi].order {
            BondOrder::Double => doubles += 1,
            BondOrder::Triple => has_triple = true,
            BondOrder::Aromatic => has_aromatic = true,
            BondOrder::Single => {}
        }
    }
    if has_triple || doubles >= 2 {
        std::f64::consts::PI
    } else if has_aromatic || doubles == 1 {
        120.0f64.to_radians()
    } else {
        109.47f64.to_radians()
    }
}

fn bounds_matrices(mol: &Molecule) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let n = mol.atom_count();
    const FAR: f64 = 1.0e3;
    let mut lower = vec![vec![0.0f64; n]; n];
    let mut upper = vec![vec![FAR; n]; n];

    // Non-bonded defaults: vdW contact as the floor.
    for i in 0..n {
        upper[i][i] = 0.0;
        for j in (i + 1)..n {
            let lo = 0.8
                * (element::vdw_radius(mol.atoms[i].atomic_number)
                    + element::vdw_radius(mol.atoms[j].atomic_number));
            lower[i][j] = lo;
            lower[j][i] = lo;
        }
    }

    // 1-2: essentially exact.
    for bond in &mol.bonds {
        let r = ideal_bond_length(mol, bond.a, bond.b, bond.order);
        set_pair(&mut lower, &mut upper, bond.a, bond.b, r - 0.01, r + 0.01);
    }

    // 1-3: law of cosines around each center.
    for center in 0..n {
        let theta = ideal_angle(mol, center);
        let nbrs = &mol.adjacency[center];
        for x in 0..nbrs.len() {
            for y in (x + 1)..nbrs.len() {
                let (i, bi) = nbrs[x];
                let (j, bj) = nbrs[y];
                let d1 = ideal_bond_length(mol, center, i, mol.bonds[bi].order);
                let d2 = ideal_bond_length(mol, center, j, mol.bonds[bj].order);
                let d13 =
                    (d1 * d1 + d2 * d2 - 2.0 * d1 * d2 * theta.cos()).max(0.0).sqrt();
                set_pair(&mut lower, &mut upper, i, j, d13 - 0.05, d13 + 0.05);
            }
        }
    }

    // Triangle smoothing. Uppers shrink along paths; lowers rise where a
    // tight pair forces them.
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if upper[i][k] + upper[k][j] < upper[i][j] {
                    upper[i][j] = upper[i][k] + upper[k][j];
                }
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let forced = lower[i][k] - upper[k][j];
                if forced > lower[i][j] {
                    lower[i][j] = forced;
                }
            }
        }
    }
    for i in 0..n {
        for j in 0..n {
            if lower[i][j] > upper[i][j] {
                lower[i][j] = upper[i][j];
            }
        }
    }

    (lower, upper)
}

fn set_pair(
    lower: &mut [Vec<f64>],
    upper: &mut [Vec<f64>],
    i: usize,
    j: usize,
    lo: f64,
    hi: f64,
) {
    let lo = lo.max(0.0);
    lower[i][j] = lo;
    lower[j][i] = lo;
    upper[i][j] = hi;
    upper[j][i] = hi;
}

/// Distances -> coordinates: metric matrix plus the three dominant
/// eigenpairs found by power iteration with deflation.
fn metric_embed(dist: &[Vec<f64>]) -> Result<Vec<[f64; 3]>, GeometryError> {
    let n = dist.len();
    let inv_n = 1.0 / n as f64;

    // Squared distances to the centroid.
    let sq = |x: f64| x * x;
    let total: f64 = (0..n)
        .map(|j| (0..n).map(|k| sq(dist[j][k])).sum::<f64>())
        .sum::<f64>()
        * inv_n
        * inv_n;
    let d0: Vec<f64> = (0..n)
        .map(|i| (0..n).map(|j| sq(dist[i][j])).sum::<f64>() * inv_n - 0.5 * total)
        .collect();

    let mut g = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in 0..n {
            g[i][j] = 0.5 * (d0[i] + d0[j] - sq(dist[i][j]));
        }
    }

    let mut coords = vec![[0.0f64; 3]; n];
    for axis in 0..3 {
        let (value, vector) = dominant_eigenpair(&g, axis)?;
        let scale = value.max(0.0).sqrt();
        for i in 0..n {
            coords[i][axis] = vector[i] * scale;
        }
        // Deflate: g -= value * v v^T
        for i in 0..n {
            for j in 0..n {
                g[i][j] -= value * vector[i] * vector[j];
            }
        }
    }
    Ok(coords)
}

fn dominant_eigenpair(g: &[Vec<f64>], axis: usize) -> Result<(f64, Vec<f64>), GeometryError> {
    let n = g.len();
    // Deterministic start vector, different per axis.
    let mut v: Vec<f64> = (0..n)
        .map(|i| ((i + axis * 7 + 1) as f64 * 0.7548776662).fract() - 0.5)
        .collect();
    normalize(&mut v)?;

    let mut value = 0.0;
    for _ in 0..200 {
        let mut next = vec![0.0f64; n];
        for i in 0..n {
            let mut acc = 0.0;
            for j in 0..n {
                acc += g[i][j] * v[j];
            }
            next[i] = acc;
        }
        value = next.iter().zip(&v).map(|(a, b)| a * b).sum();
        if normalize(&mut next).is_err() {
            // Matrix annihilated the vector; remaining spectrum is zero.
            return Ok((0.0, v));
        }
        let delta: f64 = next.iter().zip(&v).map(|(a, b)| (a - b).abs()).sum();
        v = next;
        if delta < 1e-10 {
            break;
        }
    }
    if !value.is_finite() {
        return Err(GeometryError::Embed("eigenvalue iteration diverged".into()));
    }
    Ok((value, v))
}

fn normalize(v: &mut [f64]) -> Result<(), GeometryError> {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm < 1e-12 {
        return Err(GeometryError::Embed("zero vector during embedding".into()));
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    Ok(())
}

/// A few passes of pairwise correction pulling violated distances back
/// inside their bounds. Cheap cleanup of the spectral projection.
fn refine_against_bounds(
    mol: &Molecule,
    conf: &mut Conformer,
    lower: &[Vec<f64>],
    upper: &[Vec<f64>],
) {
    let n = mol.atom_count();
    for _ in 0..60 {
        let mut worst: f64 = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = conf.distance(i, j).max(1e-6);
                let target = if d < lower[i][j] {
                    lower[i][j]
                } else if d > upper[i][j] {
                    upper[i][j]
                } else {
                    continue;
                };
                worst = worst.max((d - target).abs());
                let shift = 0.5 * (target - d) / d;
                for axis in 0..3 {
                    let delta = (conf.coords[j][axis] - conf.coords[i][axis]) * shift;
                    conf.coords[i][axis] -= delta;
                    conf.coords[j][axis] += delta;
                }
            }
        }
        if worst < 1e-3 {
            break;
        }
    }
}

/// Deterministic xorshift64 stream. The zero state is remapped so any
/// seed is usable.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        XorShift64 {
            state: if seed == 0 { 0x9E3779B97F4A7C15 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
