//! Universal force field energy and a steepest-descent minimizer.
//!
//! Four terms: bond stretch, angle bend, torsion, and a Lennard-Jones
//! 12-6 for pairs separated by more than two bonds. Gradients are
//! central differences; descent uses a small fixed line search.

use ligandlab_common::GeometryError;
use tracing::debug;

use crate::conformer::Conformer;
use crate::embed::{ideal_angle, ideal_bond_length};
use crate::molecule::{BondOrder, Molecule};

#[derive(Debug, Clone, Copy)]
pub struct MinimizeConfig {
    pub max_steps: usize,
    /// Stop once the energy drop per step falls below this.
    pub energy_tolerance: f64,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        MinimizeConfig { max_steps: 200, energy_tolerance: 1e-4 }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MinimizeResult {
    pub initial_energy: f64,
    pub final_energy: f64,
    pub steps: usize,
    pub converged: bool,
}

struct BondTerm {
    a: usize,
    b: usize,
    r0: f64,
    k: f64,
}

struct AngleTerm {
    i: usize,
    j: usize,
    k: usize,
    theta0: f64,
    force: f64,
}

struct TorsionTerm {
    i: usize,
    j: usize,
    k: usize,
    l: usize,
    barrier: f64,
    periodicity: f64,
}

struct NonBondedTerm {
    i: usize,
    j: usize,
    /// LJ well depth, kcal/mol.
    depth: f64,
    /// LJ minimum-energy distance, Å.
    x0: f64,
}

/// Precomputed force-field terms for one molecule.
pub struct ForceField {
    bonds: Vec<BondTerm>,
    angles: Vec<AngleTerm>,
    torsions: Vec<TorsionTerm>,
    nonbonded: Vec<NonBondedTerm>,
}

impl ForceField {
    pub fn for_molecule(mol: &Molecule) -> ForceField {
        let bonds = mol
            .bonds
            .iter()
            .map(|b| BondTerm {
                a: b.a,
                b: b.b,
                r0: ideal_bond_length(mol, b.a, b.b, b.order),
                k: bond_force_constant(b.order),
            })
            .collect();

        let mut angles = Vec::new();
        for center in 0..mol.atom_count() {
            let theta0 = ideal_angle(mol, center);
            let nbrs = &mol.adjacency[center];
            for x in 0..nbrs.len() {
                for y in (x + 1)..nbrs.len() {
                    angles.push(AngleTerm {
                        i: nbrs[x].0,
                        j: center,
                        k: nbrs[y].0,
                        theta0,
                        force: 50.0,
                    });
                }
            }
        }

        let mut torsions = Vec::new();
        for bond in &mol.bonds {
            let (j, k) = (bond.a, bond.b);
            if mol.degree(j) < 2 || mol.degree(k) < 2 {
                continue;
            }
            let (barrier, periodicity) = match bond.order {
                BondOrder::Single => (1.0, 3.0),
                BondOrder::Aromatic | BondOrder::Double => (5.0, 2.0),
                BondOrder::Triple => continue,
            };
            for &(i, _) in &mol.adjacency[j] {
                if i == k {
                    continue;
                }
                for &(l, _) in &mol.adjacency[k] {
                    if l == j || l == i {
                        continue;
                    }
                    torsions.push(TorsionTerm { i, j, k, l, barrier, periodicity });
                }
            }
        }

        let nonbonded = nonbonded_terms(mol);

        ForceField { bonds, angles, torsions, nonbonded }
    }

    /// Total energy in kcal/mol.
    pub fn energy(&self, conf: &Conformer) -> f64 {
        let mut e = 0.0;

        for t in &self.bonds {
            let d = conf.distance(t.a, t.b) - t.r0;
            e += 0.5 * t.k * d * d;
        }
        for t in &self.angles {
            let d = conf.angle(t.i, t.j, t.k) - t.theta0;
            e += 0.5 * t.force * d * d;
        }
        for t in &self.torsions {
            let phi = conf.dihedral(t.i, t.j, t.k, t.l);
            e += 0.5 * t.barrier * (1.0 - (t.periodicity * phi).cos());
        }
        for t in &self.nonbonded {
            let r = conf.distance(t.i, t.j).max(0.1);
            let q = t.x0 / r;
            let q6 = q.powi(6);
            e += t.depth * (q6 * q6 - 2.0 * q6);
        }

        e
    }

    /// Steepest descent with numerical gradients. Modifies `conf` in place.
    pub fn minimize(
        &self,
        conf: &mut Conformer,
        config: MinimizeConfig,
    ) -> Result<MinimizeResult, GeometryError> {
        const H: f64 = 1e-4;
        const TRIAL_STEPS: [f64; 4] = [0.02, 0.01, 0.005, 0.001];

        let n = conf.atom_count();
        let initial_energy = self.energy(conf);
        let mut energy = initial_energy;
        let mut converged = false;
        let mut steps = 0;

        for step in 0..config.max_steps {
            steps = step + 1;

            // Central-difference gradient.
            let mut grad = vec![[0.0f64; 3]; n];
            for i in 0..n {
                for axis in 0..3 {
                    let orig = conf.coords[i][axis];
                    conf.coords[i][axis] = orig + H;
                    let e_plus = self.energy(conf);
                    conf.coords[i][axis] = orig - H;
                    let e_minus = self.energy(conf);
                    conf.coords[i][axis] = orig;
                    grad[i][axis] = (e_plus - e_minus) / (2.0 * H);
                }
            }

            let grad_norm: f64 = grad
                .iter()
                .flatten()
                .map(|g| g * g)
                .sum::<f64>()
                .sqrt();
            if !grad_norm.is_finite() {
                return Err(GeometryError::Embed(
                    "force-field gradient diverged".into(),
                ));
            }
            if grad_norm < 1e-8 {
                converged = true;
                break;
            }

            // Try shrinking step sizes along -grad; keep the best.
            let base = conf.coords.clone();
            let mut best: Option<(f64, Vec<[f64; 3]>)> = None;
            for &alpha in &TRIAL_STEPS {
                let scale = alpha / grad_norm;
                for i in 0..n {
                    for axis in 0..3 {
                        conf.coords[i][axis] = base[i][axis] - grad[i][axis] * scale;
                    }
                }
                let e = self.energy(conf);
                if e < energy && best.as_ref().map_or(true, |(be, _)| e < *be) {
                    best = Some((e, conf.coords.clone()));
                }
            }

            match best {
                Some((e, coords)) => {
                    let drop = energy - e;
                    conf.coords = coords;
                    energy = e;
                    if drop < config.energy_tolerance {
                        converged = true;
                        break;
                    }
                }
                None => {
                    // No trial step improves; we are at a local minimum for
                    // this step-size ladder.
                    conf.coords = base;
                    converged = true;
                    break;
                }
            }
        }

        debug!(initial_energy, final_energy = energy, steps, converged, "minimization done");
        Ok(MinimizeResult { initial_energy, final_energy: energy, steps, converged })
    }
}

fn bond_force_constant(order: BondOrder) -> f64 {
    match order {
        BondOrder::Single => 700.0,
        BondOrder::Aromatic => 900.0,
        BondOrder::Double => 1000.0,
        BondOrder::Triple => 1200.0,
    }
}

/// LJ parameters per element, roughly the UFF table values.
fn lj_params(atomic_number: u8) -> (f64, f64) {
    match atomic_number {
        1 => (0.044, 2.886),
        6 => (0.105, 3.851),
        7 => (0.069, 3.660),
        8 => (0.060, 3.500),
        9 => (0.050, 3.364),
        15 => (0.305, 4.147),
        16 => (0.274, 4.035),
        17 => (0.227, 3.947),
        35 => (0.251, 4.189),
        53 => (0.339, 4.500),
        _ => (0.105, 3.851),
    }
}

/// Pairs separated by three or more bonds get an LJ term; 1-2 and 1-3
/// pairs are excluded.
fn nonbonded_terms(mol: &Molecule) -> Vec<NonBondedTerm> {
    let n = mol.atom_count();
    let mut excluded = std::collections::HashSet::new();
    for bond in &mol.bonds {
        let (a, b) = (bond.a.min(bond.b), bond.a.max(bond.b));
        excluded.insert((a, b));
    }
    for center in 0..n {
        let nbrs = &mol.adjacency[center];
        for x in 0..nbrs.len() {
            for y in (x + 1)..nbrs.len() {
                let (i, j) = (nbrs[x].0.min(nbrs[y].0), nbrs[x].0.max(nbrs[y].0));
                excluded.insert((i, j));
            }
        }
    }

    let mut terms = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if excluded.contains(&(i, j)) {
                continue;
            }
            let (di, xi) = lj_params(mol.atoms[i].atomic_number);
            let (dj, xj) = lj_params(mol.atoms[j].atomic_number);
            terms.push(NonBondedTerm {
                i,
                j,
                depth: (di * dj).sqrt(),
                x0: (xi * xj).sqrt(),
            });
        }
    }
    terms
}
