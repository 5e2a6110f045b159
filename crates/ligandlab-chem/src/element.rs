//! Element data needed by the parser, embedder, and descriptor code.

/// One periodic-table entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub number: u8,
    pub symbol: &'static str,
    pub weight: f64,
    /// Default valence used to fill implicit hydrogens; 0 means "never add H".
    pub valence: u8,
}

/// Elements that show up in drug-like SMILES. Lookups outside this set fail
/// and surface as a parse error.
const ELEMENTS: &[Element] = &[
    Element { number: 1, symbol: "H", weight: 1.008, valence: 1 },
    Element { number: 3, symbol: "Li", weight: 6.941, valence: 1 },
    Element { number: 5, symbol: "B", weight: 10.811, valence: 3 },
    Element { number: 6, symbol: "C", weight: 12.011, valence: 4 },
    Element { number: 7, symbol: "N", weight: 14.007, valence: 3 },
    Element { number: 8, symbol: "O", weight: 15.999, valence: 2 },
    Element { number: 9, symbol: "F", weight: 18.998, valence: 1 },
    Element { number: 11, symbol: "Na", weight: 22.990, valence: 0 },
    Element { number: 12, symbol: "Mg", weight: 24.305, valence: 0 },
    Element { number: 14, symbol: "Si", weight: 28.086, valence: 4 },
    Element { number: 15, symbol: "P", weight: 30.974, valence: 3 },
    Element { number: 16, symbol: "S", weight: 32.06, valence: 2 },
    Element { number: 17, symbol: "Cl", weight: 35.45, valence: 1 },
    Element { number: 19, symbol: "K", weight: 39.098, valence: 0 },
    Element { number: 20, symbol: "Ca", weight: 40.078, valence: 0 },
    Element { number: 26, symbol: "Fe", weight: 55.845, valence: 0 },
    Element { number: 29, symbol: "Cu", weight: 63.546, valence: 0 },
    Element { number: 30, symbol: "Zn", weight: 65.38, valence: 0 },
    Element { number: 34, symbol: "Se", weight: 78.971, valence: 2 },
    Element { number: 35, symbol: "Br", weight: 79.904, valence: 1 },
    Element { number: 53, symbol: "I", weight: 126.904, valence: 1 },
    Element { number: 78, symbol: "Pt", weight: 195.084, valence: 0 },
];

pub fn by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

pub fn by_number(number: u8) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.number == number)
}

/// Atomic weight, 0.0 for anything outside the table.
pub fn atomic_weight(number: u8) -> f64 {
    by_number(number).map(|e| e.weight).unwrap_or(0.0)
}

/// Covalent radius in Å, used for distance-geometry bond lengths.
pub fn covalent_radius(number: u8) -> f64 {
    match number {
        1 => 0.31,
        5 => 0.84,
        6 => 0.76,
        7 => 0.71,
        8 => 0.66,
        9 => 0.57,
        14 => 1.11,
        15 => 1.07,
        16 => 1.05,
        17 => 1.02,
        34 => 1.20,
        35 => 1.20,
        53 => 1.39,
        _ => 0.77,
    }
}

/// Van der Waals radius in Å, used for non-bonded lower bounds.
pub fn vdw_radius(number: u8) -> f64 {
    match number {
        1 => 1.20,
        6 => 1.70,
        7 => 1.55,
        8 => 1.52,
        9 => 1.47,
        15 => 1.80,
        16 => 1.80,
        17 => 1.75,
        35 => 1.85,
        53 => 1.98,
        _ => 1.70,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carbon_lookup() {
        let c = by_symbol("C").unwrap();
        assert_eq!(c.number, 6);
        assert_eq!(c.valence, 4);
        assert!((c.weight - 12.011).abs() < 1e-9);
        assert_eq!(by_number(6).unwrap().symbol, "C");
    }

    #[test]
    fn two_letter_symbols() {
        assert_eq!(by_symbol("Cl").unwrap().number, 17);
        assert_eq!(by_symbol("Br").unwrap().number, 35);
        assert_eq!(by_symbol("Pt").unwrap().number, 78);
    }

    #[test]
    fn unknown_symbol_is_none() {
        assert!(by_symbol("Xx").is_none());
        assert!(by_number(200).is_none());
        assert_eq!(atomic_weight(200), 0.0);
    }
}
