/// Per-element data used by the builders and the renderer.
/// Radii are covalent radii in Angstrom, colors are standard CPK, masses in amu.
pub struct ElementData {
    pub z: u32,
    pub mass: f64,
    pub covalent_radius: f64,
    pub color: (f64, f64, f64),
}

pub fn element_data(element: &str) -> Option<ElementData> {
    let (z, mass, covalent_radius, color) = match element {
        // --- Period 1 ---
        "H"  => (1, 1.008, 0.31, (1.00, 1.00, 1.00)),  // White
        "He" => (2, 4.003, 0.28, (0.85, 1.00, 1.00)),

        // --- Period 2 ---
        "Li" => (3, 6.94, 1.28, (0.80, 0.50, 1.00)),
        "Be" => (4, 9.012, 0.96, (0.76, 1.00, 0.00)),
        "B"  => (5, 10.81, 0.84, (1.00, 0.71, 0.71)),  // Salmon
        "C"  => (6, 12.011, 0.76, (0.56, 0.56, 0.56)), // Grey
        "N"  => (7, 14.007, 0.71, (0.19, 0.31, 0.97)), // Blue
        "O"  => (8, 15.999, 0.66, (1.00, 0.05, 0.05)), // Red
        "F"  => (9, 18.998, 0.57, (0.56, 0.88, 0.31)),
        "Ne" => (10, 20.180, 0.58, (0.70, 0.89, 0.96)),

        // --- Period 3 ---
        "Na" => (11, 22.990, 1.66, (0.67, 0.36, 0.95)),
        "Mg" => (12, 24.305, 1.41, (0.54, 1.00, 0.00)),
        "Al" => (13, 26.982, 1.21, (0.75, 0.65, 0.65)),
        "Si" => (14, 28.085, 1.11, (0.94, 0.78, 0.63)),
        "P"  => (15, 30.974, 1.07, (1.00, 0.50, 0.00)),
        "S"  => (16, 32.06, 1.05, (1.00, 1.00, 0.19)),
        "Cl" => (17, 35.45, 1.02, (0.12, 0.94, 0.12)),

        // --- Dopants and catalysts seen around tubes ---
        "Fe" => (26, 55.845, 1.32, (0.88, 0.40, 0.20)),
        "Co" => (27, 58.933, 1.26, (0.94, 0.56, 0.63)),
        "Ni" => (28, 58.693, 1.24, (0.31, 0.82, 0.31)),
        "Cu" => (29, 63.546, 1.32, (0.78, 0.50, 0.20)),
        "Mo" => (42, 95.95, 1.54, (0.33, 0.71, 0.71)),
        "Ag" => (47, 107.87, 1.45, (0.75, 0.75, 0.75)),
        "Pt" => (78, 195.08, 1.36, (0.82, 0.82, 0.88)),
        "Au" => (79, 196.97, 1.36, (1.00, 0.82, 0.14)),
        _ => return None,
    };
    Some(ElementData { z, mass, covalent_radius, color })
}

/// Symbols covered by `element_data`.
const SYMBOLS: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Fe", "Co", "Ni",
    "Cu", "Mo", "Ag", "Pt", "Au",
];

/// Element symbol for an atomic number, if the table knows it.
pub fn symbol_from_z(z: u32) -> Option<&'static str> {
    SYMBOLS
        .iter()
        .copied()
        .find(|s| element_data(s).is_some_and(|d| d.z == z))
}

pub fn atomic_mass(element: &str) -> f64 {
    element_data(element).map_or(1.0, |d| d.mass)
}

pub fn covalent_radius(element: &str) -> f64 {
    element_data(element).map_or(1.0, |d| d.covalent_radius)
}

/// Returns (radius_in_angstroms, (r, g, b)); hot pink for unknown symbols.
pub fn get_atom_properties(element: &str) -> (f64, (f64, f64, f64)) {
    match element_data(element) {
        Some(d) => (d.covalent_radius, d.color),
        None => (1.00, (1.00, 0.08, 0.58)),
    }
}
