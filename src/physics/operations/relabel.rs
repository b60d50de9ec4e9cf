use crate::model::{Atom, Structure};

/// Returns a copy of `structure` with every element label replaced by `rule(index, atom)`.
pub fn relabel<F>(structure: &Structure, rule: F) -> Structure
where
  F: Fn(usize, &Atom) -> String,
{
  let mut out = structure.clone();
  for (i, atom) in out.atoms.iter_mut().enumerate() {
    atom.element = rule(i, &structure.atoms[i]);
  }
  out
}

/// Cycles through `labels` by atom index: `["B", "N"]` puts B on even and N on odd indices.
pub fn alternating(labels: &[&str]) -> impl Fn(usize, &Atom) -> String {
  let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
  move |i, atom| {
    if labels.is_empty() {
      atom.element.clone()
    } else {
      labels[i % labels.len()].clone()
    }
  }
}

/// Hexagonal boron nitride from a honeycomb built with one species.
///
/// The generators emit the two sublattices interleaved, so parity relabelling
/// gives a lattice where every B has only N neighbors.
pub fn boron_nitride(structure: &Structure) -> Structure {
  let mut bn = relabel(structure, alternating(&["B", "N"]));
  bn.title = structure.title.replace("nanotube", "BN nanotube");
  bn
}
