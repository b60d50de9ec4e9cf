// src/rendering/painter.rs

use super::primitives::{draw_atom_vector, draw_cylinder_impostor, RenderBond};
use super::scene::{bond_cutoff, Scene};
use crate::config::RenderStyle;
use crate::error::Result;
use cairo::Context;

// ============================================================================
// BACKGROUND
// ============================================================================

pub fn draw_background(cr: &Context, style: &RenderStyle) -> Result<()> {
    if let Some((r, g, b)) = style.background_color {
        cr.set_source_rgb(r, g, b);
        cr.paint()?;
    }
    Ok(())
}

// ============================================================================
// UNIT CELL DRAWING
// ============================================================================

pub fn draw_unit_cell(cr: &Context, corners: &[[f64; 2]]) -> Result<()> {
    if corners.len() != 8 {
        return Ok(());
    }

    cr.set_source_rgb(0.3, 0.3, 0.3);
    cr.set_line_width(1.5);

    // Corner index = x << 2 | y << 1 | z
    let edges = [
        (0, 1), (0, 2), (0, 4),
        (1, 3), (1, 5),
        (2, 3), (2, 6),
        (4, 5), (4, 6),
        (7, 6), (7, 5), (7, 3),
    ];

    for (start, end) in edges {
        let p1 = corners[start];
        let p2 = corners[end];
        cr.move_to(p1[0], p1[1]);
        cr.line_to(p2[0], p2[1]);
    }
    cr.stroke()?;
    Ok(())
}

// ============================================================================
// MAIN STRUCTURE DRAWING
// ============================================================================

/// Bonds between atom pairs closer than the covalent cutoff, trimmed to the sphere surfaces.
pub fn collect_bonds(scene: &Scene, style: &RenderStyle) -> Vec<RenderBond> {
    let mut bonds = Vec::with_capacity(scene.atoms.len() * 2);
    if !style.show_bonds {
        return bonds;
    }

    for (i, a1) in scene.atoms.iter().enumerate() {
        for a2 in &scene.atoms[i + 1..] {
            let d = [
                a2.world_pos[0] - a1.world_pos[0],
                a2.world_pos[1] - a1.world_pos[1],
                a2.world_pos[2] - a1.world_pos[2],
            ];
            let dist_sq = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];

            // Early distance cutoff
            if dist_sq > 16.0 {
                continue;
            }
            let dist = dist_sq.sqrt();
            if dist < 0.4 || dist > bond_cutoff(&a1.element, &a2.element, style.bond_tolerance) {
                continue;
            }

            let v = [
                a2.screen_pos[0] - a1.screen_pos[0],
                a2.screen_pos[1] - a1.screen_pos[1],
                a2.screen_pos[2] - a1.screen_pos[2],
            ];
            let screen_dist = (v[0] * v[0] + v[1] * v[1]).sqrt();

            // Offset bonds to avoid overlapping atoms
            let off1 = a1.radius_px * 0.95;
            let off2 = a2.radius_px * 0.95;
            if screen_dist <= off1 + off2 {
                continue;
            }
            let t1 = off1 / screen_dist;
            let t2 = off2 / screen_dist;

            bonds.push(RenderBond {
                start: [a1.screen_pos[0] + v[0] * t1, a1.screen_pos[1] + v[1] * t1, a1.screen_pos[2] + v[2] * t1],
                end: [a2.screen_pos[0] - v[0] * t2, a2.screen_pos[1] - v[1] * t2, a2.screen_pos[2] - v[2] * t2],
                radius: style.bond_radius * scene.scale,
            });
        }
    }
    bonds
}

/// Draws bonds and atoms interleaved by depth, far to near.
pub fn draw_structure(cr: &Context, scene: &Scene, style: &RenderStyle) -> Result<()> {
    let mut bonds = collect_bonds(scene, style);
    bonds.sort_by(|a, b| {
        let z_a = (a.start[2] + a.end[2]) / 2.0;
        let z_b = (b.start[2] + b.end[2]) / 2.0;
        z_a.total_cmp(&z_b)
    });

    let mut bond_iter = bonds.iter().peekable();
    for atom in &scene.atoms {
        while let Some(bond) = bond_iter.next_if(|b| (b.start[2] + b.end[2]) / 2.0 <= atom.screen_pos[2]) {
            draw_cylinder_impostor(cr, bond, style.bond_color)?;
        }
        draw_atom_vector(cr, atom.screen_pos[0], atom.screen_pos[1], atom.radius_px, atom.color)?;
    }
    for bond in bond_iter {
        draw_cylinder_impostor(cr, bond, style.bond_color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, Structure};
    use crate::rendering::scene::{calculate_scene, RenderOptions};

    fn chain() -> Structure {
        Structure::new(
            [[0.0; 3]; 3],
            vec![
                Atom::new("C", [0.0, 0.0, 0.0]),
                Atom::new("C", [1.42, 0.0, 0.0]),
                Atom::new("C", [5.0, 0.0, 0.0]),
            ],
            [false; 3],
        )
    }

    #[test]
    fn test_bonds_only_within_cutoff() {
        let scene = calculate_scene(&chain(), &RenderOptions::default());
        let bonds = collect_bonds(&scene, &RenderStyle::default());
        assert_eq!(bonds.len(), 1);
    }

    #[test]
    fn test_bonds_disabled() {
        let scene = calculate_scene(&chain(), &RenderOptions::default());
        let style = RenderStyle { show_bonds: false, ..Default::default() };
        assert!(collect_bonds(&scene, &style).is_empty());
    }
}
