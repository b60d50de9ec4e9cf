// src/rendering/primitives.rs

use cairo::{Context, LinearGradient, RadialGradient};
use std::f64::consts::PI;

use crate::error::Result;

pub struct RenderBond {
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub radius: f64,
}

/// Shaded sphere: highlight toward the top-left, darker rim.
pub fn draw_atom_vector(cr: &Context, x: f64, y: f64, radius: f64, color: (f64, f64, f64)) -> Result<()> {
    let (r, g, b) = color;

    let gradient = RadialGradient::new(
        x - radius * 0.3,
        y - radius * 0.3,
        radius * 0.1, // Highlight position/size
        x,
        y,
        radius, // Base sphere position/size
    );

    gradient.add_color_stop_rgb(0.0, 1.0, 1.0, 1.0);
    gradient.add_color_stop_rgb(0.2, (r + 0.2).min(1.0), (g + 0.2).min(1.0), (b + 0.2).min(1.0));
    gradient.add_color_stop_rgb(1.0, r * 0.6, g * 0.6, b * 0.6);

    cr.set_source(&gradient)?;
    cr.arc(x, y, radius, 0.0, 2.0 * PI);
    cr.fill()?;

    // Thin outline keeps spheres separable in dense bundles
    cr.set_source_rgba(0.0, 0.0, 0.0, 0.3);
    cr.set_line_width(radius * 0.05);
    cr.arc(x, y, radius, 0.0, 2.0 * PI);
    cr.stroke()?;
    Ok(())
}

pub fn draw_cylinder_impostor(cr: &Context, bond: &RenderBond, color: (f64, f64, f64)) -> Result<()> {
    let (p1, p2, radius) = (bond.start, bond.end, bond.radius);
    let dx = p2[0] - p1[0];
    let dy = p2[1] - p1[1];
    let len_sq = dx * dx + dy * dy;
    if len_sq < 0.0001 {
        return Ok(());
    }

    let nx = -dy / len_sq.sqrt();
    let ny = dx / len_sq.sqrt();

    let c1 = (p1[0] + nx * radius, p1[1] + ny * radius);
    let c2 = (p2[0] + nx * radius, p2[1] + ny * radius);
    let c3 = (p2[0] - nx * radius, p2[1] - ny * radius);
    let c4 = (p1[0] - nx * radius, p1[1] - ny * radius);

    let gradient = LinearGradient::new(c1.0, c1.1, c4.0, c4.1);
    let (r, g, b) = color;
    let shadow = 0.3;

    gradient.add_color_stop_rgb(0.0, r * shadow, g * shadow, b * shadow);
    gradient.add_color_stop_rgb(0.3, r, g, b);
    gradient.add_color_stop_rgb(0.5, (r + 0.3).min(1.0), (g + 0.3).min(1.0), (b + 0.3).min(1.0));
    gradient.add_color_stop_rgb(0.7, r, g, b);
    gradient.add_color_stop_rgb(1.0, r * shadow, g * shadow, b * shadow);

    cr.set_source(&gradient)?;
    cr.move_to(c1.0, c1.1);
    cr.line_to(c2.0, c2.1);
    cr.line_to(c3.0, c3.1);
    cr.line_to(c4.0, c4.1);
    cr.close_path();
    cr.fill()?;
    Ok(())
}
