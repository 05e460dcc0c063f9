//! Quantisierung von Canvas-Positionen auf das Step-Raster.

use glam::Vec2;

/// Rundet jede Achse auf das naechste Vielfache von `step`.
///
/// Ein nicht-positiver oder nicht-endlicher `step` deaktiviert das Snapping,
/// die Position wird dann unveraendert zurueckgegeben.
pub fn snap_to_step(position: Vec2, step: f32) -> Vec2 {
    if !step.is_finite() || step <= 0.0 {
        return position;
    }
    (position / step).round() * step
}

/// Prueft, ob eine Position bereits auf dem Raster liegt.
pub fn is_on_step(position: Vec2, step: f32) -> bool {
    snap_to_step(position, step) == position
}
