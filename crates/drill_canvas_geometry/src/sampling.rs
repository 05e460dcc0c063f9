//! Bézier-Auswertung und Arc-Length-Resampling von Polylines.

use glam::Vec2;

/// Quadratische Bézier-Kurve B(t) = (1-t)²·P0 + 2(1-t)t·P1 + t²·P2
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    inv * inv * p0 + 2.0 * inv * t * p1 + t * t * p2
}

/// Kubische Bézier-Kurve B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    inv * inv * inv * p0 + 3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t * p3
}

/// Gesamtlaenge einer Polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Kumulierte Bogenlaengen-Tabelle: `lut[i]` = Laenge bis Punkt `i`.
fn cumulative_lengths(points: &[Vec2]) -> Vec<f32> {
    let mut lut = Vec::with_capacity(points.len());
    let mut total = 0.0;
    lut.push(0.0);
    for w in points.windows(2) {
        total += w[0].distance(w[1]);
        lut.push(total);
    }
    lut
}

/// Punkt bei Bogenlaenge `distance` auf der Polyline.
pub fn point_at_distance(points: &[Vec2], distance: f32) -> Option<Vec2> {
    let lut = cumulative_lengths(points);
    point_at_distance_with_lut(points, &lut, distance)
}

fn point_at_distance_with_lut(points: &[Vec2], lut: &[f32], distance: f32) -> Option<Vec2> {
    let first = *points.first()?;
    let total = *lut.last()?;
    if total <= f32::EPSILON || distance <= 0.0 {
        return Some(first);
    }
    if distance >= total {
        return points.last().copied();
    }

    // erster Index mit lut[idx] >= distance
    let idx = lut.partition_point(|&len| len < distance).max(1);
    let seg_start = lut[idx - 1];
    let seg_len = lut[idx] - seg_start;
    let t = if seg_len > f32::EPSILON {
        (distance - seg_start) / seg_len
    } else {
        0.0
    };
    Some(points[idx - 1].lerp(points[idx], t))
}

/// Tastet eine Polyline mit `count` Punkten in gleichen Bogenlaengen-Abstaenden ab.
///
/// - `count == 0` → leer
/// - `count == 1` → Punkt auf halber Bogenlaenge
/// - sonst erster und letzter Punkt exakt, dazwischen gleichmaessig
///
/// Eine Polyline ohne Laenge liefert `count`-mal ihren ersten Punkt.
pub fn resample_by_count(points: &[Vec2], count: usize) -> Vec<Vec2> {
    if count == 0 || points.is_empty() {
        return Vec::new();
    }

    let lut = cumulative_lengths(points);
    let total = lut.last().copied().unwrap_or(0.0);

    if count == 1 {
        return point_at_distance_with_lut(points, &lut, total * 0.5)
            .into_iter()
            .collect();
    }

    let last_index = (count - 1) as f32;
    (0..count)
        .filter_map(|i| {
            let distance = total * (i as f32 / last_index);
            point_at_distance_with_lut(points, &lut, distance)
        })
        .collect()
}
