//! Ordnungserhaltende Verteilung von Marchern auf eine Linie oder einen Pfad.
//!
//! Ablauf:
//! 1. Dominante Achse und Richtung aus den Endpunkten bestimmen
//! 2. Marcher stabil entlang dieser Achse sortieren
//! 3. Zielpunkte erzeugen (Linie: lineare Interpolation, Pfad: Bogenlaenge)
//! 4. Sortierten Marcher `i` auf Zielpunkt `i` abbilden

use crate::error::DistributionError;
use crate::path::{ShapePath, CURVE_SAMPLES};
use crate::sampling::resample_by_count;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Toleranz fuer "Pfad ist geschlossen".
const CLOSED_PATH_EPSILON: f32 = 1e-4;

/// Dominante Achse einer Verteilung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortAxis {
    /// Sortierung nach x
    Horizontal,
    /// Sortierung nach y
    Vertical,
}

/// Sortier-Richtung entlang der dominanten Achse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// x aufsteigend
    LeftToRight,
    /// x absteigend
    RightToLeft,
    /// y aufsteigend (Canvas-y zeigt nach unten)
    TopToBottom,
    /// y absteigend
    BottomToTop,
}

impl SortDirection {
    /// Achse, nach der sortiert wird.
    pub fn axis(self) -> SortAxis {
        match self {
            SortDirection::LeftToRight | SortDirection::RightToLeft => SortAxis::Horizontal,
            SortDirection::TopToBottom | SortDirection::BottomToTop => SortAxis::Vertical,
        }
    }
}

/// Ergebnis fuer einen Marcher: Ausgangs- und Zielkoordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assignment<Id> {
    /// Marcher-Identitaet
    pub id: Id,
    /// Koordinate vor der Verteilung
    pub from: Vec2,
    /// Zugewiesene Zielkoordinate
    pub to: Vec2,
}

/// Ziel einer Verteilung.
#[derive(Debug, Clone, Copy)]
pub enum DistributionTarget<'a> {
    /// Gerade Linie, Endpunkte inklusive
    Line {
        /// Startpunkt
        start: Vec2,
        /// Endpunkt
        end: Vec2,
    },
    /// Mehrteiliger Shape-Pfad
    Path(&'a ShapePath),
}

/// Klassifiziert eine Linie nach dominanter Achse und Richtung.
///
/// `x1 == x2` ist vertikal; sonst entscheidet `|Steigung| > 1`.
pub fn classify_line(start: Vec2, end: Vec2) -> SortDirection {
    let vertical = if start.x == end.x {
        true
    } else {
        let slope = (end.y - start.y) / (end.x - start.x);
        slope.abs() > 1.0
    };

    if vertical {
        if start.y <= end.y {
            SortDirection::TopToBottom
        } else {
            SortDirection::BottomToTop
        }
    } else if start.x < end.x {
        SortDirection::LeftToRight
    } else {
        SortDirection::RightToLeft
    }
}

/// Klassifiziert einen Pfad ueber seinen ersten und letzten Punkt.
///
/// Geschlossene Pfade (Start = Ende) nutzen die groessere Ausdehnung der
/// Bounding-Box; bei Gleichstand horizontal.
pub fn classify_path(path: &ShapePath) -> SortDirection {
    let start = path.start();
    let end = path.end();
    if start.distance(end) > CLOSED_PATH_EPSILON {
        return classify_line(start, end);
    }

    let points = path.flatten(CURVE_SAMPLES);
    let (min, max) = points.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), &p| (min.min(p), max.max(p)),
    );
    let extent = max - min;
    if extent.x >= extent.y {
        SortDirection::LeftToRight
    } else {
        SortDirection::TopToBottom
    }
}

/// Sortiert Marcher stabil entlang der Richtung; Gleichstaende behalten
/// die Eingabe-Reihenfolge.
pub fn sort_by_direction<Id: Copy>(
    marchers: &[(Id, Vec2)],
    direction: SortDirection,
) -> Vec<(Id, Vec2)> {
    let mut sorted = marchers.to_vec();
    match direction {
        SortDirection::LeftToRight => sorted.sort_by(|a, b| a.1.x.total_cmp(&b.1.x)),
        SortDirection::RightToLeft => sorted.sort_by(|a, b| b.1.x.total_cmp(&a.1.x)),
        SortDirection::TopToBottom => sorted.sort_by(|a, b| a.1.y.total_cmp(&b.1.y)),
        SortDirection::BottomToTop => sorted.sort_by(|a, b| b.1.y.total_cmp(&a.1.y)),
    }
    sorted
}

/// `count` gleichmaessig verteilte Punkte auf der Strecke, Endpunkte inklusive.
///
/// Ein einzelner Punkt liegt auf der Mitte.
pub fn line_points(start: Vec2, end: Vec2, count: usize) -> Vec<Vec2> {
    match count {
        0 => Vec::new(),
        1 => vec![start.lerp(end, 0.5)],
        _ => {
            let last = (count - 1) as f32;
            (0..count)
                .map(|i| match i {
                    0 => start,
                    i if i == count - 1 => end,
                    i => start.lerp(end, i as f32 / last),
                })
                .collect()
        }
    }
}

/// Verteilt Marcher auf eine gerade Linie.
pub fn distribute_on_line<Id: Copy>(
    marchers: &[(Id, Vec2)],
    start: Vec2,
    end: Vec2,
) -> Result<Vec<Assignment<Id>>, DistributionError> {
    distribute(marchers, DistributionTarget::Line { start, end })
}

/// Verteilt Marcher proportional zur Bogenlaenge auf einen Shape-Pfad.
pub fn distribute_on_path<Id: Copy>(
    marchers: &[(Id, Vec2)],
    path: &ShapePath,
) -> Result<Vec<Assignment<Id>>, DistributionError> {
    distribute(marchers, DistributionTarget::Path(path))
}

/// Verteilt Marcher ordnungserhaltend auf das Ziel.
///
/// Weniger als zwei Marcher ergeben `InsufficientMarchers`. Entartete Ziele
/// (Laenge 0) legen alle Marcher auf den einzigen Punkt.
pub fn distribute<Id: Copy>(
    marchers: &[(Id, Vec2)],
    target: DistributionTarget<'_>,
) -> Result<Vec<Assignment<Id>>, DistributionError> {
    if marchers.len() < 2 {
        return Err(DistributionError::InsufficientMarchers {
            found: marchers.len(),
        });
    }

    let direction = match target {
        DistributionTarget::Line { start, end } => {
            if start == end {
                log::debug!("Verteilung auf entartete Linie bei {start}");
            }
            classify_line(start, end)
        }
        DistributionTarget::Path(path) => classify_path(path),
    };
    let targets = target_points(target, marchers.len());

    let sorted = sort_by_direction(marchers, direction);
    Ok(sorted
        .into_iter()
        .zip(targets)
        .map(|((id, from), to)| Assignment { id, from, to })
        .collect())
}

/// Bildet Marcher in der uebergebenen Reihenfolge auf das Ziel ab.
///
/// Fuer Shapes mit festen Ordinalen: Marcher `i` erhaelt Zielpunkt `i`,
/// ohne Sortierung nach Position.
pub fn assign_in_order<Id: Copy>(
    ordered: &[(Id, Vec2)],
    target: DistributionTarget<'_>,
) -> Result<Vec<Assignment<Id>>, DistributionError> {
    if ordered.len() < 2 {
        return Err(DistributionError::InsufficientMarchers {
            found: ordered.len(),
        });
    }

    let targets = target_points(target, ordered.len());
    Ok(ordered
        .iter()
        .zip(targets)
        .map(|(&(id, from), to)| Assignment { id, from, to })
        .collect())
}

fn target_points(target: DistributionTarget<'_>, count: usize) -> Vec<Vec2> {
    match target {
        DistributionTarget::Line { start, end } => line_points(start, end, count),
        DistributionTarget::Path(path) => resample_by_count(&path.flatten(CURVE_SAMPLES), count),
    }
}
