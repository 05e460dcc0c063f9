//! Zentrale Feld-Konfiguration für den Drill-Canvas.
//!
//! `FieldOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use super::scene::PathwayStyle;
use anyhow::Context;
use drill_canvas_geometry::snap_to_step;
use std::path::{Path, PathBuf};
use glam::Vec2;
use serde::{Deserialize, Serialize};

// ── Feld ────────────────────────────────────────────────────────────

/// Dateiname der Feld-Optionen im Show-Verzeichnis.
pub const OPTIONS_FILE_NAME: &str = "drill_canvas.toml";

/// Canvas-Einheiten pro Step (Raster für Snapping).
pub const STEP_SIZE: f32 = 10.0;
/// Feldbreite in Canvas-Einheiten (Football-Feld, Zehntel-Steps).
pub const FIELD_WIDTH: f32 = 1600.0;
/// Feldhöhe in Canvas-Einheiten.
pub const FIELD_HEIGHT: f32 = 854.0;

// ── Pathway-Vorschau ────────────────────────────────────────────────

/// Farbe der Pathway-Vorschau (RGBA: Rot).
pub const PATHWAY_COLOR: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
/// Linienstärke der Pathway-Vorschau.
pub const PATHWAY_STROKE_WIDTH: f32 = 2.0;
/// Strichmuster der Pathway-Vorschau [Strich, Lücke].
pub const PATHWAY_DASH: [f32; 2] = [4.0, 4.0];
/// Radius der statischen Ziel-Marker.
pub const STATIC_MARKER_RADIUS: f32 = 4.0;

// ── Shape-Editor ────────────────────────────────────────────────────

/// Länge eines neu angehängten Segments in Steps.
pub const DEFAULT_SEGMENT_LENGTH_STEPS: f32 = 4.0;

/// Alle zur Laufzeit änderbaren Feld-Optionen.
/// Wird als [`OPTIONS_FILE_NAME`] im Show-Verzeichnis gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    // ── Feld ────────────────────────────────────────────────────
    /// Step-Größe in Canvas-Einheiten (<= 0 deaktiviert Snapping)
    pub step_size: f32,
    /// Feldbreite in Canvas-Einheiten
    pub field_width: f32,
    /// Feldhöhe in Canvas-Einheiten
    pub field_height: f32,

    // ── Vorschau ────────────────────────────────────────────────
    /// Farbe der Pathway-Vorschau (RGBA)
    pub pathway_color: [f32; 4],
    /// Linienstärke der Pathway-Vorschau
    pub pathway_stroke_width: f32,
    /// Strichmuster der Pathway-Vorschau
    #[serde(default = "default_pathway_dash")]
    pub pathway_dash: [f32; 2],
    /// Radius der statischen Ziel-Marker
    #[serde(default = "default_static_marker_radius")]
    pub static_marker_radius: f32,

    // ── Shape-Editor ────────────────────────────────────────────
    /// Länge neu angehängter Segmente in Steps
    #[serde(default = "default_segment_length_steps")]
    pub default_segment_length_steps: f32,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            step_size: STEP_SIZE,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            pathway_color: PATHWAY_COLOR,
            pathway_stroke_width: PATHWAY_STROKE_WIDTH,
            pathway_dash: PATHWAY_DASH,
            static_marker_radius: STATIC_MARKER_RADIUS,
            default_segment_length_steps: DEFAULT_SEGMENT_LENGTH_STEPS,
        }
    }
}

/// Serde-Default für `pathway_dash` (Abwärtskompatibilität).
fn default_pathway_dash() -> [f32; 2] {
    PATHWAY_DASH
}

/// Serde-Default für `static_marker_radius` (Abwärtskompatibilität).
fn default_static_marker_radius() -> f32 {
    STATIC_MARKER_RADIUS
}

/// Serde-Default für `default_segment_length_steps` (Abwärtskompatibilität).
fn default_segment_length_steps() -> f32 {
    DEFAULT_SEGMENT_LENGTH_STEPS
}

impl FieldOptions {
    /// Liest Optionen aus TOML und prüft die Feldgeometrie.
    ///
    /// Eine Step-Größe <= 0 ist erlaubt (Snapping aus), ein Feld ohne
    /// positive Ausdehnung nicht.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let options: Self = toml::from_str(content).context("Feld-Optionen nicht lesbar")?;
        options.check_field()?;
        Ok(options)
    }

    fn check_field(&self) -> anyhow::Result<()> {
        let field = Vec2::new(self.field_width, self.field_height);
        if !field.is_finite() || field.min_element() <= 0.0 {
            anyhow::bail!("Feldgröße {} x {} ist ungültig", self.field_width, self.field_height);
        }
        if self.pathway_stroke_width < 0.0 || self.static_marker_radius < 0.0 {
            anyhow::bail!("Pathway-Stil mit negativer Größe");
        }
        Ok(())
    }

    /// Optionen für eine Show: `drill_canvas.toml` im Show-Verzeichnis.
    ///
    /// Fehlt die Datei, gelten die Feld-Defaults. Eine kaputte Datei wird
    /// geloggt und ebenfalls durch Defaults ersetzt, damit der Canvas startet.
    pub fn load_for_show(show_dir: &Path) -> Self {
        let path = Self::file_in(show_dir);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} fehlt, Standardfeld", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("{} nicht lesbar ({}), Standardfeld", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_toml(&content) {
            Ok(options) => {
                log::info!(
                    "Feld {} x {} mit Step {} aus {}",
                    options.field_width,
                    options.field_height,
                    options.step_size,
                    path.display()
                );
                options
            }
            Err(e) => {
                log::warn!("{:#}, Standardfeld", e);
                Self::default()
            }
        }
    }

    /// Schreibt die Optionen ins Show-Verzeichnis (legt es bei Bedarf an).
    pub fn save_for_show(&self, show_dir: &Path) -> anyhow::Result<PathBuf> {
        self.check_field()?;
        std::fs::create_dir_all(show_dir)
            .with_context(|| format!("Show-Verzeichnis {} anlegen", show_dir.display()))?;
        let path = Self::file_in(show_dir);
        let content = toml::to_string_pretty(self).context("Feld-Optionen serialisieren")?;
        std::fs::write(&path, content).with_context(|| format!("{} schreiben", path.display()))?;
        log::info!("Feld-Optionen gespeichert: {}", path.display());
        Ok(path)
    }

    /// Pfad der Optionen-Datei innerhalb eines Show-Verzeichnisses.
    pub fn file_in(show_dir: &Path) -> PathBuf {
        show_dir.join(OPTIONS_FILE_NAME)
    }

    /// Ist Snapping mit der konfigurierten Step-Größe aktiv?
    pub fn snapping_enabled(&self) -> bool {
        self.step_size.is_finite() && self.step_size > 0.0
    }

    /// Loggt einmalig pro Konfiguration, wenn die Step-Größe Snapping deaktiviert.
    pub fn warn_if_snapping_disabled(&self) {
        if !self.snapping_enabled() {
            log::warn!(
                "Step-Größe {} ist ungültig, Snapping ist deaktiviert",
                self.step_size
            );
        }
    }

    /// Rastet eine Canvas-Position auf das Step-Raster ein.
    pub fn snap(&self, position: Vec2) -> Vec2 {
        snap_to_step(position, self.step_size)
    }

    /// Versatz eines neu angehängten Shape-Segments (entlang +x).
    pub fn default_segment_offset(&self) -> Vec2 {
        let step = if self.snapping_enabled() {
            self.step_size
        } else {
            STEP_SIZE
        };
        Vec2::new(self.default_segment_length_steps * step, 0.0)
    }

    /// Darstellungsstil der Pathway-Vorschau.
    pub fn pathway_style(&self) -> PathwayStyle {
        PathwayStyle {
            color: self.pathway_color,
            stroke_width: self.pathway_stroke_width,
            dash: Some(self.pathway_dash),
        }
    }
}
