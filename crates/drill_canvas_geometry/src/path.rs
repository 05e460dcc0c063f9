//! SVG-artige Pfad-Kommandos und das `ShapePath`-Modell.
//!
//! Ein Pfad ist eine Folge von Kommandos; Element 0 ist immer `Move` und legt
//! den Anker fest. Jedes weitere Element ist ein Segment mit
//! kommando-spezifischer Anzahl an Kontrollpunkten plus Endpunkt.

use crate::error::{PathParseError, SegmentEditError};
use crate::sampling::{cubic_bezier, quadratic_bezier};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Abtastpunkte pro Kurven-Segment beim Abflachen in eine Polyline.
pub const CURVE_SAMPLES: usize = 32;

/// Absolutes SVG-Pfad-Kommando.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SvgCommand {
    /// `M`: Anker des Pfads
    Move,
    /// `L`: gerade Linie
    Line,
    /// `Q`: quadratische Bézier-Kurve
    Quadratic,
    /// `T`: quadratische Kurve mit gespiegeltem Kontrollpunkt
    SmoothQuadratic,
    /// `C`: kubische Bézier-Kurve
    Cubic,
    /// `S`: kubische Kurve mit gespiegeltem ersten Kontrollpunkt
    SmoothCubic,
}

impl SvgCommand {
    /// Alle Kommandos, die als Segment (Index > 0) waehlbar sind.
    pub const SEGMENTS: [SvgCommand; 5] = [
        SvgCommand::Line,
        SvgCommand::Quadratic,
        SvgCommand::SmoothQuadratic,
        SvgCommand::Cubic,
        SvgCommand::SmoothCubic,
    ];

    /// Anzahl der Kontrollpunkte vor dem Endpunkt.
    pub fn control_count(self) -> usize {
        match self {
            SvgCommand::Move | SvgCommand::Line | SvgCommand::SmoothQuadratic => 0,
            SvgCommand::Quadratic | SvgCommand::SmoothCubic => 1,
            SvgCommand::Cubic => 2,
        }
    }

    /// Gesamtzahl der Punkte (Kontrollpunkte + Endpunkt).
    pub fn point_count(self) -> usize {
        self.control_count() + 1
    }

    /// SVG-Buchstabe (absolut).
    pub fn letter(self) -> char {
        match self {
            SvgCommand::Move => 'M',
            SvgCommand::Line => 'L',
            SvgCommand::Quadratic => 'Q',
            SvgCommand::SmoothQuadratic => 'T',
            SvgCommand::Cubic => 'C',
            SvgCommand::SmoothCubic => 'S',
        }
    }

    /// Kommando zu einem SVG-Buchstaben (nur absolute Grossbuchstaben).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(SvgCommand::Move),
            'L' => Some(SvgCommand::Line),
            'Q' => Some(SvgCommand::Quadratic),
            'T' => Some(SvgCommand::SmoothQuadratic),
            'C' => Some(SvgCommand::Cubic),
            'S' => Some(SvgCommand::SmoothCubic),
            _ => None,
        }
    }

    /// Spiegelt das Kommando einen Kontrollpunkt des Vorgaengers?
    pub fn is_smooth(self) -> bool {
        matches!(self, SvgCommand::SmoothQuadratic | SvgCommand::SmoothCubic)
    }

    /// Ist das Kommando an Position `index` eines Pfads zulaessig?
    ///
    /// Index 0 ist fest `Move`. Index 1 hat keinen Kurven-Vorgaenger,
    /// daher sind dort keine Smooth-Kommandos erlaubt.
    pub fn allowed_at(self, index: usize) -> bool {
        match index {
            0 => self == SvgCommand::Move,
            1 => self != SvgCommand::Move && !self.is_smooth(),
            _ => self != SvgCommand::Move,
        }
    }
}

/// Ein Pfad-Element: Kommando, Kontrollpunkte und Endpunkt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// SVG-Kommando
    pub command: SvgCommand,
    /// Kontrollpunkte (Anzahl = `command.control_count()`)
    pub(crate) controls: Vec<Vec2>,
    /// Endpunkt des Segments (bei `Move`: der Anker)
    pub end: Vec2,
}

impl PathSegment {
    /// Erstellt ein Segment und prueft die Kontrollpunkt-Anzahl.
    pub fn new(
        command: SvgCommand,
        controls: Vec<Vec2>,
        end: Vec2,
    ) -> Result<Self, SegmentEditError> {
        if controls.len() != command.control_count() {
            return Err(SegmentEditError::ArityMismatch {
                command,
                expected: command.control_count(),
                found: controls.len(),
            });
        }
        Ok(Self {
            command,
            controls,
            end,
        })
    }

    /// `M`-Element am gegebenen Anker.
    pub fn move_to(anchor: Vec2) -> Self {
        Self {
            command: SvgCommand::Move,
            controls: Vec::new(),
            end: anchor,
        }
    }

    /// Gerade Linie zum Endpunkt.
    pub fn line_to(end: Vec2) -> Self {
        Self {
            command: SvgCommand::Line,
            controls: Vec::new(),
            end,
        }
    }

    /// Kontrollpunkte des Segments.
    pub fn controls(&self) -> &[Vec2] {
        &self.controls
    }

    /// Alle Punkte in SVG-Reihenfolge (Kontrollpunkte, dann Endpunkt).
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.controls.iter().copied().chain(std::iter::once(self.end))
    }

    fn control_or(&self, index: usize, fallback: Vec2) -> Vec2 {
        self.controls.get(index).copied().unwrap_or(fallback)
    }
}

/// Pfad einer ShapePage. Beginnt immer mit genau einem `Move`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathSegment>", into = "Vec<PathSegment>")]
pub struct ShapePath {
    pub(crate) segments: Vec<PathSegment>,
}

impl ShapePath {
    /// Minimaler Pfad: nur der Anker.
    pub fn new(anchor: Vec2) -> Self {
        Self {
            segments: vec![PathSegment::move_to(anchor)],
        }
    }

    /// Offener Polygonzug durch alle Punkte (erster Punkt = Anker).
    ///
    /// Gibt `None` zurueck wenn `points` leer ist.
    pub fn polyline(points: &[Vec2]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut path = Self::new(first);
        path.segments
            .extend(rest.iter().map(|&p| PathSegment::line_to(p)));
        Some(path)
    }

    /// Baut einen Pfad aus fertigen Elementen und prueft alle Invarianten.
    pub fn from_segments(segments: Vec<PathSegment>) -> Result<Self, SegmentEditError> {
        if segments.is_empty() {
            return Err(SegmentEditError::CommandNotAllowed {
                command: SvgCommand::Line,
                index: 0,
            });
        }
        for (index, segment) in segments.iter().enumerate() {
            if !segment.command.allowed_at(index) {
                return Err(SegmentEditError::CommandNotAllowed {
                    command: segment.command,
                    index,
                });
            }
            if segment.controls.len() != segment.command.control_count() {
                return Err(SegmentEditError::ArityMismatch {
                    command: segment.command,
                    expected: segment.command.control_count(),
                    found: segment.controls.len(),
                });
            }
        }
        Ok(Self { segments })
    }

    /// Alle Elemente inkl. fuehrendem `Move`.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Anzahl der Elemente inkl. `Move` (immer >= 1).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Immer `false`: der Anker ist Teil des Pfads.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Anzahl der bearbeitbaren Segmente (ohne `Move`).
    pub fn segment_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Anker des Pfads.
    pub fn start(&self) -> Vec2 {
        self.segments.first().map_or(Vec2::ZERO, |s| s.end)
    }

    /// Endpunkt des letzten Elements.
    pub fn end(&self) -> Vec2 {
        self.segments.last().map_or(Vec2::ZERO, |s| s.end)
    }

    /// Startpunkt des Segments an `index` (= Endpunkt des Vorgaengers).
    pub fn segment_start(&self, index: usize) -> Option<Vec2> {
        let previous = index.checked_sub(1)?;
        self.segments.get(previous).map(|s| s.end)
    }

    /// Flacht den Pfad in eine Polyline ab. Kurven werden mit
    /// `samples_per_curve` Punkten abgetastet, Linien exakt uebernommen.
    pub fn flatten(&self, samples_per_curve: usize) -> Vec<Vec2> {
        let samples = samples_per_curve.max(1);
        let mut points = Vec::with_capacity(self.segments.len() * samples);
        let mut current = self.start();
        let mut last_quad_control: Option<Vec2> = None;
        let mut last_cubic_control: Option<Vec2> = None;
        points.push(current);

        for segment in self.segments.iter().skip(1) {
            let end = segment.end;
            match segment.command {
                SvgCommand::Move | SvgCommand::Line => {
                    points.push(end);
                    last_quad_control = None;
                    last_cubic_control = None;
                }
                SvgCommand::Quadratic | SvgCommand::SmoothQuadratic => {
                    let control = if segment.command == SvgCommand::Quadratic {
                        segment.control_or(0, current)
                    } else {
                        last_quad_control.map_or(current, |c| 2.0 * current - c)
                    };
                    let start = current;
                    points.extend((1..=samples).map(|i| {
                        quadratic_bezier(start, control, end, i as f32 / samples as f32)
                    }));
                    last_quad_control = Some(control);
                    last_cubic_control = None;
                }
                SvgCommand::Cubic | SvgCommand::SmoothCubic => {
                    let (c1, c2) = if segment.command == SvgCommand::Cubic {
                        (segment.control_or(0, current), segment.control_or(1, end))
                    } else {
                        (
                            last_cubic_control.map_or(current, |c| 2.0 * current - c),
                            segment.control_or(0, end),
                        )
                    };
                    let start = current;
                    points.extend((1..=samples).map(|i| {
                        cubic_bezier(start, c1, c2, end, i as f32 / samples as f32)
                    }));
                    last_cubic_control = Some(c2);
                    last_quad_control = None;
                }
            }
            current = end;
        }

        points
    }

    /// Serialisiert den Pfad als SVG-`d`-Attribut (absolute Kommandos).
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push(segment.command.letter());
            for point in segment.points() {
                let _ = write!(out, " {} {}", point.x, point.y);
            }
        }
        out
    }

    /// Liest einen SVG-`d`-String mit absoluten Kommandos (M, L, Q, T, C, S).
    ///
    /// Wiederholte Koordinaten-Gruppen ohne neuen Buchstaben wiederholen das
    /// letzte Kommando (nach `M` als `L`).
    pub fn parse_svg(input: &str) -> Result<Self, PathParseError> {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return Err(PathParseError::Empty);
        }

        let mut segments = Vec::new();
        let mut cursor = 0;
        let mut command: Option<SvgCommand> = None;

        while cursor < tokens.len() {
            if let Token::Command(letter) = tokens[cursor] {
                command = Some(SvgCommand::from_letter(letter).ok_or(PathParseError::UnknownCommand(letter))?);
                cursor += 1;
            } else if command == Some(SvgCommand::Move) && !segments.is_empty() {
                command = Some(SvgCommand::Line);
            }

            let Some(current) = command else {
                return Err(PathParseError::UnknownCommand(' '));
            };

            let expected = current.point_count() * 2;
            let mut values = Vec::with_capacity(expected);
            while values.len() < expected {
                match tokens.get(cursor) {
                    Some(Token::Number(raw)) => {
                        let value: f32 = raw
                            .parse()
                            .map_err(|_| PathParseError::InvalidNumber(raw.clone()))?;
                        values.push(value);
                        cursor += 1;
                    }
                    _ => {
                        return Err(PathParseError::MissingCoordinates {
                            command: current.letter(),
                            expected,
                        });
                    }
                }
            }

            let mut points: Vec<Vec2> = values
                .chunks_exact(2)
                .map(|pair| Vec2::new(pair[0], pair[1]))
                .collect();
            let end = points.pop().unwrap_or(Vec2::ZERO);
            segments.push(PathSegment::new(current, points, end)?);
        }

        Ok(Self::from_segments(segments)?)
    }
}

impl TryFrom<Vec<PathSegment>> for ShapePath {
    type Error = SegmentEditError;

    fn try_from(segments: Vec<PathSegment>) -> Result<Self, Self::Error> {
        Self::from_segments(segments)
    }
}

impl From<ShapePath> for Vec<PathSegment> {
    fn from(path: ShapePath) -> Self {
        path.segments
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(String),
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut number = String::new();

    let flush = |number: &mut String, tokens: &mut Vec<Token>| {
        if !number.is_empty() {
            tokens.push(Token::Number(std::mem::take(number)));
        }
    };

    for ch in input.chars() {
        if ch.is_ascii_alphabetic() && ch != 'e' && ch != 'E' {
            flush(&mut number, &mut tokens);
            tokens.push(Token::Command(ch));
        } else if ch.is_whitespace() || ch == ',' {
            flush(&mut number, &mut tokens);
        } else if ch == '-' && !number.is_empty() && !number.ends_with(['e', 'E']) {
            flush(&mut number, &mut tokens);
            number.push(ch);
        } else {
            number.push(ch);
        }
    }
    flush(&mut number, &mut tokens);
    tokens
}
