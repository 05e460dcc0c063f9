//! Segment-Editor fuer `ShapePath`.
//!
//! Alle Operationen pruefen vollstaendig, bevor sie den Pfad veraendern.
//! Ein abgelehnter Aufruf laesst den Pfad bitgenau unveraendert.

use crate::error::SegmentEditError;
use crate::path::{PathSegment, ShapePath, SvgCommand};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Referenz auf einen Punkt innerhalb eines Segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointRef {
    /// Kontrollpunkt mit Index (0-basiert)
    Control(usize),
    /// Endpunkt des Segments
    End,
}

impl ShapePath {
    /// Haengt ein fertiges Segment an.
    pub fn push_segment(&mut self, segment: PathSegment) -> Result<usize, SegmentEditError> {
        let index = self.segments.len();
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
        self.segments.push(segment);
        Ok(index)
    }

    /// Haengt eine Linie an, deren Endpunkt um `offset` vom bisherigen
    /// Pfadende verschoben ist. Gibt den Index des neuen Segments zurueck.
    pub fn append_default_segment(&mut self, offset: Vec2) -> usize {
        let end = self.end() + offset;
        self.segments.push(PathSegment::line_to(end));
        self.segments.len() - 1
    }

    /// Entfernt ein Segment (Standard: das letzte).
    ///
    /// Abgelehnt werden das fuehrende `Move`, Indizes ausserhalb des Pfads
    /// und Loeschungen, durch die ein Smooth-Kommando an Index 1 rutschen wuerde.
    pub fn delete_segment(&mut self, index: Option<usize>) -> Result<PathSegment, SegmentEditError> {
        let len = self.segments.len();
        let index = index.unwrap_or(len.saturating_sub(1));

        if index == 0 {
            return Err(SegmentEditError::RemoveLeadingMove);
        }
        if index >= len {
            return Err(SegmentEditError::IndexOutOfRange { index, len });
        }
        if index == 1
            && let Some(next) = self.segments.get(2)
            && !next.command.allowed_at(1)
        {
            return Err(SegmentEditError::CommandNotAllowed {
                command: next.command,
                index: 1,
            });
        }

        Ok(self.segments.remove(index))
    }

    /// Wechselt den Kommando-Typ eines Segments.
    ///
    /// Der Endpunkt bleibt erhalten. Bei weniger Kontrollpunkten werden die
    /// ueberzaehligen verworfen, bei mehr werden neue gleichmaessig zwischen
    /// Segment-Start und Endpunkt eingefuegt.
    pub fn update_segment(
        &mut self,
        index: usize,
        command: SvgCommand,
    ) -> Result<(), SegmentEditError> {
        let len = self.segments.len();
        if index >= len {
            return Err(SegmentEditError::IndexOutOfRange { index, len });
        }
        if index == 0 || !command.allowed_at(index) {
            return Err(SegmentEditError::CommandNotAllowed { command, index });
        }

        let start = self.segment_start(index).unwrap_or(Vec2::ZERO);
        let segment = &mut self.segments[index];
        let target = command.control_count();

        if segment.controls.len() > target {
            segment.controls.truncate(target);
        } else {
            let end = segment.end;
            for j in segment.controls.len()..target {
                let t = (j + 1) as f32 / (target + 1) as f32;
                segment.controls.push(start.lerp(end, t));
            }
        }
        segment.command = command;
        Ok(())
    }

    /// Setzt einen Punkt eines Segments (z.B. nach Drag eines Kontrollpunkts).
    pub fn set_point(
        &mut self,
        segment: usize,
        point: PointRef,
        position: Vec2,
    ) -> Result<(), SegmentEditError> {
        let len = self.segments.len();
        let target = self
            .segments
            .get_mut(segment)
            .ok_or(SegmentEditError::IndexOutOfRange {
                index: segment,
                len,
            })?;

        match point {
            PointRef::End => target.end = position,
            PointRef::Control(i) => {
                let slot = target
                    .controls
                    .get_mut(i)
                    .ok_or(SegmentEditError::PointOutOfRange { segment, point: i })?;
                *slot = position;
            }
        }
        Ok(())
    }

    /// Liest einen Punkt eines Segments.
    pub fn point(&self, segment: usize, point: PointRef) -> Option<Vec2> {
        let target = self.segments.get(segment)?;
        match point {
            PointRef::End => Some(target.end),
            PointRef::Control(i) => target.controls.get(i).copied(),
        }
    }
}
