//! Mapping from beat index to staff coordinates.

use thiserror::Error;

use super::canvas::Glyph;
use crate::config::StaffGeometry;
use crate::pitch::Pitch;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("{notes} notes exceed the {capacity}-note capacity of {pages} page(s)")]
    Overflow {
        notes: usize,
        capacity: usize,
        pages: usize,
    },
}

/// Where one beat's glyph goes.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Position in the note sequence.
    pub index: usize,
    pub row: usize,
    pub slot: usize,
    /// Top-left corner of the glyph.
    pub x: f32,
    pub y: f32,
    pub glyph: Glyph,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    /// 1-based page number.
    pub number: usize,
    pub placements: Vec<Placement>,
}

pub struct StaffLayout<'a> {
    geometry: &'a StaffGeometry,
}

impl<'a> StaffLayout<'a> {
    pub fn new(geometry: &'a StaffGeometry) -> Self {
        Self { geometry }
    }

    /// Place entry `index` of the sequence. Rows and slots are page-local.
    pub fn place(&self, index: usize, pitch: &Pitch) -> Placement {
        let g = self.geometry;
        let local = index % g.notes_per_page();
        let row = local / g.beats_per_ledger();
        let slot = local % g.beats_per_ledger();
        let top = g.ledger_top(row);

        let x = slot as f32 * g.beat_space() + g.beat_space() / 2.0 + g.margin_width + g.reserved_space
            - g.note_width / 2.0;

        let (y, glyph) = match *pitch {
            Pitch::Rest => (top + g.note_height / 2.0, Glyph::Rest),
            Pitch::Note { class, octave } => {
                let steps = g.reference_note as f32 - class.index() as f32;
                let glyph = if octave >= g.high_octave {
                    Glyph::HighNotehead
                } else {
                    Glyph::Notehead
                };
                (top + g.half_step() * steps, glyph)
            }
        };

        Placement {
            index,
            row,
            slot,
            x,
            y,
            glyph,
        }
    }

    /// Number of pages `notes` entries fill; an empty sequence still gets a
    /// blank page.
    pub fn page_count(&self, notes: usize) -> usize {
        notes.div_ceil(self.geometry.notes_per_page()).max(1)
    }

    /// Lay the whole sequence out, page by page, in sequence order.
    pub fn layout(&self, notes: &[Pitch], max_pages: Option<usize>) -> Result<Vec<PageLayout>, LayoutError> {
        let per_page = self.geometry.notes_per_page();
        let pages = self.page_count(notes.len());

        if let Some(limit) = max_pages {
            if pages > limit {
                return Err(LayoutError::Overflow {
                    notes: notes.len(),
                    capacity: limit * per_page,
                    pages: limit,
                });
            }
        }

        let mut layout: Vec<PageLayout> = (1..=pages)
            .map(|number| PageLayout {
                number,
                placements: Vec::new(),
            })
            .collect();
        for (index, pitch) in notes.iter().enumerate() {
            layout[index / per_page].placements.push(self.place(index, pitch));
        }
        Ok(layout)
    }
}
