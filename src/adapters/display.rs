//! Log-backed presenter.
//!
//! Implements [`DrawSurface`] by describing each redraw on the serial
//! console.  Pixel rendering for the TFT panel lives outside this crate;
//! this adapter keeps the redraw stream observable on the bench and
//! counts full vs. partial repaints.

use log::{debug, info};

use crate::app::model::Page;
use crate::app::ports::{DrawSurface, PageView, Region};

#[derive(Debug, Default)]
pub struct LogDisplay {
    full_draws: usize,
    partial_draws: usize,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_draws(&self) -> usize {
        self.full_draws
    }

    pub fn partial_draws(&self) -> usize {
        self.partial_draws
    }
}

fn armed_mask(boxes: &[bool]) -> u8 {
    boxes
        .iter()
        .enumerate()
        .fold(0u8, |acc, (i, &on)| if on { acc | (1 << i) } else { acc })
}

impl DrawSurface for LogDisplay {
    fn draw_full_page(&mut self, view: &PageView) {
        self.full_draws += 1;
        match view.page {
            Page::Indicator => info!(
                "DRAW  | indicator gear={} outputs=0b{:08b}",
                view.gear,
                armed_mask(&view.checkboxes)
            ),
            page => info!(
                "DRAW  | {:?} armed=0b{:08b} sel={}",
                page,
                armed_mask(&view.checkboxes),
                view.selection.map_or(0, |c| c.get() + 1)
            ),
        }
        if let Some(a) = view.advisory {
            info!("DRAW  | banner \"{}\"", a.text());
        }
    }

    fn draw_partial(&mut self, region: Region) {
        self.partial_draws += 1;
        match region {
            Region::GearGlyph(gear) => debug!("DRAW  | gear glyph {}", gear),
            Region::Checkbox {
                index,
                armed,
                highlighted,
            } => debug!(
                "DRAW  | box {} [{}]{}",
                index.get() + 1,
                if armed { 'x' } else { ' ' },
                if highlighted { " <" } else { "" }
            ),
            Region::Advisory(Some(a)) => info!("DRAW  | banner \"{}\"", a.text()),
            Region::Advisory(None) => debug!("DRAW  | banner cleared"),
        }
    }
}
