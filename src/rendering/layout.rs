//! Canvas and card-grid geometry for a resolved layout

use crate::config::ResolvedLayout;
use serde::Serialize;

/// Pixel geometry shared by every section of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    pub canvas_width: u64,
    pub padding: u32,
    pub grid_columns: u32,
    pub card_width_px: u32,
    /// Minimum card height; content may grow a card past it
    pub card_min_height_px: u32,
    pub gap_px: u32,
}

/// Derive canvas width and grid placement from the layout settings.
///
/// `canvas_width = 2*padding + items_per_row*card_width + (items_per_row-1)*spacing`,
/// computed in `u64`. Only `card_width` and `spacing` both near `u32::MAX`
/// can exceed that range, and the width then caps at `u64::MAX`.
pub fn compute_geometry(layout: &ResolvedLayout) -> Geometry {
    let columns = layout.items_per_row.max(1);
    let wide = |v: u32| u64::from(v);
    let canvas_width = wide(layout.padding)
        .saturating_mul(2)
        .saturating_add(wide(columns).saturating_mul(wide(layout.card_width)))
        .saturating_add(wide(columns - 1).saturating_mul(wide(layout.spacing)));

    Geometry {
        canvas_width,
        padding: layout.padding,
        grid_columns: columns,
        card_width_px: layout.card_width,
        card_min_height_px: layout.card_height,
        gap_px: layout.spacing,
    }
}

impl Geometry {
    /// Rows needed for `items` cards
    pub fn row_count(&self, items: usize) -> u32 {
        let items = u32::try_from(items).unwrap_or(u32::MAX);
        items.div_ceil(self.grid_columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(items_per_row: u32, card_width: u32, padding: u32, spacing: u32) -> ResolvedLayout {
        ResolvedLayout {
            items_per_row,
            card_width,
            card_height: 80,
            padding,
            spacing,
        }
    }

    #[test]
    fn canvas_width_matches_formula() {
        assert_eq!(compute_geometry(&layout(3, 200, 20, 15)).canvas_width, 670);
        assert_eq!(compute_geometry(&layout(1, 300, 0, 50)).canvas_width, 300);
        assert_eq!(compute_geometry(&layout(4, 150, 10, 0)).canvas_width, 620);
    }

    #[test]
    fn huge_cards_widen_past_u32() {
        let g = compute_geometry(&layout(3, 2_000_000_000, 20, 15));
        assert_eq!(g.canvas_width, 6_000_000_070);

        let g = compute_geometry(&layout(u32::MAX, u32::MAX, u32::MAX, u32::MAX));
        assert_eq!(g.canvas_width, u64::MAX);
    }

    #[test]
    fn grid_follows_items_per_row() {
        let g = compute_geometry(&layout(3, 200, 20, 15));
        assert_eq!(g.grid_columns, 3);
        assert_eq!(g.card_width_px, 200);
        assert_eq!(g.card_min_height_px, 80);
        assert_eq!(g.gap_px, 15);
    }

    #[test]
    fn rows_round_up() {
        let g = compute_geometry(&layout(3, 200, 20, 15));
        assert_eq!(g.row_count(0), 0);
        assert_eq!(g.row_count(3), 1);
        assert_eq!(g.row_count(4), 2);
    }
}
