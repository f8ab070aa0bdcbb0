use std::ops::Deref;

use super::metadata::Color;
use crate::builder::Symbol;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        debug_assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Mask predicates in (row, column) order; true means flip
mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid masking pattern"),
        }
    }
}

// Mask evaluation
//------------------------------------------------------------------------------

/// Scores all eight masks on a clone of the symbol and applies the winner.
/// Ties go to the lowest pattern id because `min_by_key` keeps the first
/// minimum it sees.
pub fn apply_best_mask(symbol: &mut Symbol) -> MaskPattern {
    let best_mask = (0..8)
        .min_by_key(|m| {
            let mut candidate = symbol.clone();
            candidate.apply_mask(MaskPattern(*m));
            compute_total_penalty(&candidate)
        })
        .expect("Should return atleast 1 mask");
    let best_mask = MaskPattern(best_mask);
    symbol.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(symbol: &Symbol) -> u32 {
    let run_pen = compute_run_penalty(symbol);
    let blk_pen = compute_block_penalty(symbol);
    let fp_pen_h = compute_finder_pattern_penalty(symbol, true);
    let fp_pen_v = compute_finder_pattern_penalty(symbol, false);
    let bal_pen = compute_balance_penalty(symbol);
    run_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Runs of 5 same-colored modules cost 3, every extra module 1 more. Rows
// and columns are scored in a single sweep.
fn compute_run_penalty(symbol: &Symbol) -> u32 {
    let mut pen = 0;
    let w = symbol.width();
    let mut cols = vec![(Color::Dark, 0u32); w];
    for r in 0..w {
        let mut row_last = Color::Dark;
        let mut row_run = 0u32;
        for (c, col) in cols.iter_mut().enumerate() {
            let clr = *symbol.get(r as i16, c as i16);
            if row_last != clr {
                row_last = clr;
                row_run = 0;
            }
            row_run += 1;
            match row_run {
                5 => pen += 3,
                6.. => pen += 1,
                _ => (),
            }
            if col.0 != clr {
                col.0 = clr;
                col.1 = 0;
            }
            col.1 += 1;
            match col.1 {
                5 => pen += 3,
                6.. => pen += 1,
                _ => (),
            }
        }
    }
    pen
}

// Every 2x2 block of one color costs 3; overlapping blocks all count
fn compute_block_penalty(symbol: &Symbol) -> u32 {
    let mut pen = 0;
    let w = symbol.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *symbol.get(r, c);
            if clr == *symbol.get(r + 1, c)
                && clr == *symbol.get(r, c + 1)
                && clr == *symbol.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// 1:1:3:1:1 finder-like run with 4 light modules on one side
static FINDER_RUN: [Color; 11] = [
    Color::Dark,
    Color::Light,
    Color::Dark,
    Color::Dark,
    Color::Dark,
    Color::Light,
    Color::Dark,
    Color::Light,
    Color::Light,
    Color::Light,
    Color::Light,
];

fn compute_finder_pattern_penalty(symbol: &Symbol, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = symbol.width() as i16;
    for i in 0..w {
        for j in 0..=w - 11 {
            let window = (j..j + 11).map(|k| {
                if is_hor {
                    *symbol.get(i, k)
                } else {
                    *symbol.get(k, i)
                }
            });
            let fwd = window.clone().eq(FINDER_RUN.iter().copied());
            let rev = window.eq(FINDER_RUN.iter().rev().copied());
            if fwd {
                pen += 40;
            }
            if rev {
                pen += 40;
            }
        }
    }
    pen
}

// 10 points for every full 5% the dark share strays from an even split
fn compute_balance_penalty(symbol: &Symbol) -> u32 {
    let dark_cnt = symbol.count_dark_modules();
    let w = symbol.width();
    let percent = dark_cnt * 100 / (w * w);
    (percent.abs_diff(50) / 5 * 10) as u32
}
