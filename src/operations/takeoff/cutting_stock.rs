use serde::{Deserialize, Serialize};

/// Stock bars sharing one cut list.
///
/// A regular bar has `bars == 1` and holds one or more pieces. A piece longer
/// than a bar is recorded once with the number of whole bars it consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBar {
    /// Lengths cut from this bar, in placement order.
    pub pieces: Vec<f64>,
    /// Usable length left on the bar.
    pub remaining: f64,
    /// Number of purchased bars this entry stands for.
    pub bars: usize,
}

impl StockBar {
    fn open(standard_length: f64, piece: f64) -> Self {
        Self {
            pieces: vec![piece],
            remaining: standard_length - piece,
            bars: 1,
        }
    }

    fn oversize(piece: f64, bars: usize) -> Self {
        Self {
            pieces: vec![piece],
            remaining: 0.0,
            bars,
        }
    }
}

/// Total purchased bars across `plan`.
#[must_use]
pub fn bar_count(plan: &[StockBar]) -> usize {
    plan.iter().fold(0, |n, bar| n.saturating_add(bar.bars))
}

/// Assigns `lengths` to stock bars of `standard_length` with
/// First-Fit-Decreasing.
///
/// Pieces are placed largest first into the first bar with enough remaining
/// length, opening a new bar when none fits. A piece longer than one bar
/// consumes `ceil(length / standard_length)` whole bars and none of their
/// leftover is offered to later pieces. Non-finite lengths are skipped.
#[must_use]
pub fn cut_stock(lengths: &[f64], standard_length: f64) -> Vec<StockBar> {
    let mut sorted: Vec<f64> = lengths
        .iter()
        .copied()
        .filter(|len| {
            let finite = len.is_finite();
            if !finite {
                tracing::warn!(length = *len, "skipping non-finite piece");
            }
            finite
        })
        .collect();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut plan: Vec<StockBar> = Vec::new();
    for len in sorted {
        if len > standard_length {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = (len / standard_length).ceil() as usize;
            tracing::trace!(length = len, bars = count, "oversize piece");
            plan.push(StockBar::oversize(len, count));
            continue;
        }

        if let Some(bar) = plan
            .iter_mut()
            .find(|bar| bar.bars == 1 && bar.remaining >= len)
        {
            bar.remaining -= len;
            bar.pieces.push(len);
        } else {
            tracing::trace!(length = len, "opening stock bar");
            plan.push(StockBar::open(standard_length, len));
        }
    }
    plan
}
