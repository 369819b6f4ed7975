mod cutting_stock;
mod flange;

pub use cutting_stock::{bar_count, cut_stock, StockBar};
pub use flange::{flange_spec, BoltSize, FlangeSpec};

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::TakeoffConfig;
use crate::part::{Diameter, DuctPart};

/// Flanges credited to every part, whatever its connector count.
pub const FLANGES_PER_PART: u32 = 2;

/// Bill of materials derived from a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TakeoffResult {
    /// Stock bars to purchase, per diameter.
    pub straight_stock: BTreeMap<Diameter, usize>,
    /// The cut list behind each stock count.
    pub cutting_plans: BTreeMap<Diameter, Vec<StockBar>>,
    /// Flanges per diameter.
    pub flange_counts: BTreeMap<Diameter, u32>,
    /// Bolts split by size; sums to [`TakeoffResult::total_bolts`].
    pub bolts_by_size: BTreeMap<BoltSize, u32>,
    pub total_bolts: u32,
    /// Gasket length in whole metres, rounded up.
    pub total_gasket_length_m: u32,
}

impl TakeoffResult {
    /// Returns whether the result lists no material at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.straight_stock.is_empty() && self.flange_counts.is_empty()
    }
}

/// Computes the material takeoff of a part set.
///
/// Straight lengths are grouped by diameter and cut from stock bars with
/// First-Fit-Decreasing. Every part is credited [`FLANGES_PER_PART`] flanges
/// (one joint) at its primary diameter, with bolts and gasket sized by
/// [`flange_spec`]. The result depends only on the multiset of parts, not on
/// their order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Takeoff {
    config: TakeoffConfig,
}

impl Takeoff {
    /// Creates a new `Takeoff` operation.
    #[must_use]
    pub fn new(config: TakeoffConfig) -> Self {
        Self { config }
    }

    /// Executes the takeoff over `parts`.
    pub fn execute<'a, I>(&self, parts: I) -> TakeoffResult
    where
        I: IntoIterator<Item = &'a DuctPart>,
    {
        let mut result = TakeoffResult::default();
        let mut straights: BTreeMap<Diameter, Vec<f64>> = BTreeMap::new();
        let mut gasket_mm = 0.0;

        for part in parts {
            let d = part.diameter;
            match part.straight_length() {
                Some(length) if !length.is_finite() => {
                    tracing::warn!(part = ?part.id, length, "straight with non-finite length");
                }
                Some(length) if length > 0.0 => straights.entry(d).or_default().push(length),
                _ => {}
            }

            let spec = flange_spec(d);
            let joints = FLANGES_PER_PART / 2;
            *result.flange_counts.entry(d).or_insert(0) += FLANGES_PER_PART;
            let bolts = joints * spec.hole_count;
            result.total_bolts += bolts;
            *result.bolts_by_size.entry(spec.bolt_size).or_insert(0) += bolts;
            gasket_mm += f64::from(d) * PI * f64::from(joints);
        }

        for (d, lengths) in straights {
            let bars = cut_stock(&lengths, self.config.standard_length);
            result.straight_stock.insert(d, bar_count(&bars));
            result.cutting_plans.insert(d, bars);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let gasket_m = (gasket_mm / 1000.0).ceil() as u32;
        result.total_gasket_length_m = gasket_m;

        tracing::debug!(
            diameters = result.straight_stock.len(),
            bolts = result.total_bolts,
            gasket_m = result.total_gasket_length_m,
            "takeoff computed"
        );
        result
    }
}

/// Computes the takeoff with the default 4000 mm stock length.
pub fn compute_takeoff<'a, I>(parts: I) -> TakeoffResult
where
    I: IntoIterator<Item = &'a DuctPart>,
{
    Takeoff::default().execute(parts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::part::{PartStore, PartTemplate};

    fn parts(templates: Vec<PartTemplate>) -> Vec<DuctPart> {
        let mut store = PartStore::new();
        for t in templates {
            store.add(t);
        }
        store.iter().cloned().collect()
    }

    #[test]
    fn empty_layout_gives_empty_result() {
        let result = compute_takeoff(&Vec::<DuctPart>::new());
        assert_eq!(result, TakeoffResult::default());
        assert!(result.is_empty());
        assert_eq!(result.total_bolts, 0);
        assert_eq!(result.total_gasket_length_m, 0);
    }

    #[test]
    fn three_straights_fit_two_bars() {
        let layout = parts(vec![
            PartTemplate::straight(200, 2500.0),
            PartTemplate::straight(200, 2000.0),
            PartTemplate::straight(200, 1500.0),
        ]);
        let result = compute_takeoff(&layout);
        assert_eq!(result.straight_stock[&200], 2);
    }

    #[test]
    fn oversize_straight_takes_three_bars() {
        let layout = parts(vec![PartTemplate::straight(150, 9000.0)]);
        assert_eq!(compute_takeoff(&layout).straight_stock[&150], 3);
    }

    #[test]
    fn single_straight_ancillaries() {
        let layout = parts(vec![PartTemplate::straight(150, 1000.0)]);
        let result = compute_takeoff(&layout);
        assert_eq!(result.flange_counts[&150], 2);
        assert_eq!(result.total_bolts, 6);
        assert_eq!(result.bolts_by_size[&BoltSize::M8], 6);
        assert_eq!(result.total_gasket_length_m, 1);
    }

    #[test]
    fn order_does_not_change_stock() {
        let mut layout = parts(vec![
            PartTemplate::straight(200, 1200.0),
            PartTemplate::straight(200, 3100.0),
            PartTemplate::straight(150, 800.0),
            PartTemplate::straight(200, 2700.0),
            PartTemplate::straight(200, 900.0),
            PartTemplate::elbow90(200),
        ]);
        let forward = compute_takeoff(&layout);
        layout.reverse();
        let backward = compute_takeoff(&layout);
        assert_eq!(forward, backward);
        assert_eq!(forward, compute_takeoff(&layout));
    }

    #[test]
    fn fittings_count_flanges_but_not_stock() {
        let layout = parts(vec![
            PartTemplate::tee(250),
            PartTemplate::cap(600),
            PartTemplate::reducer(400, 350),
        ]);
        let result = compute_takeoff(&layout);
        assert!(result.straight_stock.is_empty());
        assert_eq!(result.flange_counts[&250], 2);
        assert_eq!(result.flange_counts[&600], 2);
        assert_eq!(result.flange_counts[&400], 2);
        assert_eq!(result.total_bolts, 8 + 16 + 12);
        assert_eq!(result.bolts_by_size[&BoltSize::M10], 28);
        // (250 + 600 + 400) * pi = 3927 mm
        assert_eq!(result.total_gasket_length_m, 4);
    }

    #[test]
    fn infinite_straight_is_skipped() {
        let layout = parts(vec![
            PartTemplate::straight(200, f64::INFINITY),
            PartTemplate::straight(200, 1000.0),
        ]);
        let result = compute_takeoff(&layout);
        assert_eq!(result.straight_stock[&200], 1);
        assert_eq!(result.flange_counts[&200], 4);
    }

    #[test]
    fn very_long_straight_is_counted_not_enumerated() {
        let layout = parts(vec![PartTemplate::straight(200, 4.0e10)]);
        let result = compute_takeoff(&layout);
        assert_eq!(result.straight_stock[&200], 10_000_000);
        assert_eq!(result.cutting_plans[&200].len(), 1);
    }

    #[test]
    fn zero_length_straight_needs_no_stock() {
        let layout = parts(vec![PartTemplate::straight(100, 0.0)]);
        let result = compute_takeoff(&layout);
        assert!(result.straight_stock.is_empty());
        assert_eq!(result.flange_counts[&100], 2);
    }

    #[test]
    fn custom_standard_length() {
        let layout = parts(vec![
            PartTemplate::straight(200, 2500.0),
            PartTemplate::straight(200, 2500.0),
        ]);
        let result = Takeoff::new(TakeoffConfig {
            standard_length: 5000.0,
        })
        .execute(&layout);
        assert_eq!(result.straight_stock[&200], 1);
    }
}
