use super::{Axis, Band, OccupantAllocation, Rect};

/// Fraction of `total_area` requested by `size`, saturated to `[0, 1]`.
///
/// Non-positive or NaN sizes and totals give 0.
pub fn share(size: f64, total_area: f64) -> f64 {
    if total_area > 0.0 && size > 0.0 {
        (size / total_area).min(1.0)
    } else {
        0.0
    }
}

/// Slice `rect` into one band per allocation along `axis`.
///
/// Each band's extent along the axis is its occupant's share of `total_area`
/// (see [`share`]). Bands are placed in input order with no gaps. When the
/// shares add up to more than 1 the trailing bands extend past the far edge
/// of `rect`; nothing is rescaled or dropped.
pub fn subdivide<K: Clone>(
    rect: Rect,
    allocations: &[OccupantAllocation<K>],
    axis: Axis,
    total_area: f64,
) -> Vec<Band<K>> {
    let mut bands = Vec::with_capacity(allocations.len());
    let mut offset = 0.0;

    for alloc in allocations {
        let ratio = share(alloc.size, total_area);

        let candidate = match axis {
            Axis::Horizontal => Rect {
                x: rect.x,
                y: rect.y + offset * rect.h,
                w: rect.w,
                h: ratio * rect.h,
            },
            Axis::Vertical => Rect {
                x: rect.x + offset * rect.w,
                y: rect.y,
                w: ratio * rect.w,
                h: rect.h,
            },
        };
        offset += ratio;

        bands.push(Band {
            occupant: alloc.occupant.clone(),
            ratio,
            rect: candidate.is_drawable().then_some(candidate),
        });
    }

    if offset > 1.0 + 1e-9 {
        tracing::debug!(
            "Subdivide: shares sum to {:.3} of the bounding rect, trailing bands overflow",
            offset
        );
    }

    bands
}
