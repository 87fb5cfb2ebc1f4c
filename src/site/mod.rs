pub mod file;
pub mod ids;
pub mod parse;

use compact_str::CompactString;

use self::ids::{IdSequence, ParcelId, TenantId};
use crate::geo::{self, GeoPoint, PlanarPoint, Ring};
use crate::layout::{self, Axis, Band, OccupantAllocation, Rect};

pub use self::parse::parse_size;

/// A tenant occupying part of a parcel.
#[derive(Debug, Clone)]
pub struct Tenant {
    pub id: TenantId,
    pub name: CompactString,
    /// Size as typed by the user. Parsed on demand with [`parse_size`].
    pub size_input: CompactString,
}

impl Tenant {
    pub fn size_sq_ft(&self) -> f64 {
        parse_size(&self.size_input)
    }
}

/// A drawn polygon with its address and tenant list.
#[derive(Debug, Clone)]
pub struct Parcel {
    pub id: ParcelId,
    pub name: CompactString,
    pub address: Option<String>,
    pub ring: Ring,
    pub axis: Axis,
    /// Tenants in display order; the order decides band placement.
    pub tenants: Vec<Tenant>,
}

impl Parcel {
    pub fn area_sq_ft(&self) -> f64 {
        geo::estimate_area_sq_ft(&self.ring)
    }

    /// Vertex-mean of the ring, used as the point to reverse-geocode.
    pub fn centroid(&self) -> Option<GeoPoint> {
        geo::reference_point(&self.ring)
    }

    pub fn allocations(&self) -> Vec<OccupantAllocation<TenantId>> {
        self.tenants
            .iter()
            .map(|t| OccupantAllocation::new(t.id, t.size_sq_ft()))
            .collect()
    }

    pub fn tenant(&self, id: TenantId) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    /// Run one rendering pass: area, projected outline, bounds and bands.
    pub fn preview(&self, viewport_px: f64, margin_px: f64) -> Preview {
        let area_sq_ft = self.area_sq_ft();
        let outline = layout::ring_to_viewport(&self.ring, margin_px, viewport_px);
        let bounds = layout::bounding_rect(&outline);
        let allocations = self.allocations();
        let allocated_sq_ft: f64 = allocations.iter().map(|a| a.size.max(0.0)).sum();
        let bands = layout::subdivide(bounds, &allocations, self.axis, area_sq_ft);

        let preview = Preview {
            viewport_px,
            outline,
            bounds,
            area_sq_ft,
            allocated_sq_ft,
            bands,
        };

        tracing::debug!(
            "Preview for '{}': {} bands ({} drawable) in {:.0}x{:.0}, {:.0} sq ft",
            self.name,
            preview.bands.len(),
            preview.drawable_bands().count(),
            bounds.w,
            bounds.h,
            area_sq_ft
        );
        if preview.is_over_allocated() {
            tracing::warn!(
                "Parcel '{}' is over-allocated: {:.0} of {:.0} sq ft assigned, bands overflow the outline",
                self.name,
                allocated_sq_ft,
                area_sq_ft
            );
        }

        preview
    }
}

/// Output of [`Parcel::preview`].
#[derive(Debug, Clone)]
pub struct Preview {
    pub viewport_px: f64,
    /// Parcel outline in viewport coordinates.
    pub outline: Vec<PlanarPoint>,
    /// Bounding rect of the outline; the rect the bands slice.
    pub bounds: Rect,
    pub area_sq_ft: f64,
    /// Sum of positive tenant sizes.
    pub allocated_sq_ft: f64,
    pub bands: Vec<Band<TenantId>>,
}

impl Preview {
    /// Sum of band ratios. Above 1.0 the bands run past the bounds.
    pub fn allocated_ratio(&self) -> f64 {
        self.bands.iter().map(|b| b.ratio).sum()
    }

    /// Tenants asked for more than the parcel's area. A single oversized
    /// tenant counts even though its band saturates at the full bounds.
    pub fn is_over_allocated(&self) -> bool {
        self.allocated_sq_ft > self.area_sq_ft * (1.0 + 1e-9)
            || self.allocated_ratio() > 1.0 + 1e-9
    }

    /// Area not yet assigned to any tenant. Negative when over-allocated.
    pub fn unallocated_sq_ft(&self) -> f64 {
        self.area_sq_ft - self.allocated_sq_ft
    }

    pub fn drawable_bands(&self) -> impl Iterator<Item = &Band<TenantId>> + '_ {
        self.bands.iter().filter(|b| !b.is_empty())
    }
}

/// All parcels drawn in one session, plus the id sequences that name them.
#[derive(Debug, Default)]
pub struct Site {
    parcels: Vec<Parcel>,
    parcel_ids: IdSequence<ParcelId>,
    tenant_ids: IdSequence<TenantId>,
}

impl Site {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly drawn parcel. Returns the new parcel's ID, or `None`
    /// once parcel ids are exhausted.
    pub fn add_parcel(&mut self, name: &str, ring: Ring) -> Option<ParcelId> {
        let id = self.parcel_ids.next_id()?;
        let name = if name.trim().is_empty() {
            CompactString::new(format!("Parcel {}", id.0))
        } else {
            CompactString::new(name)
        };
        tracing::debug!("Added parcel {} '{}' with {} vertices", id, name, ring.len());
        self.parcels.push(Parcel {
            id,
            name,
            address: None,
            ring,
            axis: Axis::default(),
            tenants: Vec::new(),
        });
        Some(id)
    }

    /// Append a tenant to a parcel. Returns `None` if the parcel doesn't exist
    /// or tenant ids are exhausted.
    pub fn add_tenant(&mut self, parcel: ParcelId, name: &str, size_input: &str) -> Option<TenantId> {
        let idx = self.parcels.iter().position(|p| p.id == parcel)?;
        let id = self.tenant_ids.next_id()?;
        self.parcels[idx].tenants.push(Tenant {
            id,
            name: CompactString::new(name),
            size_input: CompactString::new(size_input),
        });
        Some(id)
    }

    /// Remove a tenant wherever it lives. Returns true if something was removed.
    pub fn remove_tenant(&mut self, tenant: TenantId) -> bool {
        for parcel in &mut self.parcels {
            if let Some(pos) = parcel.tenants.iter().position(|t| t.id == tenant) {
                parcel.tenants.remove(pos);
                return true;
            }
        }
        false
    }

    /// Replace a tenant's free-text size. Returns true if the tenant exists.
    pub fn set_tenant_size(&mut self, tenant: TenantId, size_input: &str) -> bool {
        match self
            .parcels
            .iter_mut()
            .flat_map(|p| p.tenants.iter_mut())
            .find(|t| t.id == tenant)
        {
            Some(t) => {
                t.size_input = CompactString::new(size_input);
                true
            }
            None => false,
        }
    }

    pub fn remove_parcel(&mut self, id: ParcelId) -> Option<Parcel> {
        let idx = self.parcels.iter().position(|p| p.id == id)?;
        Some(self.parcels.remove(idx))
    }

    pub fn parcel(&self, id: ParcelId) -> Option<&Parcel> {
        self.parcels.iter().find(|p| p.id == id)
    }

    pub fn parcel_mut(&mut self, id: ParcelId) -> Option<&mut Parcel> {
        self.parcels.iter_mut().find(|p| p.id == id)
    }

    /// First parcel with this name (case-insensitive).
    pub fn find_parcel(&self, name: &str) -> Option<&Parcel> {
        self.parcels
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring() -> Ring {
        vec![
            GeoPoint::new(36.7370, -119.7880),
            GeoPoint::new(36.7370, -119.7860),
            GeoPoint::new(36.7380, -119.7860),
            GeoPoint::new(36.7380, -119.7880),
        ]
    }

    #[test]
    fn ids_are_never_reused() {
        let mut site = Site::new();
        let p = site.add_parcel("Lot A", square_ring()).unwrap();
        let t1 = site.add_tenant(p, "Cafe", "100").unwrap();
        assert!(site.remove_tenant(t1));
        let t2 = site.add_tenant(p, "Bakery", "200").unwrap();
        assert_ne!(t1, t2);
        assert!(t2 > t1);

        let q = site.add_parcel("", square_ring()).unwrap();
        assert_ne!(p, q);
        assert_eq!(site.parcel(q).unwrap().name, "Parcel 2");
    }

    #[test]
    fn add_tenant_to_missing_parcel() {
        let mut site = Site::new();
        assert!(site.add_tenant(ParcelId(9), "Nobody", "1").is_none());
        assert!(!site.remove_tenant(TenantId(1)));
        assert!(!site.set_tenant_size(TenantId(1), "5"));
    }

    #[test]
    fn allocations_follow_tenant_order_and_parse_sizes() {
        let mut site = Site::new();
        let p = site.add_parcel("Lot A", square_ring()).unwrap();
        let a = site.add_tenant(p, "A", "1500").unwrap();
        let b = site.add_tenant(p, "B", "lots").unwrap();
        let c = site.add_tenant(p, "C", " 250.5 ").unwrap();

        let allocs = site.parcel(p).unwrap().allocations();
        let ids: Vec<TenantId> = allocs.iter().map(|a| a.occupant).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(allocs[0].size, 1500.0);
        assert_eq!(allocs[1].size, 0.0);
        assert_eq!(allocs[2].size, 250.5);

        assert!(site.set_tenant_size(b, "42"));
        assert_eq!(site.parcel(p).unwrap().allocations()[1].size, 42.0);
    }

    #[test]
    fn preview_splits_bounds_by_area_share() {
        let mut site = Site::new();
        let p = site.add_parcel("Lot A", square_ring()).unwrap();
        let area = site.parcel(p).unwrap().area_sq_ft();
        site.add_tenant(p, "A", &format!("{}", area / 4.0));
        site.add_tenant(p, "B", &format!("{}", area * 3.0 / 4.0));

        let preview = site.parcel(p).unwrap().preview(200.0, 10.0);
        assert!((preview.bounds.w - 180.0).abs() < 1e-6);
        assert!((preview.bounds.h - 180.0).abs() < 1e-6);
        assert_eq!(preview.bands.len(), 2);

        let a = preview.bands[0].rect.unwrap();
        let b = preview.bands[1].rect.unwrap();
        assert!((a.h - 45.0).abs() < 1e-6);
        assert!((b.y - 55.0).abs() < 1e-6);
        assert!((b.h - 135.0).abs() < 1e-6);
        assert!(!preview.is_over_allocated());
        assert!(preview.unallocated_sq_ft().abs() < 1e-6 * area);
    }

    #[test]
    fn preview_of_degenerate_parcel_has_only_empty_bands() {
        let mut site = Site::new();
        let p = site.add_parcel("Sliver", vec![GeoPoint::new(36.0, -119.0)]).unwrap();
        site.add_tenant(p, "A", "100");
        let preview = site.parcel(p).unwrap().preview(200.0, 10.0);
        assert_eq!(preview.area_sq_ft, 0.0);
        assert_eq!(preview.bands.len(), 1);
        assert_eq!(preview.drawable_bands().count(), 0);
    }

    #[test]
    fn over_allocation_is_reported_not_rejected() {
        let mut site = Site::new();
        let p = site.add_parcel("Lot A", square_ring()).unwrap();
        let area = site.parcel(p).unwrap().area_sq_ft();
        site.add_tenant(p, "A", &format!("{}", area));
        site.add_tenant(p, "B", &format!("{}", area / 2.0));
        let preview = site.parcel(p).unwrap().preview(200.0, 10.0);
        assert!(preview.is_over_allocated());
        assert_eq!(preview.drawable_bands().count(), 2);
        assert!(preview.unallocated_sq_ft() < 0.0);
    }

    #[test]
    fn single_oversized_tenant_is_over_allocated() {
        let mut site = Site::new();
        let p = site.add_parcel("Lot A", square_ring()).unwrap();
        let area = site.parcel(p).unwrap().area_sq_ft();
        site.add_tenant(p, "Megastore", &format!("{}", area * 2.0));
        let preview = site.parcel(p).unwrap().preview(200.0, 10.0);
        assert_eq!(preview.allocated_ratio(), 1.0);
        assert_eq!(preview.bands[0].rect, Some(preview.bounds));
        assert!(preview.is_over_allocated());
        assert!((preview.unallocated_sq_ft() + area).abs() < 1e-6 * area);
    }

    #[test]
    fn exact_allocation_is_not_over_allocated() {
        let mut site = Site::new();
        let p = site.add_parcel("Lot A", square_ring()).unwrap();
        let area = site.parcel(p).unwrap().area_sq_ft();
        site.add_tenant(p, "A", &format!("{}", area));
        let preview = site.parcel(p).unwrap().preview(200.0, 10.0);
        assert!(!preview.is_over_allocated());
    }

    #[test]
    fn find_parcel_ignores_case() {
        let mut site = Site::new();
        site.add_parcel("Corner Lot", square_ring()).unwrap();
        assert!(site.find_parcel("corner lot").is_some());
        assert!(site.find_parcel("other").is_none());
    }
}
