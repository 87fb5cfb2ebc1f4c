/// Diagnostic tool to verify ring → area → viewport → bands pipeline
use parcelsplit_rs::geo::{self, GeoPoint};
use parcelsplit_rs::layout::{self, Axis, DEFAULT_MARGIN_PX, DEFAULT_VIEWPORT_PX};
use parcelsplit_rs::render;
use parcelsplit_rs::site::Site;
use std::path::PathBuf;

fn sample_site() -> Site {
    // Roughly 100m x 50m lot in Fresno.
    let mut site = Site::new();
    let lot = site.add_parcel(
        "Sample Lot",
        vec![
            GeoPoint::new(36.737575, -119.787659),
            GeoPoint::new(36.737575, -119.786541),
            GeoPoint::new(36.738025, -119.786541),
            GeoPoint::new(36.738025, -119.787659),
        ],
    );
    if let Some(lot) = lot {
        site.add_tenant(lot, "Anchor Grocery", "30000");
        site.add_tenant(lot, "Pharmacy", "12000");
        site.add_tenant(lot, "Coffee", "2500");
        site.add_tenant(lot, "Vacant", "");
    }
    site
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("parcelsplit_rs=debug".parse()?),
        )
        .init();

    let site = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Site::from_file(&path, Axis::Horizontal)?,
        None => sample_site(),
    };

    println!("=== DIAGNOSTIC: Ring → Area → Bands Pipeline ===");

    for parcel in site.parcels() {
        println!(
            "\n--- {} '{}' ({} vertices, {} tenants) ---",
            parcel.id,
            parcel.name,
            parcel.ring.len(),
            parcel.tenants.len()
        );

        // Area
        let area = geo::estimate_area_sq_ft(&parcel.ring);
        println!(
            "[1] Area: {} ({:.1} m²)",
            render::format_area(area),
            area / geo::area::SQ_FT_PER_SQ_M
        );
        if let Some(c) = parcel.centroid() {
            println!("    Reference point: ({:.6}, {:.6})", c.lat, c.lng);
        }

        // Viewport projection
        let outline = layout::ring_to_viewport(&parcel.ring, DEFAULT_MARGIN_PX, DEFAULT_VIEWPORT_PX);
        println!(
            "[2] Viewport outline ({}px, margin {}px):",
            DEFAULT_VIEWPORT_PX, DEFAULT_MARGIN_PX
        );
        for (i, p) in outline.iter().enumerate() {
            println!("    [{}] ({:.1}, {:.1})", i, p.x, p.y);
        }

        let bounds = layout::bounding_rect(&outline);
        println!(
            "[3] Bounds: at ({:.1}, {:.1}) {:.1}x{:.1}",
            bounds.x, bounds.y, bounds.w, bounds.h
        );

        // Bands, both axes
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let bands = layout::subdivide(bounds, &parcel.allocations(), axis, area);
            println!("[4] {} bands:", axis.name());
            for band in &bands {
                let name = parcel
                    .tenant(band.occupant)
                    .map(|t| t.name.as_str())
                    .unwrap_or("?");
                match band.rect {
                    Some(r) => println!(
                        "    {} '{}' - {:.1}% at ({:.1}, {:.1}) {:.1}x{:.1}",
                        band.occupant, name, band.ratio * 100.0, r.x, r.y, r.w, r.h
                    ),
                    None => println!("    {} '{}' - empty", band.occupant, name),
                }
            }
        }

        // Coverage
        let preview = parcel.preview(DEFAULT_VIEWPORT_PX, DEFAULT_MARGIN_PX);
        let band_area: f64 = preview
            .drawable_bands()
            .filter_map(|b| b.rect)
            .map(|r| r.area())
            .sum();
        println!("[5] Coverage:");
        println!("    Bounds area:  {:.0}px²", bounds.area());
        println!("    Band area:    {:.0}px²", band_area);
        println!("    Allocated:    {:.1}% of parcel", preview.allocated_ratio() * 100.0);
        if preview.is_over_allocated() {
            println!(
                "    ✗ Over-allocated by {}",
                render::format_area(-preview.unallocated_sq_ft())
            );
        } else {
            println!("    ✓ {} unallocated", render::format_area(preview.unallocated_sq_ft()));
        }
    }

    Ok(())
}
