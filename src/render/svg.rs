use std::fmt::Write as _;

use super::colors::{self, band_color};
use crate::geo::PlanarPoint;
use crate::site::Preview;

/// Closed SVG path through the outline points, `None` for fewer than two.
pub fn outline_path(points: &[PlanarPoint]) -> Option<String> {
    if points.len() < 2 {
        return None;
    }
    let mut d = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd} {:.2} {:.2} ", p.x, p.y);
    }
    d.push('Z');
    Some(d)
}

/// Render a preview as a standalone SVG document.
///
/// `labels[i]` names band `i`; missing labels are left blank. Empty bands
/// produce no element. Overflowing bands are drawn where they fall, so they
/// can extend past the viewport.
pub fn render_preview(preview: &Preview, labels: &[&str]) -> String {
    let size = preview.viewport_px;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size:.0}" height="{size:.0}" viewBox="0 0 {size:.0} {size:.0}">"#
    );

    for (i, band) in preview.bands.iter().enumerate() {
        let (Some(rect), Some(d)) = (band.rect, band.path()) else {
            continue;
        };
        let fill = band_color(i);
        let _ = writeln!(
            out,
            r#"  <path d="{d}" fill="{}" fill-opacity="0.55" stroke="{}" stroke-width="0.5"/>"#,
            fill.to_hex(),
            fill.darken(0.25).to_hex()
        );
        if let Some(label) = labels.get(i).filter(|l| !l.is_empty()) {
            let _ = writeln!(
                out,
                r#"  <text x="{:.2}" y="{:.2}" font-size="8" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                rect.x + rect.w / 2.0,
                rect.y + rect.h / 2.0,
                escape(label)
            );
        }
    }

    if let Some(d) = outline_path(&preview.outline) {
        let _ = writeln!(
            out,
            r#"  <path d="{d}" fill="none" stroke="{}" stroke-width="2"/>"#,
            colors::OUTLINE.to_hex()
        );
    }

    out.push_str("</svg>\n");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Band, Rect};
    use crate::site::ids::TenantId;

    fn preview(bands: Vec<Band<TenantId>>) -> Preview {
        Preview {
            viewport_px: 200.0,
            outline: vec![
                PlanarPoint::new(10.0, 10.0),
                PlanarPoint::new(190.0, 10.0),
                PlanarPoint::new(190.0, 190.0),
            ],
            bounds: Rect::new(10.0, 10.0, 180.0, 180.0),
            area_sq_ft: 2000.0,
            allocated_sq_ft: 1000.0,
            bands,
        }
    }

    #[test]
    fn outline_path_needs_two_points() {
        assert!(outline_path(&[]).is_none());
        assert!(outline_path(&[PlanarPoint::new(1.0, 1.0)]).is_none());
        assert_eq!(
            outline_path(&[PlanarPoint::new(0.0, 0.0), PlanarPoint::new(1.0, 2.0)]).unwrap(),
            "M 0.00 0.00 L 1.00 2.00 Z"
        );
    }

    #[test]
    fn empty_bands_are_skipped() {
        let svg = render_preview(
            &preview(vec![
                Band {
                    occupant: TenantId(1),
                    ratio: 0.5,
                    rect: Some(Rect::new(10.0, 10.0, 180.0, 90.0)),
                },
                Band {
                    occupant: TenantId(2),
                    ratio: 0.0,
                    rect: None,
                },
            ]),
            &["Cafe & Co", "Ghost"],
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("M 10.00 10.00 h 180.00 v 90.00 h -180.00 Z"));
        assert!(svg.contains("Cafe &amp; Co"));
        assert!(!svg.contains("Ghost"));
        // One band plus the outline.
        assert_eq!(svg.matches("<path").count(), 2);
    }
}
