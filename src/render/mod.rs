pub mod colors;
pub mod svg;

use crate::site::Parcel;

/// Format square feet with thousands separators, e.g. `53,820 sq ft`.
pub fn format_area(sq_ft: f64) -> String {
    if !sq_ft.is_finite() {
        return "0 sq ft".to_string();
    }
    let rounded = sq_ft.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped} sq ft")
}

/// Band labels for a parcel's preview, in tenant order.
pub fn tenant_labels(parcel: &Parcel) -> Vec<&str> {
    parcel.tenants.iter().map(|t| t.name.as_str()).collect()
}
