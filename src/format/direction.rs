//! Wind bearing to compass label

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const POINT_WIDTH_DEGREES: f64 = 360.0 / COMPASS_POINTS.len() as f64;

/// Map a wind bearing in degrees to one of 16 compass labels.
///
/// Returns `"N/A"` when the bearing is absent, not finite, or exactly zero.
/// Zero is indistinguishable from "no data" in the upstream payloads this
/// crate reads, so it is reported as missing rather than as north.
///
/// Halfway bearings round to the even sector (11.25° is "N", 33.75° is "NE").
pub fn direction_for(degrees: Option<f64>) -> &'static str {
    let degrees = match degrees {
        Some(d) if d.is_finite() && d != 0.0 => d,
        _ => return "N/A",
    };

    let sector = (degrees / POINT_WIDTH_DEGREES).round_ties_even() as i64;
    let index = sector.rem_euclid(COMPASS_POINTS.len() as i64) as usize;
    COMPASS_POINTS[index]
}
