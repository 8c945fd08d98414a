use geo::LineString;
use wkt::TryFromWkt;

/// Parses a fixture trace.
pub fn trace(wkt: &str) -> LineString {
    LineString::try_from_wkt_str(wkt).expect("fixture is a valid linestring")
}

pub fn traces(wkts: &[&str]) -> Vec<LineString> {
    wkts.iter().map(|wkt| trace(wkt)).collect()
}
