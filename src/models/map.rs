use serde::Serialize;

/// Everything a client-side map widget needs to draw a view: tiles are the
/// client's concern, this only carries the camera, pins and legend.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: String,
    pub tooltip: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct TransportationType {
    pub name: &'static str,
    pub icon_color: &'static str,
    pub icon_prefix: &'static str,
    pub icon_name: &'static str,
}
