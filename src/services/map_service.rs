use crate::models::{
    map::{LegendEntry, MapMarker, MapView, TransportationType},
    place::{Hotel, Place},
};

const PLACE_ZOOM: u8 = 12;
const TRANSPORT_ZOOM: u8 = 13;

pub const TRANSPORTATION_TYPES: [TransportationType; 4] = [
    TransportationType {
        name: "Bus Stations",
        icon_color: "blue",
        icon_prefix: "fa",
        icon_name: "bus",
    },
    TransportationType {
        name: "Train Stations",
        icon_color: "green",
        icon_prefix: "fa",
        icon_name: "train",
    },
    TransportationType {
        name: "Taxi Stands",
        icon_color: "orange",
        icon_prefix: "fa",
        icon_name: "taxi",
    },
    TransportationType {
        name: "Metro Stations",
        icon_color: "purple",
        icon_prefix: "fa",
        icon_name: "subway",
    },
];

fn place_marker(place: &Place) -> MapMarker {
    MapMarker {
        latitude: place.latitude,
        longitude: place.longitude,
        popup: place.name.clone(),
        tooltip: place.name.clone(),
        color: "red".to_string(),
        icon: Some("info-sign".to_string()),
    }
}

pub fn place_map(place: &Place) -> MapView {
    MapView {
        center: (place.latitude, place.longitude),
        zoom: PLACE_ZOOM,
        markers: vec![place_marker(place)],
        legend: Vec::new(),
    }
}

/// Centred on the place, one blue pin per hotel and none for the place itself.
pub fn hotels_map(place: &Place, hotels: &[Hotel]) -> MapView {
    let markers = hotels
        .iter()
        .map(|hotel| MapMarker {
            latitude: hotel.latitude,
            longitude: hotel.longitude,
            popup: hotel.name.clone(),
            tooltip: hotel.name.clone(),
            color: "blue".to_string(),
            icon: None,
        })
        .collect();

    MapView {
        center: (place.latitude, place.longitude),
        zoom: PLACE_ZOOM,
        markers,
        legend: Vec::new(),
    }
}

pub fn transportation_map(place: &Place) -> MapView {
    let mut legend = vec![LegendEntry {
        label: "Current Location".to_string(),
        icon: "fa-map-marker".to_string(),
        color: "red".to_string(),
    }];
    legend.extend(TRANSPORTATION_TYPES.iter().map(|t| LegendEntry {
        label: t.name.to_string(),
        icon: format!("{}-{}", t.icon_prefix, t.icon_name),
        color: t.icon_color.to_string(),
    }));

    MapView {
        center: (place.latitude, place.longitude),
        zoom: TRANSPORT_ZOOM,
        markers: vec![place_marker(place)],
        legend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    fn place() -> Place {
        Place {
            id: Some(ObjectId::new()),
            name: "Udaipur".to_string(),
            description: None,
            latitude: 24.58,
            longitude: 73.71,
            image: None,
        }
    }

    fn hotel(name: &str, latitude: f64) -> Hotel {
        Hotel {
            id: Some(ObjectId::new()),
            place_id: ObjectId::new(),
            name: name.to_string(),
            description: None,
            price: 3200.0,
            latitude,
            longitude: 73.7,
            image: None,
        }
    }

    #[test]
    fn place_map_pins_the_place() {
        let map = place_map(&place());
        assert_eq!(map.center, (24.58, 73.71));
        assert_eq!(map.zoom, 12);
        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].tooltip, "Udaipur");
        assert_eq!(map.markers[0].color, "red");
        assert!(map.legend.is_empty());
    }

    #[test]
    fn hotels_map_has_one_marker_per_hotel() {
        let hotels = vec![hotel("Lake Palace", 24.57), hotel("City Inn", 24.59)];
        let map = hotels_map(&place(), &hotels);
        assert_eq!(map.center, (24.58, 73.71));
        let names: Vec<_> = map.markers.iter().map(|m| m.popup.as_str()).collect();
        assert_eq!(names, ["Lake Palace", "City Inn"]);
        assert!(map.markers.iter().all(|m| m.color == "blue" && m.icon.is_none()));
    }

    #[test]
    fn transportation_map_lists_every_type_in_the_legend() {
        let map = transportation_map(&place());
        assert_eq!(map.zoom, 13);
        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.legend.len(), 5);
        assert_eq!(map.legend[0].label, "Current Location");
        assert_eq!(map.legend[4].icon, "fa-subway");
        assert_eq!(map.legend[4].color, "purple");
    }
}
