//! Builds the volunteer/request map: one cluster layer of circle markers per
//! category, each marker carrying its popup.

use geo_types::Point;
use serde::Serialize;
use volunteer_atlas_data_management::AtlasData;
use volunteer_atlas_lib::{category::Category, request::Request, volunteer::Volunteer};

mod document;
pub mod popup;

pub use popup::PopupLinks;

/// Display radius in meters for requests and for volunteers in dense cities.
pub const FIXED_RADIUS_M: f64 = 500.;

/// Cities where declared service radii would bury the map, so markers there
/// use [`FIXED_RADIUS_M`]. Compared against title-cased city names.
pub const DENSE_CITIES: [&str; 5] = ["Montreal", "Toronto", "Ottawa", "Montréal", "Cote St Luc"];

pub const STAMEN_TERRAIN_TILES: &str = "https://tiles.stadiamaps.com/tiles/stamen_terrain/{z}/{x}/{y}{r}.png";
pub const STAMEN_TERRAIN_ATTRIBUTION: &str = "&copy; <a href=\"https://stadiamaps.com/\">Stadia Maps</a> &copy; <a href=\"https://stamen.com/\">Stamen Design</a> &copy; <a href=\"https://openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub min_zoom: u8,
    pub zoom_start: u8,
    pub locate_max_zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: [42., -97.5],
            min_zoom: 3,
            zoom_start: 4,
            locate_max_zoom: 13,
            tile_url: STAMEN_TERRAIN_TILES.to_string(),
            tile_attribution: STAMEN_TERRAIN_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    /// Meters
    pub radius: f64,
    pub color: &'static str,
    pub popup: String,
    pub popup_width: u32,
    pub popup_height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayer {
    pub name: &'static str,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    pub options: MapOptions,
    pub layers: Vec<MarkerLayer>,
}

impl MapDocument {
    pub fn layer(&self, category: Category) -> Option<&MarkerLayer> {
        self.layers.iter().find(|layer| layer.name == category.layer_name())
    }
}

/// What a record kind contributes to the map, beyond the color and layer name
/// its [`Category`] already fixes.
pub trait Mappable {
    const CATEGORY: Category;

    fn position(&self) -> Option<Point>;

    fn is_eligible(&self) -> bool {
        true
    }

    fn display_radius_m(&self) -> f64 {
        FIXED_RADIUS_M
    }

    fn popup_html(&self, links: &PopupLinks) -> String;
}

impl Mappable for Volunteer {
    const CATEGORY: Category = Category::Volunteers;

    fn position(&self) -> Option<Point> {
        self.location.position
    }

    fn is_eligible(&self) -> bool {
        Volunteer::is_eligible(self)
    }

    fn display_radius_m(&self) -> f64 {
        if DENSE_CITIES.contains(&self.location.city.as_str()) {
            FIXED_RADIUS_M
        } else {
            self.radius_km * 1000.
        }
    }

    fn popup_html(&self, links: &PopupLinks) -> String {
        popup::volunteer_popup(self, links)
    }
}

impl Mappable for Request {
    const CATEGORY: Category = Category::Requests;

    fn position(&self) -> Option<Point> {
        self.location.position
    }

    fn popup_html(&self, links: &PopupLinks) -> String {
        popup::request_popup(self, links)
    }
}

pub fn build_layer<T: Mappable>(records: &[T], links: &PopupLinks) -> MarkerLayer {
    let category = T::CATEGORY;

    let markers: Vec<Marker> = records
        .iter()
        .filter_map(|record| record.position().map(|position| (record, position)))
        .filter(|(record, _)| record.is_eligible())
        .map(|(record, position)| {
            let popup = record.popup_html(links);
            Marker {
                lat: position.y(),
                lng: position.x(),
                radius: record.display_radius_m(),
                color: category.color(),
                popup_width: popup::POPUP_WIDTH,
                popup_height: popup::popup_height(&popup),
                popup,
            }
        })
        .collect();

    tracing::debug!("{} layer: {} of {} records placed", category.layer_name(), markers.len(), records.len());

    MarkerLayer {
        name: category.layer_name(),
        markers,
    }
}

pub fn build_map(atlas: &AtlasData, links: &PopupLinks, options: &MapOptions) -> MapDocument {
    MapDocument {
        options: options.clone(),
        layers: vec![
            build_layer(&atlas.volunteers.records, links),
            build_layer(&atlas.requests.records, links),
        ],
    }
}
