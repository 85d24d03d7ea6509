use rand::{SeedableRng, rngs::StdRng};
use server::{
    config::SiteConfig,
    map::{MapOptions, PopupLinks, build_map},
    server_state::ServerState,
    tabs::{Tab, render_map, render_tab},
};
use volunteer_atlas_data_management::{
    DataManager,
    sheets::{InMemorySheets, Worksheet},
};
use volunteer_atlas_lib::{category::Category, columns::*};

const VOLUNTEER_HEADER: [&str; 17] = [
    TIMESTAMP, GIVEN_NAME, EMAIL_ADDRESS, COUNTRY, CITY, LATITUDE, LONGITUDE, SERVICES, TRANSPORTATION, RADIUS,
    DAY_OF_WEEK, TIME_OF_DAY, LANGUAGES, REIMBURSEMENT, ABOUT_ME, HEALTH, AVAILABILITY,
];

const REQUEST_HEADER: [&str; 11] = [
    TIMESTAMP, COUNTRY, CITY, LATITUDE, LONGITUDE, SERVICES, REQUEST_TYPE, DAY_OF_WEEK, TIME_OF_DAY, LANGUAGES,
    REIMBURSEMENT,
];

struct VolunteerRow {
    timestamp: &'static str,
    name: &'static str,
    city: &'static str,
    lat: &'static str,
    lon: &'static str,
    radius: &'static str,
    health: &'static str,
    availability: &'static str,
}

impl Default for VolunteerRow {
    fn default() -> Self {
        Self {
            timestamp: "3/20/2020 10:00:00",
            name: "Ada",
            city: "sudbury",
            lat: "46.49",
            lon: "-80.99",
            radius: "12km",
            health: "Yes",
            availability: "Yes",
        }
    }
}

impl VolunteerRow {
    fn cells(&self) -> Vec<String> {
        [
            self.timestamp, self.name, "ada@example.com", "Canada", self.city, self.lat, self.lon, "Groceries",
            "Car", self.radius, "Weekends", "Mornings", "English", "Cash", "Happy to help", self.health,
            self.availability,
        ]
        .map(String::from)
        .to_vec()
    }
}

fn volunteers(rows: &[VolunteerRow]) -> Worksheet {
    let mut values = vec![VOLUNTEER_HEADER.map(String::from).to_vec()];
    values.extend(rows.iter().map(VolunteerRow::cells));
    Worksheet::from_values(VOLUNTEERS_WORKSHEET, values)
}

fn requests(rows: &[[&str; 11]]) -> Worksheet {
    let mut values = vec![REQUEST_HEADER.map(String::from).to_vec()];
    values.extend(rows.iter().map(|row| row.map(String::from).to_vec()));
    Worksheet::from_values(REQUESTS_WORKSHEET, values)
}

fn state(volunteer_sheet: Worksheet, request_sheet: Worksheet) -> ServerState<InMemorySheets> {
    let sheets = InMemorySheets::new().with_worksheet(volunteer_sheet).with_worksheet(request_sheet);
    ServerState::new(DataManager::new(sheets), SiteConfig::default())
}

fn links() -> PopupLinks {
    PopupLinks::new("ops@example.org", "https://forms.example.org/volunteer")
}

#[tokio::test]
async fn dense_city_clamps_radius_and_others_keep_theirs() {
    let state = state(
        volunteers(&[
            VolunteerRow { city: "toronto", lat: "43.65", lon: "-79.38", ..Default::default() },
            VolunteerRow::default(),
        ]),
        requests(&[]),
    );

    let atlas = state.data_manager.fetch_atlas().await.unwrap();
    let map = build_map(&atlas, &links(), &MapOptions::default());
    let markers = &map.layer(Category::Volunteers).unwrap().markers;

    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].radius, 500.);
    assert_eq!(markers[1].radius, 12000.);
}

#[tokio::test]
async fn unavailable_volunteers_and_unplaced_rows_are_left_off() {
    let state = state(
        volunteers(&[
            VolunteerRow { availability: "No", ..Default::default() },
            VolunteerRow { lat: "", lon: "", ..Default::default() },
            VolunteerRow { name: "Grace", ..Default::default() },
        ]),
        requests(&[
            ["3/21/2020 9:00:00", "Canada", "Toronto", "", "", "Medicine", "Once", "", "", "English", "Cash"],
            ["3/21/2020 9:00:00", "Canada", "Toronto", "43.65", "-79.38", "Medicine", "Once", "", "", "English", "Cash"],
        ]),
    );

    let atlas = state.data_manager.fetch_atlas().await.unwrap();
    let map = build_map(&atlas, &links(), &MapOptions::default());

    let volunteers = &map.layer(Category::Volunteers).unwrap().markers;
    assert_eq!(volunteers.len(), 1);
    assert!(volunteers[0].popup.contains("Contact Grace"));

    assert_eq!(map.layer(Category::Requests).unwrap().markers.len(), 1);
}

#[tokio::test]
async fn one_malformed_timestamp_costs_one_marker() {
    let mut rows: Vec<VolunteerRow> = (0..10).map(|_| VolunteerRow::default()).collect();
    rows[3].timestamp = "sometime in March";
    let state = state(volunteers(&rows), requests(&[]));

    let atlas = state.data_manager.fetch_atlas().await.unwrap();
    let map = build_map(&atlas, &links(), &MapOptions::default());

    assert_eq!(map.layer(Category::Volunteers).unwrap().markers.len(), 9);
    assert_eq!(atlas.volunteers.rejected.len(), 1);
}

#[tokio::test]
async fn the_same_row_lands_somewhere_new_each_render() {
    let state = state(volunteers(&[VolunteerRow::default()]), requests(&[]));
    let (volunteer_sheet, request_sheet) = state.data_manager.fetch_worksheets().await.unwrap();

    let mut rng = StdRng::seed_from_u64(2020);
    let first = state.data_manager.normalize(&volunteer_sheet, &request_sheet, &mut rng).unwrap();
    let second = state.data_manager.normalize(&volunteer_sheet, &request_sheet, &mut rng).unwrap();

    let first = build_map(&first, &links(), &MapOptions::default());
    let second = build_map(&second, &links(), &MapOptions::default());
    let a = &first.layer(Category::Volunteers).unwrap().markers[0];
    let b = &second.layer(Category::Volunteers).unwrap().markers[0];

    assert_ne!((a.lat, a.lng), (b.lat, b.lng));
    for marker in [a, b] {
        assert!((marker.lat - 46.49).abs() <= 0.005 + 1e-12);
        assert!((marker.lng + 80.99).abs() <= 0.005 + 1e-12);
    }
}

#[tokio::test]
async fn map_tab_embeds_the_rendered_document() {
    let state = state(volunteers(&[VolunteerRow::default()]), requests(&[]));

    let document = render_map(&state).await.unwrap();
    assert!(document.contains("\"radius\":12000.0"));

    let tab = render_tab(&state, Tab::Map).await;
    assert!(tab.is_ready());
    assert!(tab.html().starts_with("<iframe id=\"atlas-map\" srcdoc=\"&lt;!DOCTYPE html&gt;"));
    assert!(tab.html().contains("height=\"800\""));
}

#[tokio::test]
async fn missing_request_sheet_fails_the_whole_map() {
    let sheets = InMemorySheets::new().with_worksheet(volunteers(&[VolunteerRow::default()]));
    let state = ServerState::new(DataManager::new(sheets), SiteConfig::default());

    assert!(render_map(&state).await.is_err());
    assert!(!render_tab(&state, Tab::Map).await.is_ready());
}
