use volunteer_atlas_lib::{request::Request, volunteer::Volunteer};

use crate::html::{escape, percent_encode};

pub const POPUP_WIDTH: u32 = 250;
const MIN_POPUP_HEIGHT: u32 = 100;

const POPUP_HEAD: &str = "<head><style>body{font-size:14px;font-family:sans-serif}</style></head><body>";

/// Where popup call-to-action links point.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupLinks {
    /// Copied on every contact mail so the operators can follow up.
    pub operator_email: String,
    pub volunteer_form_url: String,
}

impl PopupLinks {
    pub fn new(operator_email: impl Into<String>, volunteer_form_url: impl Into<String>) -> Self {
        Self {
            operator_email: operator_email.into(),
            volunteer_form_url: volunteer_form_url.into(),
        }
    }
}

/// Popup frame height grows with the amount of markup, counted in characters.
pub fn popup_height(popup: &str) -> u32 {
    let height = popup.chars().count() as f64 / 2.2 - 15.;
    height.max(MIN_POPUP_HEIGHT as f64).round() as u32
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("<b>{label}:</b> {} <br>", escape(value)));
}

pub fn volunteer_popup(volunteer: &Volunteer, links: &PopupLinks) -> String {
    let mut html = String::from(POPUP_HEAD);

    field(&mut html, "Name", &volunteer.given_name);
    field(&mut html, "Country", &volunteer.location.country);
    field(&mut html, "City", &volunteer.location.city);
    field(&mut html, "Services", &volunteer.services);
    field(&mut html, "Transportation", &volunteer.transportation);
    field(&mut html, "Radius", &format!("{} km", volunteer.radius_km.trunc() as i64));
    field(&mut html, "Day of Week", &volunteer.schedule.day_of_week);
    field(&mut html, "Time of Day", &volunteer.schedule.time_of_day);
    field(&mut html, "Languages", &volunteer.languages);
    field(&mut html, "Payment", &volunteer.reimbursement);
    field(&mut html, "About Me", &volunteer.about_me);

    let mailto = format!(
        "mailto:{}?cc={}&Subject={}",
        percent_encode(&volunteer.email).replace("%40", "@"),
        percent_encode(&links.operator_email).replace("%40", "@"),
        percent_encode(&format!("Delivery Request for {}", volunteer.given_name)),
    );
    html.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\">Contact {}</a>  <br></body>",
        escape(&mailto),
        escape(&volunteer.given_name)
    ));

    html
}

pub fn request_popup(request: &Request, links: &PopupLinks) -> String {
    let mut html = String::from(POPUP_HEAD);

    field(&mut html, "Country", &request.location.country);
    field(&mut html, "City", &request.location.city);
    field(&mut html, "Services", &request.services);
    field(&mut html, "Type", &request.request_type);
    field(&mut html, "Day of Week", &request.schedule.day_of_week);
    field(&mut html, "Time of Day", &request.schedule.time_of_day);
    field(&mut html, "Languages", &request.languages);
    field(&mut html, "Payment", &request.reimbursement);

    html.push_str(&format!(
        "<a href=\"{}\" target=\"_blank\">Sign Up to Help</a>  <br></body>",
        escape(&links.volunteer_form_url)
    ));

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tests::{request, volunteer};

    fn links() -> PopupLinks {
        PopupLinks::new("ops@example.org", "https://forms.example.org/volunteer?embedded=true&x=1")
    }

    #[test]
    fn volunteer_popup_links_a_prefilled_mail() {
        let popup = volunteer_popup(&volunteer("Sudbury", 12.7, "Yes", "Yes", None), &links());

        assert!(popup.contains("<b>Name:</b> Ada <br>"));
        assert!(popup.contains("<b>Radius:</b> 12 km <br>"));
        assert!(popup.contains(
            "href=\"mailto:ada@example.com?cc=ops@example.org&amp;Subject=Delivery%20Request%20for%20Ada\""
        ));
        assert!(popup.contains(">Contact Ada</a>"));
    }

    #[test]
    fn request_popup_links_the_signup_form() {
        let popup = request_popup(&request(None), &links());

        assert!(popup.contains("<b>Type:</b> Recurring <br>"));
        assert!(popup.contains("href=\"https://forms.example.org/volunteer?embedded=true&amp;x=1\""));
        assert!(popup.contains("Sign Up to Help"));
        assert!(!popup.contains("Name:"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut v = volunteer("Sudbury", 5., "Yes", "Yes", None);
        v.about_me = "<script>alert(1)</script>".into();
        let popup = volunteer_popup(&v, &links());

        assert!(!popup.contains("<script>"));
        assert!(popup.contains("&lt;script&gt;"));
    }

    #[test]
    fn popup_height_has_a_floor() {
        assert_eq!(popup_height(""), 100);
        assert_eq!(popup_height(&"x".repeat(1100)), 485);
    }

    #[test]
    fn accented_text_sizes_like_plain_text() {
        assert_eq!(popup_height(&"é".repeat(1100)), popup_height(&"e".repeat(1100)));
    }
}
