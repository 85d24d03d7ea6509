//! The dashboard's tab contents. Each tab selection renders one fragment;
//! only the map tab does any work, and it does all of it again every time.

use volunteer_atlas_data_management::sheets::SheetSource;

use crate::{html::escape, map::build_map, server_state::ServerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Map,
    VolunteerForm,
    DeliveryForm,
    About,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Map, Tab::VolunteerForm, Tab::DeliveryForm, Tab::About];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Map => "tab-map",
            Tab::VolunteerForm => "tab-volunteer",
            Tab::DeliveryForm => "tab-delivery",
            Tab::About => "tab-about",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Map => "Interactive Map",
            Tab::VolunteerForm => "Volunteer Signup Form",
            Tab::DeliveryForm => "Delivery Request Form",
            Tab::About => "About Us",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabContent {
    Ready(String),
    /// The map could not be built; holds the error panel shown instead.
    Unavailable(String),
}

impl TabContent {
    pub fn html(&self) -> &str {
        match self {
            TabContent::Ready(html) | TabContent::Unavailable(html) => html,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TabContent::Ready(_))
    }
}

/// Fetch, normalize and render the map document. No part of a failed run is returned.
pub async fn render_map<S: SheetSource>(state: &ServerState<S>) -> anyhow::Result<String> {
    let atlas = state.data_manager.fetch_atlas().await?;
    let map = build_map(&atlas, &state.popup_links(), &state.site.map);
    Ok(map.to_html()?)
}

pub async fn render_tab<S: SheetSource>(state: &ServerState<S>, tab: Tab) -> TabContent {
    let height = state.site.frame_height;

    match tab {
        Tab::Map => match render_map(state).await {
            Ok(document) => TabContent::Ready(format!(
                "<iframe id=\"atlas-map\" srcdoc=\"{}\" width=\"100%\" height=\"{height}\" style=\"overflow:hidden;border:0\" scrolling=\"no\"></iframe>",
                escape(&document)
            )),
            Err(err) => {
                tracing::error!("Failed to render map: {err:#}");
                TabContent::Unavailable(MAP_UNAVAILABLE.to_string())
            }
        },
        Tab::VolunteerForm => TabContent::Ready(form_frame("volunteer-form", &state.site.volunteer_form_url, height)),
        Tab::DeliveryForm => TabContent::Ready(form_frame("request-form", &state.site.delivery_form_url, height)),
        Tab::About => TabContent::Ready(format!(
            "<div class=\"about\">{ABOUT_HTML}<a href=\"{}\" target=\"_blank\">Code on Github</a></div>",
            escape(&state.site.source_url)
        )),
    }
}

fn form_frame(id: &str, url: &str, height: u32) -> String {
    format!(
        "<iframe id=\"{id}\" src=\"{}\" style=\"width:100%;height:{height}px;border:0\"></iframe>",
        escape(url)
    )
}

/// Full dashboard page with `selected` opened. Tab links swap the content in
/// place and fall back to a full page load without scripting.
pub fn dashboard_page(selected: Tab, content: &TabContent) -> String {
    let tabs: String = Tab::ALL
        .iter()
        .map(|tab| {
            let class = if *tab == selected { "custom-tab custom-tab--selected" } else { "custom-tab" };
            format!(
                "<a class=\"{class}\" href=\"/?tab={id}\" data-tab=\"{id}\">{label}</a>",
                id = tab.id(),
                label = tab.label()
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>VolunteerAtlas</title>
  <link rel="stylesheet" href="/assets/style.css" />
</head>
<body>
  <header><img src="/assets/banner.svg" alt="VolunteerAtlas" height="40" /></header>
  <nav id="tabs">{tabs}</nav>
  <main id="tabs-content">{content}</main>
  <footer id="footer"></footer>
  <script>
    document.querySelectorAll('#tabs a[data-tab]').forEach(function (link) {{
      link.addEventListener('click', function (event) {{
        event.preventDefault();
        fetch('/tab/' + link.dataset.tab)
          .then(function (response) {{ return response.text(); }})
          .then(function (html) {{
            document.getElementById('tabs-content').innerHTML = html;
            document.querySelectorAll('#tabs a').forEach(function (other) {{
              other.classList.toggle('custom-tab--selected', other === link);
            }});
            history.replaceState(null, '', link.href);
          }});
      }});
    }});
  </script>
</body>
</html>
"#,
        content = content.html()
    )
}

/// Shown wherever the map would have gone when it cannot be built.
pub const MAP_UNAVAILABLE: &str = "<div class=\"tab-error\"><h5>The map is unavailable right now</h5>\
<p>We could not reach the volunteer records. Please try again in a few minutes.</p></div>";

const ABOUT_HTML: &str = r#"
<h5>About Us</h5>
<p>COVID-19 is a global problem requiring large-scale local responses. VolunteerAtlas is trying to create a global online repository of volunteers to help deal with this growing crisis. Self isolation for the most at-risk individuals in our community will require essentials like food and medicine be delivered to their doorsteps. If you're a young, healthy person with no dependents, and have been practicing social distancing, maybe you'd like to help.</p>

<h5>Privacy</h5>
<p>We take your privacy seriously. Only your <strong>Given Name, Email Address</strong> and <strong>About Me</strong> sections will be shared on the website. All additional personal information will only be accessible by admins and will be used solely to confirm identities and protect those we are seeking to help.</p>
<p>Our system is also designed to protect your physical location. We only ask for a postal code (not your home address) to get your approximate location. We then add an additional 500m of random noise to further protect your privacy.</p>

<h5>FAQs</h5>
<p><strong>Why might posting my information on this website be more helpful than just posting on Facebook/Twitter?</strong></p>
<p>Vulnerable people needing help the most are likely those who do not live in the same city as their close relatives/friends. Close relatives who live outside of the locality are less likely to see or be aware of Facebook groups or Twitter posts from localized help groups. Also, social media is ephemeral, if you are offering to help over a course of weeks or months, putting your information into a central repository is a more effective way to do it.</p>
<p><strong>What is the process for connecting volunteers with recipients?</strong></p>
<p>Your approximate location will populate an interactive map and certain details from your responses will be available on your 'public profile'. Recipients will navigate through the map to select the most suitable volunteer based on their profile. A small group of admin will be involved in facilitating your volunteer effort behind the scenes.</p>
<p><strong>Buying groceries for more than just yourself might look to others like panic buying. What can I do if I'm confronted/prevented from shopping based on such suspicions?</strong></p>
<p>We are thinking about ways to implement a verification and authentication program. For the time being, we recommend you speak with store staff/management about your volunteerism and show them your registration on this website.</p>
"#;
