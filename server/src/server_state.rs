use volunteer_atlas_data_management::DataManager;

use crate::{config::SiteConfig, map::PopupLinks};

pub struct ServerState<S> {
    pub data_manager: DataManager<S>,
    pub site: SiteConfig,
}

impl<S> ServerState<S> {
    pub fn new(data_manager: DataManager<S>, site: SiteConfig) -> Self {
        Self { data_manager, site }
    }

    pub fn popup_links(&self) -> PopupLinks {
        PopupLinks::new(&self.site.operator_email, &self.site.volunteer_form_url)
    }
}
