use futures_util::future::join;

use super::Loaded;
use crate::db::{self, Backend};
use crate::models::{Project, SiteContent};

pub const HERO_SECTION: &str = "hero";
pub const ABOUT_SECTION: &str = "about";

pub const FALLBACK_HERO_TITLE: &str = "Powering Tomorrow with Clean Energy";
pub const FALLBACK_HERO_BODY: &str =
    "Leading the renewable energy revolution with innovative solar solutions";
pub const FALLBACK_HERO_IMAGE: &str =
    "https://images.pexels.com/photos/356036/pexels-photo-356036.jpeg";
pub const FALLBACK_ABOUT_BODY: &str = "We are a renewable energy company focused on developing, \
operating, and managing large-scale solar power projects with a strong commitment to \
sustainability, innovation, and long-term value creation.";

/// First content block whose section equals `section`.
pub fn find_section<'a>(content: &'a [SiteContent], section: &str) -> Option<&'a SiteContent> {
    content.iter().find(|c| c.section == section)
}

/// Everything the home page shows that comes from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeContent {
    pub hero_title: String,
    pub hero_body: String,
    pub hero_image: String,
    pub about_body: String,
    pub content_error: Option<String>,
    pub featured: Vec<Project>,
    pub featured_error: Option<String>,
}

impl HomeContent {
    pub fn build(content: Loaded<Vec<SiteContent>>, featured: Loaded<Vec<Project>>) -> Self {
        let content_error = content.error().map(str::to_string);
        let featured_error = featured.error().map(str::to_string);
        let blocks = content.into_value();

        let hero = find_section(&blocks, HERO_SECTION);
        let about = find_section(&blocks, ABOUT_SECTION);

        Self {
            hero_title: non_empty(hero.map(|c| c.title.as_str()), FALLBACK_HERO_TITLE),
            hero_body: non_empty(hero.map(|c| c.content.as_str()), FALLBACK_HERO_BODY),
            hero_image: non_empty(
                hero.and_then(|c| c.image_url.as_deref()),
                FALLBACK_HERO_IMAGE,
            ),
            about_body: non_empty(about.map(|c| c.content.as_str()), FALLBACK_ABOUT_BODY),
            content_error,
            featured: featured.into_value(),
            featured_error,
        }
    }
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Issue the two independent home page reads. A failure in one never
/// prevents the other from rendering.
pub async fn load_home(backend: &Backend) -> HomeContent {
    let (content, featured) = join(
        db::list_site_content(backend),
        db::list_featured_projects(backend, db::FEATURED_LIMIT),
    )
    .await;

    HomeContent::build(
        Loaded::from_result(content, "site content"),
        Loaded::from_result(featured, "featured projects"),
    )
}
