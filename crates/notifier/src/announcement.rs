use tmdb::Movie;

/// Accent color shown on every announcement card.
pub const ACCENT_COLOR: u32 = 0x3498db;

/// Base URL for TMDB images, joined with the `w500` size variant.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

const PLACEHOLDER_DESCRIPTION: &str = "No description available.";

/// The channel-ready rendering of one movie.
///
/// Derived once per fetched movie and discarded after dispatch. Carries no
/// identity, so the same movie renders to an equal announcement on every
/// cycle it appears in.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub title: String,
    pub description: String,
    pub accent_color: u32,
    pub image_url: Option<String>,
    pub footer: String,
}

impl Announcement {
    pub fn from_movie(movie: &Movie) -> Self {
        let description = if movie.overview.is_empty() {
            PLACEHOLDER_DESCRIPTION.to_string()
        } else {
            movie.overview.clone()
        };

        let image_url = movie
            .poster_path
            .as_deref()
            .map(|path| format!("{}/w500{}", IMAGE_BASE_URL, path));

        let footer = format!(
            "Release Date: {}",
            movie.release_date.as_deref().unwrap_or_default()
        );

        Self {
            title: movie.title.clone(),
            description,
            accent_color: ACCENT_COLOR,
            image_url,
            footer,
        }
    }
}
