//! Framework-neutral view model for the movie detail page.
//!
//! [`DetailView`] is one of four mutually exclusive states derived from a
//! [`FetchStatus`]. The TUI turns it into ratatui widgets; the CLI prints
//! [`DetailView::to_lines`]. All user-facing copy lives here.

use crate::config::ImageConfig;
use crate::domain::{CastMember, MovieDetails, Review};
use crate::fetch::FetchStatus;
use crate::navigation::{Location, SubView};

pub const LOADING: &str = "Loading...";
pub const NOT_FOUND: &str = "NOT FOUND";
pub const NO_INFORMATION: &str = "Not information";
pub const GO_BACK: &str = "Go back";
pub const OVERVIEW: &str = "Overview";
pub const GENRES: &str = "Genres";
pub const ADDITIONAL_INFORMATION: &str = "Additional information";

/// Where an image is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image host base URL + path.
    Remote(String),
    /// Local placeholder asset.
    Placeholder(String),
}

impl ImageSource {
    /// Remote URL for a non-empty path, the placeholder otherwise.
    pub fn resolve(path: Option<&str>, images: &ImageConfig) -> Self {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => ImageSource::Remote(images.url_for(path)),
            None => ImageSource::Placeholder(images.placeholder.clone()),
        }
    }

    pub fn src(&self) -> &str {
        match self {
            ImageSource::Remote(s) | ImageSource::Placeholder(s) => s,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder(_))
    }
}

/// Text for a block, or the "no information" fallback when empty.
pub fn or_no_information(text: &str) -> &str {
    if text.is_empty() {
        NO_INFORMATION
    } else {
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub sub_view: SubView,
    pub target: Location,
    /// The outlet currently shows this sub-view.
    pub active: bool,
}

impl Link {
    pub fn label(&self) -> &'static str {
        self.sub_view.label()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastRow {
    pub name: String,
    pub character: String,
    pub photo: ImageSource,
}

impl CastRow {
    pub fn line(&self) -> String {
        if self.character.is_empty() {
            self.name.clone()
        } else {
            format!("{} as {}", self.name, self.character)
        }
    }
}

/// Content of the nested region under the detail layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutletView {
    /// No sub-view selected.
    Closed,
    /// Fallback while the active sub-view loads.
    Loading,
    NotFound,
    Cast(Vec<CastRow>),
    Reviews(Vec<Review>),
}

impl OutletView {
    pub fn build(
        active: Option<SubView>,
        cast: &FetchStatus<Vec<CastMember>>,
        reviews: &FetchStatus<Vec<Review>>,
        images: &ImageConfig,
    ) -> Self {
        match active {
            None => OutletView::Closed,
            Some(SubView::Cast) => match cast {
                FetchStatus::Idle | FetchStatus::Loading => OutletView::Loading,
                FetchStatus::Error => OutletView::NotFound,
                FetchStatus::Success(members) => OutletView::Cast(
                    members
                        .iter()
                        .map(|m| CastRow {
                            name: m.name.clone(),
                            character: m.character.clone(),
                            photo: ImageSource::resolve(m.photo.as_deref(), images),
                        })
                        .collect(),
                ),
            },
            Some(SubView::Reviews) => match reviews {
                FetchStatus::Idle | FetchStatus::Loading => OutletView::Loading,
                FetchStatus::Error => OutletView::NotFound,
                FetchStatus::Success(list) => OutletView::Reviews(list.clone()),
            },
        }
    }

    pub fn to_lines(&self) -> Vec<String> {
        match self {
            OutletView::Closed => Vec::new(),
            OutletView::Loading => vec![LOADING.to_string()],
            OutletView::NotFound => vec![NOT_FOUND.to_string()],
            OutletView::Cast(rows) if rows.is_empty() => vec![NO_INFORMATION.to_string()],
            OutletView::Cast(rows) => rows.iter().map(|r| format!("- {}", r.line())).collect(),
            OutletView::Reviews(list) if list.is_empty() => vec![NO_INFORMATION.to_string()],
            OutletView::Reviews(list) => {
                let mut lines = Vec::new();
                for review in list {
                    lines.push(format!("Author: {}", review.author));
                    lines.push(review.content.clone());
                    lines.push(String::new());
                }
                lines.pop();
                lines
            }
        }
    }
}

/// Everything shown once a movie has loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLayout {
    pub back: Location,
    pub poster: ImageSource,
    /// "Poster {title}"; absent for the placeholder.
    pub poster_alt: Option<String>,
    pub heading: String,
    pub score: String,
    pub overview: String,
    pub genres: String,
    pub links: Vec<Link>,
    pub outlet: OutletView,
}

impl DetailLayout {
    pub fn build(
        movie: &MovieDetails,
        location: &Location,
        outlet: OutletView,
        images: &ImageConfig,
    ) -> Self {
        let poster = ImageSource::resolve(movie.poster_path(), images);
        let poster_alt = (!poster.is_placeholder()).then(|| format!("Poster {}", movie.title));
        let active = location.route().sub_view();
        let links = SubView::ALL
            .iter()
            .filter_map(|&sub| {
                location.sub_view_link(sub).map(|target| Link {
                    sub_view: sub,
                    target,
                    active: active == Some(sub),
                })
            })
            .collect();

        Self {
            back: location.back_target(),
            poster,
            poster_alt,
            heading: movie.heading(),
            score: format!("User score {}%", movie.vote_average),
            overview: or_no_information(&movie.overview).to_string(),
            genres: or_no_information(&movie.genres).to_string(),
            links,
            outlet,
        }
    }
}

/// The four mutually exclusive states of the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// Idle: nothing rendered.
    Empty,
    Loading,
    NotFound,
    Loaded(Box<DetailLayout>),
}

impl DetailView {
    pub fn build(
        status: &FetchStatus<MovieDetails>,
        location: &Location,
        outlet: OutletView,
        images: &ImageConfig,
    ) -> Self {
        match status {
            FetchStatus::Idle => DetailView::Empty,
            FetchStatus::Loading => DetailView::Loading,
            FetchStatus::Error => DetailView::NotFound,
            FetchStatus::Success(movie) => DetailView::Loaded(Box::new(DetailLayout::build(
                movie, location, outlet, images,
            ))),
        }
    }

    /// Plain-text rendering, one entry per line.
    pub fn to_lines(&self) -> Vec<String> {
        let layout = match self {
            DetailView::Empty => return Vec::new(),
            DetailView::Loading => return vec![LOADING.to_string()],
            DetailView::NotFound => return vec![NOT_FOUND.to_string()],
            DetailView::Loaded(layout) => layout,
        };

        let mut lines = vec![
            format!("[{GO_BACK}] -> {}", layout.back.path),
            format!("Poster: {}", layout.poster.src()),
            layout.heading.clone(),
            layout.score.clone(),
            OVERVIEW.to_string(),
            layout.overview.clone(),
            GENRES.to_string(),
            layout.genres.clone(),
            ADDITIONAL_INFORMATION.to_string(),
        ];
        for link in &layout.links {
            let marker = if link.active { "*" } else { "-" };
            lines.push(format!("  {marker} {} -> {}", link.label(), link.target.path));
        }
        let outlet = layout.outlet.to_lines();
        if !outlet.is_empty() {
            lines.push(String::new());
            lines.extend(outlet);
        }
        lines
    }
}
