use chrono::{DateTime, Local};

use crate::api::unsplash::response::Photo;

/// One random photo picked by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    url: String,
    photographer: String,
    id: String,
}

impl ImageData {
    pub fn new(url: String, photographer: String, id: String) -> Self {
        Self {
            url,
            photographer,
            id,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn photographer(&self) -> &str {
        &self.photographer
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn page_url(&self) -> String {
        format!("https://unsplash.com/photos/{}", self.id)
    }

    /// Attribution record written next to the wallpaper.
    pub fn metadata(&self, at: DateTime<Local>) -> String {
        format!(
            "Date: {}\nPhotographer: {}\nUnsplash ID: {}\nURL: {}\n",
            at.format("%Y-%m-%d %H:%M:%S"),
            self.photographer,
            self.id,
            self.page_url()
        )
    }
}

impl From<Photo> for ImageData {
    fn from(photo: Photo) -> Self {
        Self::new(photo.urls.full, photo.user.name, photo.id)
    }
}
