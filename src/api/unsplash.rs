pub mod client {
    use std::time::Duration;

    use log::debug;
    use reqwest::Response as HttpResponse;

    use crate::api::unsplash::response::Photo;
    use crate::config::Orientation;
    use crate::error::{Error, Result};

    pub const API_URL: &str = "https://api.unsplash.com";
    const API_TIMEOUT: Duration = Duration::from_secs(30);

    pub struct Client {
        client: reqwest::Client,
        base_url: String,
    }

    impl Client {
        pub fn new(client: Option<reqwest::Client>) -> Self {
            Self::with_base_url(client, API_URL)
        }

        pub fn with_base_url(client: Option<reqwest::Client>, base_url: &str) -> Self {
            Self {
                client: client.unwrap_or_default(),
                base_url: base_url.trim_end_matches('/').to_string(),
            }
        }

        pub async fn random_photo(
            &self,
            access_key: &str,
            query: &str,
            orientation: Orientation,
        ) -> Result<Photo> {
            let url = format!("{}/photos/random", self.base_url);
            debug!("GET {} (query: {}, orientation: {})", url, query, orientation);

            let response = self
                .client
                .get(url)
                .header("Accept-Version", "v1")
                .query(&[
                    ("query", query),
                    ("orientation", orientation.value()),
                    ("client_id", access_key),
                ])
                .timeout(API_TIMEOUT)
                .send()
                .await?;

            Ok(ensure_success(response, "Fetching random photo")
                .await?
                .json::<Photo>()
                .await?)
        }

        /// Starts the image download. No timeout, full size photos can be large.
        pub async fn download(&self, url: &str) -> Result<HttpResponse> {
            debug!("GET {}", url);
            let response = self.client.get(url).send().await?;

            ensure_success(response, "Downloading image").await
        }
    }

    async fn ensure_success(response: HttpResponse, context: &'static str) -> Result<HttpResponse> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Remote {
            context,
            status: status.as_u16(),
            body,
        })
    }
}

pub mod response {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Photo {
        pub id: String,
        pub urls: Urls,
        pub user: User,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Urls {
        pub full: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct User {
        pub name: String,
    }
}
