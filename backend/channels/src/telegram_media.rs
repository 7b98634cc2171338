//! Telegram Media Selection
//!
//! Picks the banner image sent with the main menu. Images are served by the
//! companion app, so paths are resolved against its base URL.

use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct ImageCatalog {
    paths: Vec<String>,
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self::new(vec![
            "/images/onChainFeeds.png".to_string(),
            "/images/onChainFeeds.png".to_string(),
        ])
    }
}

impl ImageCatalog {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    /// Absolute URL of a randomly chosen image, or `None` when the catalog is empty.
    pub fn pick(&self, base_url: &str) -> Option<String> {
        let base = base_url.trim_end_matches('/');
        self.paths
            .choose(&mut rand::thread_rng())
            .map(|path| format!("{base}{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_from_catalog() {
        let catalog = ImageCatalog::new(vec!["/a.png".into(), "/b.png".into()]);
        for _ in 0..10 {
            let url = catalog.pick("https://x.test/").unwrap();
            assert!(url == "https://x.test/a.png" || url == "https://x.test/b.png");
        }
    }

    #[test]
    fn empty_catalog_picks_nothing() {
        assert!(ImageCatalog::new(Vec::new()).pick("https://x.test").is_none());
    }
}
