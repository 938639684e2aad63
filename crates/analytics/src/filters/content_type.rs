//! Filter keeping a single content type.

use crate::traits::Filter;
use data_loader::{ContentType, Title};

/// Keeps only movies, or only TV shows.
pub struct ContentTypeFilter {
    content_type: ContentType,
}

impl ContentTypeFilter {
    pub fn new(content_type: ContentType) -> Self {
        Self { content_type }
    }
}

impl Filter for ContentTypeFilter {
    fn name(&self) -> &str {
        "ContentTypeFilter"
    }

    fn apply<'a>(&self, titles: Vec<&'a Title>) -> Vec<&'a Title> {
        titles
            .into_iter()
            .filter(|t| t.content_type == self.content_type)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_filter() {
        let titles = vec![
            Title::new(ContentType::Movie, "Okja", 2017),
            Title::new(ContentType::TvShow, "Narcos", 2015),
            Title::new(ContentType::TvShow, "Ozark", 2017),
        ];

        let filter = ContentTypeFilter::new(ContentType::TvShow);
        let filtered = filter.apply(titles.iter().collect());

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|t| t.content_type == ContentType::TvShow));
    }
}
