//! Image Registry
//!
//! Media already uploaded to the host, looked up when a layout asks for an
//! image it has no URL for. A miss is not an error: the caller falls back
//! to the dialect's placeholder.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::compiler::CompileError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredImage {
    pub url: String,
    /// Media library id.
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub filename: String,
    /// Position of the source image in the design the layout came from.
    #[serde(default)]
    pub original_index: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRegistry {
    images: Vec<RegisteredImage>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of image records.
    pub fn load_from_file(path: &Path) -> Result<Self, CompileError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn register(&mut self, image: RegisteredImage) {
        self.images.push(image);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn by_index(&self, index: usize) -> Option<&RegisteredImage> {
        self.images
            .iter()
            .find(|img| img.original_index == Some(index))
    }

    /// First image whose filename contains one of the first two
    /// description words longer than three characters.
    pub fn match_description(&self, description: &str) -> Option<&RegisteredImage> {
        let description = description.to_lowercase();
        let words: Vec<&str> = description
            .split_whitespace()
            .take(2)
            .filter(|w| w.chars().count() > 3)
            .collect();
        if words.is_empty() {
            return None;
        }

        self.images.iter().find(|img| {
            let filename = img.filename.to_lowercase();
            !filename.is_empty() && words.iter().any(|w| filename.contains(w))
        })
    }

    /// Index first, then description.
    pub fn resolve(&self, description: &str, index: Option<usize>) -> Option<&RegisteredImage> {
        index
            .and_then(|i| self.by_index(i))
            .or_else(|| self.match_description(description))
    }
}

impl FromIterator<RegisteredImage> for ImageRegistry {
    fn from_iter<I: IntoIterator<Item = RegisteredImage>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(filename: &str, index: Option<usize>) -> RegisteredImage {
        RegisteredImage {
            url: format!("https://cdn.example.com/{}", filename),
            id: Some(7),
            filename: filename.to_string(),
            original_index: index,
        }
    }

    #[test]
    fn test_index_before_description() {
        let registry: ImageRegistry = vec![image("harbour-view.jpg", None), image("lobby.jpg", Some(0))]
            .into_iter()
            .collect();
        assert_eq!(registry.resolve("Harbour view", Some(0)).unwrap().filename, "lobby.jpg");
        assert_eq!(registry.resolve("Harbour view", Some(3)).unwrap().filename, "harbour-view.jpg");
    }

    #[test]
    fn test_short_words_never_match() {
        let registry: ImageRegistry = vec![image("the-car.jpg", None)].into_iter().collect();
        assert!(registry.match_description("the car").is_none());
        assert!(registry.match_description("").is_none());
    }

    #[test]
    fn test_only_first_two_words_count() {
        let registry: ImageRegistry = vec![image("garden.png", None)].into_iter().collect();
        assert!(registry.match_description("Large sunny garden").is_none());
        assert!(registry.match_description("Garden party").is_some());
    }
}
