use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Podcast,
}

/// One recommended piece of content. Only videos carry a thumbnail.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ContentItem {
    pub fn video<T: Into<String>>(title: T, url: T, thumbnail: T) -> ContentItem {
        ContentItem {
            kind: ContentKind::Video,
            title: title.into(),
            url: url.into(),
            thumbnail: Some(thumbnail.into()),
        }
    }

    pub fn podcast<T: Into<String>>(title: T, url: T) -> ContentItem {
        ContentItem {
            kind: ContentKind::Podcast,
            title: title.into(),
            url: url.into(),
            thumbnail: None,
        }
    }
}
