use serde::{Deserialize, Serialize};
use std::fmt;

pub const CONTENT_TYPES: [&str; 3] = ["image", "video", "text"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Image,
    Video,
    Text,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ContentType::Image => "image",
            ContentType::Video => "video",
            ContentType::Text => "text",
        }
    }
}

impl TryFrom<&str> for ContentType {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "image" => Ok(ContentType::Image),
            "video" => Ok(ContentType::Video),
            "text" => Ok(ContentType::Text),
            _ => Err("Invalid content type"),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
