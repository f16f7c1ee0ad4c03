use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::ident;

/// Wire tag for the two lure flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LureKind {
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "IMAGE")]
    Image,
}

impl std::fmt::Display for LureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "TEXT"),
            Self::Image => write!(f, "IMAGE"),
        }
    }
}

impl std::str::FromStr for LureKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(Self::Text),
            "IMAGE" => Ok(Self::Image),
            _ => Err(format!("Unknown lure kind: {}", s)),
        }
    }
}

/// Decoy content, tagged by kind. Content presence is enforced here at
/// construction instead of via nullable columns checked ad hoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LureContent {
    /// Visible decoy text.
    Text(String),
    /// Self-describing embedded image (data URI).
    Image(String),
}

impl LureContent {
    pub fn kind(&self) -> LureKind {
        match self {
            Self::Text(_) => LureKind::Text,
            Self::Image(_) => LureKind::Image,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Image(_) => None,
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Image(s) => Some(s),
        }
    }
}

/// A registered decoy path.
#[derive(Debug, Clone)]
pub struct Lure {
    pub id: String,
    pub path: String,
    pub content: LureContent,
    pub created_at: DateTime<Utc>,
}

/// One recorded page load of a lure.
///
/// `location` and `photo` are write-once: null until the matching capture
/// callback lands, frozen afterwards.
#[derive(Debug, Clone)]
pub struct LureView {
    pub id: String,
    /// None once the owning lure has been deleted.
    pub lure_id: Option<String>,
    pub ip: String,
    pub user_agent: String,
    pub location: Option<String>,
    pub photo: Option<String>,
}

impl LureView {
    /// Creation time, decoded from the v7 id.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        ident::timestamp_of(&self.id).ok()
    }
}

/// An administrator account.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lure_kind_roundtrip() {
        assert_eq!("TEXT".parse::<LureKind>().unwrap(), LureKind::Text);
        assert_eq!("IMAGE".parse::<LureKind>().unwrap(), LureKind::Image);
        assert_eq!(LureKind::Text.to_string(), "TEXT");
        assert_eq!(LureKind::Image.to_string(), "IMAGE");
        assert!("FILE".parse::<LureKind>().is_err());
    }

    #[test]
    fn test_content_accessors() {
        let text = LureContent::Text("olá".to_string());
        assert_eq!(text.kind(), LureKind::Text);
        assert_eq!(text.text(), Some("olá"));
        assert_eq!(text.image(), None);

        let image = LureContent::Image("data:image/png;base64,AAAA".to_string());
        assert_eq!(image.kind(), LureKind::Image);
        assert_eq!(image.image(), Some("data:image/png;base64,AAAA"));
        assert_eq!(image.text(), None);
    }

    #[test]
    fn test_view_created_at_from_id() {
        let view = LureView {
            id: ident::new_id(),
            lure_id: None,
            ip: "203.0.113.1".to_string(),
            user_agent: "test".to_string(),
            location: None,
            photo: None,
        };
        let decoded = view.created_at().expect("fresh v7 id should decode");
        let age = chrono::Utc::now() - decoded;
        assert!(age < chrono::Duration::seconds(5));
    }
}
