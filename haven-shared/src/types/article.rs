use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ActorId, Profile};

/// A published article. Articles are the primary interaction target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author_id: ActorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Length of the body in characters, the unit highlight indexes are expressed in.
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }

    /// Returns the characters in `[start, end)` of the body.
    pub fn excerpt(&self, start: usize, end: usize) -> String {
        self.body
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }
}

/// Payload for publishing a new article.
///
/// Missing fields deserialize as empty and are rejected by validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
}

/// Partial update of an article. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

/// Public representation of an article with its aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub author: Profile,
    pub likes: i64,
    pub dislikes: i64,
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Turns a title into a URL slug.
///
/// ASCII letters and digits are lowercased and kept, underscores are kept,
/// runs of whitespace and hyphens collapse into a single hyphen and every
/// other character is dropped. Leading and trailing hyphens and underscores
/// are trimmed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("The Wheels  on -- the Bus"), "the-wheels-on-the-bus");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("Alice in Wonderland!"), "alice-in-wonderland");
        assert_eq!(slugify("  _hello_ world? "), "hello_-world");
    }

    #[test]
    fn test_slugify_empty_title() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_excerpt_counts_characters() {
        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            slug: "s".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            body: "héllo wörld".to_string(),
            author_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(article.body_len(), 11);
        assert_eq!(article.excerpt(0, 5), "héllo");
        assert_eq!(article.excerpt(6, 11), "wörld");
        assert_eq!(article.excerpt(4, 2), "");
    }
}
