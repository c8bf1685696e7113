use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminant of a vote target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Article,
    Comment,
}

impl TargetKind {
    /// Storage code of the kind.
    pub fn as_i16(self) -> i16 {
        match self {
            TargetKind::Article => 0,
            TargetKind::Comment => 1,
        }
    }

    pub fn from_i16(code: i16) -> Option<Self> {
        match code {
            0 => Some(TargetKind::Article),
            1 => Some(TargetKind::Comment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Article => "article",
            TargetKind::Comment => "comment",
        }
    }
}

/// Something an actor can vote on.
///
/// Votes live in a single table; the target is stored as a `(kind, id)` pair
/// and rebuilt with [`Target::from_parts`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    Article(Uuid),
    Comment(Uuid),
}

impl Target {
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Article(_) => TargetKind::Article,
            Target::Comment(_) => TargetKind::Comment,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Target::Article(id) | Target::Comment(id) => *id,
        }
    }

    pub fn from_parts(kind: TargetKind, id: Uuid) -> Self {
        match kind {
            TargetKind::Article => Target::Article(id),
            TargetKind::Comment => Target::Comment(id),
        }
    }
}
