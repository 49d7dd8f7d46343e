use serde::{Deserialize, Serialize};

/// A named grouping that a Set belongs to. Read-only through the store;
/// rows come from the schema sync / seed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub id: i64,
    pub name: String,
}

/// A catalog item. `set_num` is the externally supplied primary key; the
/// associated Theme is attached on reads with left-join semantics, so a Set
/// with no matching Theme still carries `theme: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Set {
    pub set_num: String,
    pub name: String,
    pub year: i64,
    pub num_parts: i64,
    pub theme_id: Option<i64>,
    pub img_url: String,
    #[serde(default)]
    pub theme: Option<Theme>,
}

/// Insert model for a new Set row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSet {
    pub set_num: String,
    pub name: String,
    pub year: i64,
    pub num_parts: i64,
    pub theme_id: Option<i64>,
    pub img_url: String,
}

/// Partial update for an existing Set; only the supplied fields are written.
#[derive(Debug, Clone, Default)]
pub struct SetChanges {
    pub name: Option<String>,
    pub year: Option<i64>,
    pub num_parts: Option<i64>,
    pub theme_id: Option<i64>,
    pub img_url: Option<String>,
}

impl SetChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.year.is_none()
            && self.num_parts.is_none()
            && self.theme_id.is_none()
            && self.img_url.is_none()
    }
}
