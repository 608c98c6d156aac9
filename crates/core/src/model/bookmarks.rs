use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// Bookmarked question ids in the order they were added.
///
/// Serializes as a plain JSON array of id strings. Repeated ids in stored
/// input collapse to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<QuestionId>", into = "Vec<QuestionId>")]
pub struct Bookmarks {
    ids: Vec<QuestionId>,
}

impl Bookmarks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.ids.contains(id)
    }

    /// Add the id if absent, remove it if present.
    ///
    /// Returns `true` when the id is bookmarked after the call.
    pub fn toggle(&mut self, id: &QuestionId) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionId> {
        self.ids.iter()
    }
}

impl FromIterator<QuestionId> for Bookmarks {
    fn from_iter<I: IntoIterator<Item = QuestionId>>(iter: I) -> Self {
        let mut bookmarks = Self::new();
        for id in iter {
            if !bookmarks.contains(&id) {
                bookmarks.ids.push(id);
            }
        }
        bookmarks
    }
}

impl From<Vec<QuestionId>> for Bookmarks {
    fn from(ids: Vec<QuestionId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<Bookmarks> for Vec<QuestionId> {
    fn from(bookmarks: Bookmarks) -> Self {
        bookmarks.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original() {
        let mut bookmarks: Bookmarks = [QuestionId::new("CS101-Final-4")].into_iter().collect();
        let original = bookmarks.clone();
        let id = QuestionId::new("CS101-Midterm-1");

        assert!(bookmarks.toggle(&id));
        assert!(bookmarks.contains(&id));
        assert!(!bookmarks.toggle(&id));

        assert_eq!(bookmarks, original);
    }

    #[test]
    fn keeps_insertion_order_in_json() {
        let mut bookmarks = Bookmarks::new();
        bookmarks.toggle(&QuestionId::new("b"));
        bookmarks.toggle(&QuestionId::new("a"));

        let json = serde_json::to_string(&bookmarks).unwrap();
        assert_eq!(json, r#"["b","a"]"#);
    }

    #[test]
    fn repeated_ids_in_json_collapse() {
        let mut bookmarks: Bookmarks = serde_json::from_str(r#"["x","y","x"]"#).unwrap();
        assert_eq!(bookmarks.len(), 2);

        let x = QuestionId::new("x");
        assert!(!bookmarks.toggle(&x));
        assert!(!bookmarks.contains(&x));
    }

    #[test]
    fn collecting_drops_duplicates() {
        let bookmarks: Bookmarks = ["x", "y", "x"].into_iter().map(QuestionId::new).collect();
        assert_eq!(bookmarks.len(), 2);
    }
}
