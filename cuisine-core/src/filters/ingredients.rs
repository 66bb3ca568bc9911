//! Ingredient tags selected in the filter form.

/// Static catalog driving ingredient autocomplete. Free text is accepted too.
pub const INGREDIENT_CATALOG: &[&str] = &[
    "lettuce", "beef", "eggs", "milk", "chicken", "tomato", "onion", "garlic", "cheese", "pasta",
    "rice", "potato", "carrot", "broccoli", "spinach", "mushroom", "pepper", "basil", "olive oil",
    "butter", "flour", "sugar", "salt", "lemon", "avocado", "bread", "salmon", "shrimp", "bacon",
];

/// Ordered set of ingredient names.
///
/// Entries are trimmed and never empty; duplicates (exact, case-sensitive)
/// are rejected on insert, so the first-seen order is what gets displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an ingredient. Returns false if it was blank or already present.
    pub fn add(&mut self, candidate: &str) -> bool {
        let name = candidate.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    /// Remove by value. Removing something that isn't there is a no-op.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.trim();
        match self.0.iter().position(|i| i == name) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index < self.0.len() {
            Some(self.0.remove(index))
        } else {
            None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|i| i == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined form used by the `ingredients` query parameter.
    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }

    /// Split a comma-joined list, dropping blanks and repeats.
    pub fn from_csv(csv: &str) -> Self {
        csv.split(',').collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut list = IngredientList::new();
        for item in iter {
            list.add(item.as_ref());
        }
        list
    }
}

impl<'a> IntoIterator for &'a IngredientList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Catalog entries matching `input` (case-insensitive substring) that are not
/// already selected. An empty input lists every unselected entry.
pub fn suggest(input: &str, selected: &IngredientList) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    INGREDIENT_CATALOG
        .iter()
        .copied()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .filter(|candidate| !selected.contains(candidate))
        .collect()
}
