use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PREDEFINED_CUISINES: &[&str] = &[
    "Indian",
    "Italian",
    "Mexican",
    "Chinese",
    "Thai",
    "Mediterranean",
    "Greek",
    "American",
];

pub const PREDEFINED_INGREDIENTS: &[&str] = &["Tomato", "Onion", "Garlic", "Chicken", "Beef"];

pub const DIETARY_PREFERENCES: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Dairy-Free",
    "Low-Carb",
    "Keto",
    "Nut-Free",
    "Soy-Free",
    "Sugar-Free",
    "Low-Fat",
    "Organic",
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("a recipe needs at least one serving")]
    NoServings,
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub cuisines: Vec<String>,
    pub ingredients: Vec<String>,
    pub preferences: Vec<String>,
    pub servings: u32,
}

impl Default for RecipeRequest {
    fn default() -> Self {
        RecipeRequest {
            cuisines: Vec::new(),
            ingredients: Vec::new(),
            preferences: Vec::new(),
            servings: 4,
        }
    }
}

impl RecipeRequest {
    pub fn new(servings: u32) -> RecipeRequest {
        RecipeRequest {
            servings,
            ..Default::default()
        }
    }

    pub fn cuisine<S: ToString>(mut self, cuisine: S) -> Self {
        self.cuisines.push(cuisine.to_string());
        self
    }

    pub fn ingredient<S: ToString>(mut self, ingredient: S) -> Self {
        self.ingredients.push(ingredient.to_string());
        self
    }

    pub fn preference<S: ToString>(mut self, preference: S) -> Self {
        self.preferences.push(preference.to_string());
        self
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.servings == 0 {
            return Err(RequestError::NoServings);
        }
        Ok(())
    }
}

/// The choices offered to the user. Starts out with the predefined options; custom
/// entries typed in by the user are added to the catalog the caller owns, and also
/// become part of the request being built.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub cuisines: Vec<String>,
    pub ingredients: Vec<String>,
    pub preferences: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Catalog {
            cuisines: owned(PREDEFINED_CUISINES),
            ingredients: owned(PREDEFINED_INGREDIENTS),
            preferences: owned(DIETARY_PREFERENCES),
        }
    }
}

fn add_unique(list: &mut Vec<String>, entry: &str) -> Option<String> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }
    if !list.iter().any(|existing| existing.eq_ignore_ascii_case(entry)) {
        list.push(entry.to_string());
    }
    Some(entry.to_string())
}

impl Catalog {
    /// Add a custom cuisine to the catalog and to `request`. Blank entries are ignored.
    pub fn custom_cuisine(&mut self, request: &mut RecipeRequest, cuisine: &str) {
        if let Some(cuisine) = add_unique(&mut self.cuisines, cuisine) {
            request.cuisines.push(cuisine);
        }
    }

    /// Add a custom ingredient to the catalog and to `request`. Blank entries are ignored.
    pub fn custom_ingredient(&mut self, request: &mut RecipeRequest, ingredient: &str) {
        if let Some(ingredient) = add_unique(&mut self.ingredients, ingredient) {
            request.ingredients.push(ingredient);
        }
    }

    /// Add a custom dietary preference to the catalog and to `request`. Blank entries
    /// are ignored.
    pub fn custom_preference(&mut self, request: &mut RecipeRequest, preference: &str) {
        if let Some(preference) = add_unique(&mut self.preferences, preference) {
            request.preferences.push(preference);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn servings_must_be_positive() {
        assert_eq!(RecipeRequest::new(0).validate(), Err(RequestError::NoServings));
        assert_eq!(RecipeRequest::new(1).validate(), Ok(()));
    }

    #[test]
    fn builder_collects_selections() {
        let request = RecipeRequest::new(2)
            .cuisine("Thai")
            .ingredient("Garlic")
            .ingredient("Chicken")
            .preference("Nut-Free");
        assert_eq!(request.cuisines, vec!["Thai"]);
        assert_eq!(request.ingredients, vec!["Garlic", "Chicken"]);
        assert_eq!(request.preferences, vec!["Nut-Free"]);
    }

    #[test]
    fn custom_entries_join_both_catalog_and_request() {
        let mut catalog = Catalog::default();
        let mut request = RecipeRequest::new(4);

        catalog.custom_preference(&mut request, " Pescatarian ");
        catalog.custom_cuisine(&mut request, "Ethiopian");
        catalog.custom_ingredient(&mut request, "   ");

        assert_eq!(request.preferences, vec!["Pescatarian"]);
        assert_eq!(request.cuisines, vec!["Ethiopian"]);
        assert!(request.ingredients.is_empty());
        assert_eq!(catalog.preferences.last().unwrap(), "Pescatarian");
        assert_eq!(catalog.cuisines.len(), PREDEFINED_CUISINES.len() + 1);
        assert_eq!(catalog.ingredients.len(), PREDEFINED_INGREDIENTS.len());
    }

    #[test]
    fn catalogs_are_independent() {
        let mut first = Catalog::default();
        let mut request = RecipeRequest::new(1);
        first.custom_preference(&mut request, "Halal");

        // a fresh catalog doesn't see another caller's custom entries
        assert_eq!(Catalog::default().preferences.len(), DIETARY_PREFERENCES.len());

        // known options aren't duplicated, but are still selected
        first.custom_preference(&mut request, "vegan");
        assert_eq!(first.preferences.len(), DIETARY_PREFERENCES.len() + 1);
        assert_eq!(request.preferences, vec!["Halal", "vegan"]);
    }
}
