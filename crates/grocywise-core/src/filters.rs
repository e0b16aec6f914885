//! Food-group, dietary and cuisine filter sets.

use serde::Serialize;

use crate::CoreError;

/// Food groups offered by the presentation layer.
pub const FOOD_GROUPS: &[&str] = &[
    "Fruits & Veg",
    "Dairy & Eggs",
    "Meat & Seafood",
    "Pantry Staples",
    "Bakery",
    "Snacks & Drinks",
    "Frozen Food",
];

/// Dietary restrictions offered by the presentation layer.
pub const DIETARY_RESTRICTIONS: &[&str] = &[
    "Vegan",
    "Vegetarian",
    "Gluten-Free",
    "Dairy-Free",
    "Halal",
    "Kosher",
    "Nut-Free",
    "Low Carb",
];

/// Cuisines offered by the presentation layer.
pub const CUISINES: &[&str] = &[
    "South-East Asian",
    "East Asian",
    "South Asian",
    "Mediterranean",
    "Latin American",
    "Middle Eastern",
    "African",
    "Caribbean",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    FoodGroup,
    Dietary,
    Cuisine,
}

impl FilterCategory {
    /// The fixed catalog for this category.
    #[must_use]
    pub fn catalog(self) -> &'static [&'static str] {
        match self {
            FilterCategory::FoodGroup => FOOD_GROUPS,
            FilterCategory::Dietary => DIETARY_RESTRICTIONS,
            FilterCategory::Cuisine => CUISINES,
        }
    }
}

/// Three independent tag sets narrowing a query.
///
/// Each set keeps insertion order (the prompt lists tags in the order the
/// user picked them) and never holds the same label twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    food_groups: Vec<String>,
    dietary_restrictions: Vec<String>,
    cuisines: Vec<String>,
}

impl FilterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw label lists, trimming and de-duplicating each.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyFilterLabel`] if any label is blank.
    pub fn from_labels<I, S>(food_groups: I, dietary: I, cuisines: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for label in food_groups {
            set.insert(FilterCategory::FoodGroup, label.as_ref())?;
        }
        for label in dietary {
            set.insert(FilterCategory::Dietary, label.as_ref())?;
        }
        for label in cuisines {
            set.insert(FilterCategory::Cuisine, label.as_ref())?;
        }
        Ok(set)
    }

    /// Add `label` to `category`. Returns `false` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyFilterLabel`] if `label` is blank.
    pub fn insert(&mut self, category: FilterCategory, label: &str) -> Result<bool, CoreError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(CoreError::EmptyFilterLabel);
        }
        let tags = self.tags_mut(category);
        if tags.iter().any(|t| t == label) {
            return Ok(false);
        }
        tags.push(label.to_string());
        Ok(true)
    }

    /// Remove `label` from `category`. Returns `true` if it was present.
    pub fn remove(&mut self, category: FilterCategory, label: &str) -> bool {
        let label = label.trim();
        let tags = self.tags_mut(category);
        let before = tags.len();
        tags.retain(|t| t != label);
        tags.len() != before
    }

    /// Flip membership of `label`. Returns `true` if it is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyFilterLabel`] if `label` is blank.
    pub fn toggle(&mut self, category: FilterCategory, label: &str) -> Result<bool, CoreError> {
        if self.remove(category, label) {
            Ok(false)
        } else {
            self.insert(category, label)
        }
    }

    #[must_use]
    pub fn food_groups(&self) -> &[String] {
        &self.food_groups
    }

    #[must_use]
    pub fn dietary_restrictions(&self) -> &[String] {
        &self.dietary_restrictions
    }

    #[must_use]
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.food_groups.is_empty() && self.dietary_restrictions.is_empty() && self.cuisines.is_empty()
    }

    fn tags_mut(&mut self, category: FilterCategory) -> &mut Vec<String> {
        match category {
            FilterCategory::FoodGroup => &mut self.food_groups,
            FilterCategory::Dietary => &mut self.dietary_restrictions,
            FilterCategory::Cuisine => &mut self.cuisines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates_and_preserves_order() {
        let mut set = FilterSet::new();
        assert!(set.insert(FilterCategory::Dietary, "Vegan").unwrap());
        assert!(set.insert(FilterCategory::Dietary, "Halal").unwrap());
        assert!(!set.insert(FilterCategory::Dietary, " Vegan ").unwrap());
        assert_eq!(set.dietary_restrictions(), ["Vegan", "Halal"]);
    }

    #[test]
    fn insert_rejects_blank_label() {
        let mut set = FilterSet::new();
        let err = set.insert(FilterCategory::Cuisine, "   ").unwrap_err();
        assert_eq!(err, CoreError::EmptyFilterLabel);
        assert!(set.is_empty());
    }

    #[test]
    fn categories_are_independent() {
        let mut set = FilterSet::new();
        set.insert(FilterCategory::FoodGroup, "Bakery").unwrap();
        assert!(set.dietary_restrictions().is_empty());
        assert!(set.cuisines().is_empty());
        assert!(!set.is_empty());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = FilterSet::new();
        assert!(set.toggle(FilterCategory::Cuisine, "Caribbean").unwrap());
        assert!(!set.toggle(FilterCategory::Cuisine, "Caribbean").unwrap());
        assert!(set.is_empty());
    }

    #[test]
    fn from_labels_accepts_free_form_tags() {
        let set = FilterSet::from_labels(
            vec!["Bakery"],
            vec!["Vegan", "Vegan", "Keto"],
            Vec::<&str>::new(),
        )
        .unwrap();
        assert_eq!(set.food_groups(), ["Bakery"]);
        assert_eq!(set.dietary_restrictions(), ["Vegan", "Keto"]);
    }

    #[test]
    fn catalogs_have_expected_sizes() {
        assert_eq!(FilterCategory::FoodGroup.catalog().len(), 7);
        assert_eq!(FilterCategory::Dietary.catalog().len(), 8);
        assert_eq!(FilterCategory::Cuisine.catalog().len(), 8);
    }

    #[test]
    fn serializes_camel_case() {
        let mut set = FilterSet::new();
        set.insert(FilterCategory::Dietary, "Kosher").unwrap();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["dietaryRestrictions"][0], "Kosher");
        assert!(json["foodGroups"].as_array().unwrap().is_empty());
    }
}
