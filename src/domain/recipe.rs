//! Recipe and ingredient models plus the edit operations applied to a draft.
//!
//! Field names follow the REST contract (camelCase on the wire). Optional fields the
//! server leaves out stay `None` and are omitted again when a recipe is sent back.

use crate::domain::user::UserProfile;
use serde::{Deserialize, Serialize};

/// A recipe as exchanged with the remote API.
///
/// `id` is `None` only for a draft that has not been created on the server yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Preparation time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    /// Cooking time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

/// One line of a recipe's ingredient list. Owned by exactly one recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Ingredient {
    /// Returns the blank row appended by "add ingredient".
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: 0,
            name: String::new(),
            quantity: Some(String::new()),
            unit: Some(String::new()),
        }
    }
}

/// A single field change applied to a recipe draft.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeEdit {
    Title(String),
    Description(String),
    Link(String),
    PrepTime(Option<u32>),
    CookTime(Option<u32>),
    ServingSize(Option<u32>),
    Calories(Option<f64>),
    Protein(Option<f64>),
    Carbs(Option<f64>),
    Fat(Option<f64>),
}

/// A single field change applied to one ingredient row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientEdit {
    Name(String),
    Quantity(String),
    Unit(String),
}

impl Recipe {
    /// Returns the empty draft a user starts from when creating a recipe.
    #[must_use]
    pub fn draft(author: Option<UserProfile>) -> Self {
        Self {
            title: String::new(),
            description: Some(String::new()),
            ingredients: Some(Vec::new()),
            user: author,
            ..Self::default()
        }
    }

    /// Ingredients as a slice, empty when the server sent none.
    #[must_use]
    pub fn ingredient_list(&self) -> &[Ingredient] {
        self.ingredients.as_deref().unwrap_or_default()
    }

    /// Applies one field edit in place.
    pub fn apply(&mut self, edit: RecipeEdit) {
        match edit {
            RecipeEdit::Title(title) => self.title = title,
            RecipeEdit::Description(text) => self.description = Some(text),
            RecipeEdit::Link(link) => self.link = Some(link),
            RecipeEdit::PrepTime(v) => self.prep_time = v,
            RecipeEdit::CookTime(v) => self.cook_time = v,
            RecipeEdit::ServingSize(v) => self.serving_size = v,
            RecipeEdit::Calories(v) => self.calories = v,
            RecipeEdit::Protein(v) => self.protein = v,
            RecipeEdit::Carbs(v) => self.carbs = v,
            RecipeEdit::Fat(v) => self.fat = v,
        }
    }

    pub fn add_ingredient(&mut self) {
        self.ingredients
            .get_or_insert_with(Vec::new)
            .push(Ingredient::blank());
    }

    /// Removes the ingredient at `index`. Returns `false` if out of range.
    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        match self.ingredients.as_mut() {
            Some(list) if index < list.len() => {
                list.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Edits the ingredient at `index`. Returns `false` if out of range.
    pub fn update_ingredient(&mut self, index: usize, edit: IngredientEdit) -> bool {
        let Some(ingredient) = self
            .ingredients
            .as_mut()
            .and_then(|list| list.get_mut(index))
        else {
            return false;
        };

        match edit {
            IngredientEdit::Name(name) => ingredient.name = name,
            IngredientEdit::Quantity(quantity) => ingredient.quantity = Some(quantity),
            IngredientEdit::Unit(unit) => ingredient.unit = Some(unit),
        }
        true
    }
}
