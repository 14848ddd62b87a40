use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One recipe entry: ingredient name, display color, and how many parts
/// of the drink it makes up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

/// Full projection of a drink: id, title, decoded recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn summary(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// Summary projection for the public listing: id and title only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkSummary {
    pub id: i64,
    pub title: String,
}

/// Raw table row. The recipe column holds serialized JSON; rows decode
/// into [`Drink`] on the way out of the store.
#[derive(Debug, FromRow)]
pub(crate) struct DrinkRow {
    pub id: i64,
    pub title: String,
    pub recipe: String,
}

impl DrinkRow {
    pub(crate) fn decode(self) -> Result<Drink, serde_json::Error> {
        Ok(Drink {
            id: self.id,
            title: self.title,
            recipe: serde_json::from_str(&self.recipe)?,
        })
    }
}
