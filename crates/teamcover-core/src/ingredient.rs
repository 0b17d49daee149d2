use crate::InputError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of distinct ingredients; the length of every ingredient vector.
pub const INGREDIENT_COUNT: usize = 19;

/// An ingredient, in fixed id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Ingredient {
    Apple,
    Milk,
    Honey,
    Sausage,
    Ginger,
    Herb,
    Tomato,
    Potato,
    Mushroom,
    Soybeans,
    Oil,
    Egg,
    Tail,
    Cacao,
    Leek,
    Corn,
    Coffee,
    Pumpkin,
    Avocado,
}

impl Ingredient {
    /// All ingredients, indexed by id
    pub const ALL: [Ingredient; INGREDIENT_COUNT] = [
        Ingredient::Apple,
        Ingredient::Milk,
        Ingredient::Honey,
        Ingredient::Sausage,
        Ingredient::Ginger,
        Ingredient::Herb,
        Ingredient::Tomato,
        Ingredient::Potato,
        Ingredient::Mushroom,
        Ingredient::Soybeans,
        Ingredient::Oil,
        Ingredient::Egg,
        Ingredient::Tail,
        Ingredient::Cacao,
        Ingredient::Leek,
        Ingredient::Corn,
        Ingredient::Coffee,
        Ingredient::Pumpkin,
        Ingredient::Avocado,
    ];

    /// Slot of this ingredient in an ingredient vector
    #[inline]
    pub fn id(self) -> usize {
        self as usize
    }

    pub fn from_id(id: usize) -> Option<Ingredient> {
        Self::ALL.get(id).copied()
    }

    /// Static per-unit weight used to rank unsatisfied requirements.
    pub fn value(self) -> u32 {
        match self {
            Ingredient::Apple => 90,
            Ingredient::Milk => 98,
            Ingredient::Honey => 101,
            Ingredient::Sausage => 103,
            Ingredient::Ginger => 109,
            Ingredient::Herb => 130,
            Ingredient::Tomato => 110,
            Ingredient::Potato => 124,
            Ingredient::Mushroom => 167,
            Ingredient::Soybeans => 100,
            Ingredient::Oil => 121,
            Ingredient::Egg => 115,
            Ingredient::Tail => 342,
            Ingredient::Cacao => 151,
            Ingredient::Leek => 185,
            Ingredient::Corn => 140,
            Ingredient::Coffee => 153,
            Ingredient::Pumpkin => 250,
            Ingredient::Avocado => 162,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Ingredient::Apple => "Fancy Apple",
            Ingredient::Milk => "Moomoo Milk",
            Ingredient::Honey => "Honey",
            Ingredient::Sausage => "Bean Sausage",
            Ingredient::Ginger => "Warming Ginger",
            Ingredient::Herb => "Fiery Herb",
            Ingredient::Tomato => "Snoozy Tomato",
            Ingredient::Potato => "Soft Potato",
            Ingredient::Mushroom => "Tasty Mushroom",
            Ingredient::Soybeans => "Greengrass Soybeans",
            Ingredient::Oil => "Pure Oil",
            Ingredient::Egg => "Fancy Egg",
            Ingredient::Tail => "Slowpoke Tail",
            Ingredient::Cacao => "Soothing Cacao",
            Ingredient::Leek => "Large Leek",
            Ingredient::Corn => "Greengrass Corn",
            Ingredient::Coffee => "Rousing Coffee",
            Ingredient::Pumpkin => "Plump Pumpkin",
            Ingredient::Avocado => "Glossy Avocado",
        }
    }

    /// Lower-case key used in recipes, pool files and JSON output
    pub fn short_name(self) -> &'static str {
        match self {
            Ingredient::Apple => "apple",
            Ingredient::Milk => "milk",
            Ingredient::Honey => "honey",
            Ingredient::Sausage => "sausage",
            Ingredient::Ginger => "ginger",
            Ingredient::Herb => "herb",
            Ingredient::Tomato => "tomato",
            Ingredient::Potato => "potato",
            Ingredient::Mushroom => "mushroom",
            Ingredient::Soybeans => "soybeans",
            Ingredient::Oil => "oil",
            Ingredient::Egg => "egg",
            Ingredient::Tail => "tail",
            Ingredient::Cacao => "cacao",
            Ingredient::Leek => "leek",
            Ingredient::Corn => "corn",
            Ingredient::Coffee => "coffee",
            Ingredient::Pumpkin => "pumpkin",
            Ingredient::Avocado => "avocado",
        }
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Ingredient {
    type Err = InputError;

    /// Accepts the short name or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|ing| {
                ing.short_name().eq_ignore_ascii_case(wanted)
                    || ing.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| InputError::UnknownIngredient(wanted.to_string()))
    }
}

impl From<Ingredient> for &'static str {
    fn from(ingredient: Ingredient) -> Self {
        ingredient.short_name()
    }
}

impl TryFrom<String> for Ingredient {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
