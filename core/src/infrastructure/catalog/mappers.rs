use crate::{
    domain::{
        allergen::entities::{Allergen, AllergenFlag},
        dish::entities::Dish,
    },
    infrastructure::catalog::records::{MenuItemRecord, RawFlag},
};

impl From<&RawFlag> for AllergenFlag {
    fn from(raw: &RawFlag) -> Self {
        match raw {
            RawFlag::Bool(true) => AllergenFlag::Present,
            RawFlag::Bool(false) => AllergenFlag::Absent,
            RawFlag::Text(text) => match text.trim() {
                t if t.eq_ignore_ascii_case("y") => AllergenFlag::Present,
                t if t.eq_ignore_ascii_case("n") => AllergenFlag::Absent,
                _ => AllergenFlag::Unspecified,
            },
            RawFlag::Other(_) => AllergenFlag::Unspecified,
        }
    }
}

fn flag(raw: Option<&RawFlag>) -> AllergenFlag {
    raw.map(AllergenFlag::from).unwrap_or_default()
}

impl From<&MenuItemRecord> for Dish {
    fn from(record: &MenuItemRecord) -> Self {
        // Older exports only carry the combined nuts column
        let tree_nuts = match flag(record.contains_tree_nuts.as_ref()) {
            AllergenFlag::Unspecified => flag(record.contains_nuts.as_ref()),
            known => known,
        };

        let flags = [
            (Allergen::Dairy, flag(record.contains_dairy.as_ref())),
            (Allergen::Egg, flag(record.contains_egg.as_ref())),
            (Allergen::Gluten, flag(record.contains_gluten.as_ref())),
            (Allergen::Shellfish, flag(record.contains_shellfish.as_ref())),
            (Allergen::Fish, flag(record.contains_fish.as_ref())),
            (Allergen::Soy, flag(record.contains_soy.as_ref())),
            (Allergen::Peanut, flag(record.contains_peanuts.as_ref())),
            (Allergen::TreeNut, tree_nuts),
            (Allergen::Sesame, flag(record.contains_sesame.as_ref())),
            (Allergen::Msg, flag(record.contains_msg.as_ref())),
        ];

        let ingredients = record
            .ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            id: record.id.trim().to_string(),
            name: record.dish_name.trim().to_string(),
            category: record.category.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            ingredients,
            allergen_flags: flags.into_iter().collect(),
            cannot_be_made_safe_notes: record
                .cannot_be_made_safe_notes
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl From<MenuItemRecord> for Dish {
    fn from(record: MenuItemRecord) -> Self {
        Self::from(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> MenuItemRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flags_accept_letters_booleans_and_blanks() {
        let dish = Dish::from(record(
            r#"{
                "id": "caesar",
                "dish_name": "Caesar Salad",
                "contains_dairy": "Y",
                "contains_egg": true,
                "contains_gluten": "n",
                "contains_fish": false,
                "contains_soy": "",
                "contains_sesame": null,
                "contains_msg": "maybe"
            }"#,
        ));

        assert_eq!(dish.allergen_flags[&Allergen::Dairy], AllergenFlag::Present);
        assert_eq!(dish.allergen_flags[&Allergen::Egg], AllergenFlag::Present);
        assert_eq!(dish.allergen_flags[&Allergen::Gluten], AllergenFlag::Absent);
        assert_eq!(dish.allergen_flags[&Allergen::Fish], AllergenFlag::Absent);
        assert_eq!(dish.allergen_flags[&Allergen::Soy], AllergenFlag::Unspecified);
        assert_eq!(dish.allergen_flags[&Allergen::Sesame], AllergenFlag::Unspecified);
        assert_eq!(dish.allergen_flags[&Allergen::Msg], AllergenFlag::Unspecified);
        assert_eq!(dish.allergen_flags[&Allergen::Shellfish], AllergenFlag::Unspecified);
    }

    #[test]
    fn test_unexpected_flag_values_are_unspecified() {
        let dish = Dish::from(record(
            r#"{
                "id": "chowder",
                "dish_name": "Clam Chowder",
                "ticket_code": "CHWD",
                "contains_dairy": 1,
                "contains_shellfish": { "value": "Y" },
                "contains_gluten": ["Y"],
                "contains_fish": "N"
            }"#,
        ));

        assert_eq!(dish.allergen_flags[&Allergen::Dairy], AllergenFlag::Unspecified);
        assert_eq!(dish.allergen_flags[&Allergen::Shellfish], AllergenFlag::Unspecified);
        assert_eq!(dish.allergen_flags[&Allergen::Gluten], AllergenFlag::Unspecified);
        assert_eq!(dish.allergen_flags[&Allergen::Fish], AllergenFlag::Absent);
    }

    #[test]
    fn test_nuts_column_backs_up_tree_nuts() {
        let legacy = Dish::from(record(
            r#"{"id": "pie", "dish_name": "Pecan Pie", "contains_nuts": "Y"}"#,
        ));
        let explicit = Dish::from(record(
            r#"{
                "id": "pie",
                "dish_name": "Pecan Pie",
                "contains_nuts": "Y",
                "contains_tree_nuts": "N"
            }"#,
        ));

        assert_eq!(legacy.allergen_flags[&Allergen::TreeNut], AllergenFlag::Present);
        assert_eq!(explicit.allergen_flags[&Allergen::TreeNut], AllergenFlag::Absent);
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let dish = Dish::from(record(
            r#"{
                "id": " burger ",
                "dish_name": "Classic Burger ",
                "category": "Sandwiches",
                "ingredients": [" brioche bun", "", "beef patty"],
                "cannot_be_made_safe_notes": "  "
            }"#,
        ));

        assert_eq!(dish.id, "burger");
        assert_eq!(dish.name, "Classic Burger");
        assert_eq!(dish.ingredients, vec!["brioche bun", "beef patty"]);
        assert!(dish.cannot_be_made_safe_notes.is_empty());
    }
}
