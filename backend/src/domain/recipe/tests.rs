//! Unit tests for recipe documents.

use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

use super::*;

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn qty(raw: &str) -> Option<Quantity> {
    Some(raw.parse().expect("numeric fixture quantity"))
}

#[fixture]
fn risotto() -> Recipe {
    Recipe::new(
        UserId::random(),
        RecipeContents {
            name: "Risotto".to_owned(),
            lines: vec![
                IngredientLine::new("Rice", qty("2"), "cups"),
                IngredientLine::new("Parmesan", qty("50"), "g").tombstoned(),
                IngredientLine::new("Stock", None, ""),
            ],
            notes: "stir often".to_owned(),
        },
        fixed_time(),
    )
}

#[rstest]
#[case(IngredientLine::new("Rice", qty("1"), "cups"), true)]
#[case(IngredientLine::new("Rice", None, "cups"), false)]
#[case(IngredientLine::new("Rice", qty("1"), ""), false)]
#[case(IngredientLine::new("", qty("1"), "cups"), false)]
#[case(IngredientLine::new("Rice", qty("1"), "cups").tombstoned(), false)]
fn consolidation_predicate(#[case] line: IngredientLine, #[case] expected: bool) {
    assert_eq!(line.is_consolidatable(), expected);
}

#[rstest]
fn whitespace_name_is_not_active() {
    assert!(!IngredientLine::new("   ", qty("1"), "cups").is_active());
}

#[rstest]
fn new_recipe_starts_unused(risotto: Recipe) {
    assert_eq!(risotto.times_added_to_shopping_list, 0);
    assert!(!risotto.deleted);
    assert_eq!(risotto.created_at, risotto.updated_at);
}

#[rstest]
fn active_lines_skip_tombstones(risotto: Recipe) {
    let names: Vec<&str> = risotto
        .active_lines()
        .map(|line| line.ingredient_name.as_str())
        .collect();
    assert_eq!(names, vec!["Rice", "Stock"]);
}

#[rstest]
fn apply_contents_keeps_creation_metadata(mut risotto: Recipe) {
    risotto.times_added_to_shopping_list = 4;
    let later = fixed_time() + Duration::hours(2);
    risotto.apply_contents(
        RecipeContents {
            name: "Mushroom risotto".to_owned(),
            lines: vec![IngredientLine::new("Mushrooms", qty("200"), "g")],
            notes: String::new(),
        },
        later,
    );

    assert_eq!(risotto.name, "Mushroom risotto");
    assert_eq!(risotto.times_added_to_shopping_list, 4);
    assert_eq!(risotto.created_at, fixed_time());
    assert_eq!(risotto.updated_at, later);
}

#[rstest]
#[case("rice", true)]
#[case("RI", true)]
#[case("parmesan", false)]
#[case("saffron", false)]
#[case("  ", true)]
fn ingredient_search(risotto: Recipe, #[case] term: &str, #[case] expected: bool) {
    assert_eq!(risotto.uses_ingredient(term), expected);
}

#[rstest]
fn summaries_are_sorted_and_exclude_deleted(risotto: Recipe) {
    let owner = risotto.owner_id.clone();
    let contents = |name: &str| RecipeContents {
        name: name.to_owned(),
        lines: vec![IngredientLine::new("Salt", qty("1"), "tsp")],
        notes: String::new(),
    };
    let mut gone = Recipe::new(owner.clone(), contents("Apple pie"), fixed_time());
    gone.deleted = true;
    let recipes = vec![
        risotto,
        Recipe::new(owner.clone(), contents("banana bread"), fixed_time()),
        gone,
        Recipe::new(owner, contents("Aioli"), fixed_time()),
    ];

    let names: Vec<String> = recipe_summaries(&recipes)
        .into_iter()
        .map(|summary| summary.name)
        .collect();
    assert_eq!(names, vec!["Aioli", "banana bread", "Risotto"]);
}

#[rstest]
fn deserialises_stored_document_with_string_quantities() {
    let json = serde_json::json!({
        "id": "6d1f7f8e-7d4b-4a8e-9d0c-0a3f1f0e2b11",
        "name": "Pilaf",
        "ownerId": "uid-1",
        "lines": [
            { "ingredientName": "Rice", "quantity": "1.5", "unit": "cups", "deleted": false },
            { "ingredientName": "Salt", "quantity": 1, "unit": "tsp" }
        ],
        "createdAt": "2026-03-01T09:00:00Z",
        "updatedAt": "2026-03-01T09:00:00Z"
    });

    let recipe: Recipe = serde_json::from_value(json).expect("stored recipe");
    assert_eq!(recipe.lines.len(), 2);
    assert_eq!(recipe.times_added_to_shopping_list, 0);
    assert_eq!(recipe.lines[0].quantity, qty("1.5"));
    assert_eq!(recipe.lines[1].quantity, qty("1"));
}

#[rstest]
fn recipe_ids_serialise_as_bare_uuids() {
    let id = RecipeId::random();
    let json = serde_json::to_value(id).expect("serialise");
    let text = json.as_str().expect("string form");
    assert_eq!(text, id.to_string());
    assert!(Uuid::parse_str(text).is_ok());
    let parsed: RecipeId = serde_json::from_value(json).expect("deserialise");
    assert_eq!(parsed, id);
}
