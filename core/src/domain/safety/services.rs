use tracing::{error, instrument, warn};

use crate::domain::{
    allergen::{
        entities::{Allergen, AllergenFlag},
        matching::{custom_term_variants, has_phrase},
    },
    common::{ReviewConfig, entities::app_errors::CoreError, services::Service},
    dish::{entities::Dish, ports::DishCatalog},
    overrides::{
        entities::{OverrideKind, OverrideLookup, OverrideMode, OverrideRecord, OverrideStats},
        ports::OverrideStore,
    },
    safety::{
        clauses::{APPLIED_LAYER_PHRASES, clauses_after},
        conflicts::reject_conflicting_substitutions,
        consolidation::consolidate,
        detection::{Target, detect_mentions, mention_texts},
        entities::{
            EvaluationResult, Exclusion, ExclusionResult, Instruction, SafetyStatus, VerdictBasis,
        },
        feasibility::analyze,
        garnish::is_removable,
        knowledge::SafetyKnowledge,
        ports::DishSafetyService,
        substitutions::generate,
        value_objects::{EvaluateDishInput, EvaluateInlineDishInput, Mention, MentionSource},
    },
};

const UNVERIFIED_REASON: &str = "no verified allergen record for this dish";

// Removing one member of a family is pointless when another sits in the base.
const RELATED_INGREDIENTS: &[&[&str]] = &[
    &[
        "onion", "onions", "garlic", "shallot", "shallots", "scallion", "scallions", "chive",
        "chives", "leek", "leeks", "green onion",
    ],
    &["pepper", "peppers", "peppercorn", "peppercorns"],
];

/// Evaluates dishes against allergen and free-text exclusions.
#[derive(Debug, Clone)]
pub struct SafetyEvaluator<S: OverrideStore> {
    knowledge: SafetyKnowledge,
    overrides: S,
    review: ReviewConfig,
}

impl<S: OverrideStore> SafetyEvaluator<S> {
    pub fn new(knowledge: SafetyKnowledge, overrides: S, review: ReviewConfig) -> Self {
        Self {
            knowledge,
            overrides,
            review,
        }
    }

    pub fn knowledge(&self) -> &SafetyKnowledge {
        &self.knowledge
    }

    pub fn overrides(&self) -> &S {
        &self.overrides
    }

    #[instrument(skip(self, dish), fields(dish_id = %dish.id))]
    pub fn evaluate(
        &self,
        dish: &Dish,
        allergens: &[Allergen],
        custom_exclusions: &[String],
    ) -> Result<EvaluationResult, CoreError> {
        // 1. Reject malformed dishes before looking at anything else
        dish.validate()?;

        // 2. One result per distinct exclusion, in request order
        let mut results: Vec<ExclusionResult> = Vec::new();

        let mut seen: Vec<Allergen> = Vec::new();
        for allergen in allergens {
            if seen.contains(allergen) {
                continue;
            }
            seen.push(*allergen);
            results.push(self.evaluate_allergen(dish, *allergen));
        }

        let mut seen_terms: Vec<String> = Vec::new();
        for term in custom_exclusions {
            let key = term.trim().to_lowercase();
            if key.is_empty() || seen_terms.contains(&key) {
                continue;
            }
            seen_terms.push(key);

            let result = self.evaluate_custom(dish, term).map_err(|e| {
                error!(
                    "Failed to evaluate dish {} for {:?} and custom exclusion '{}': {}",
                    dish.id, allergens, term, e
                );
                e
            })?;
            results.push(result);
        }

        // 3. Annotated dishes cannot be changed whatever the source of the verdict
        if let Some(notes) = dish.cannot_be_made_safe() {
            results.iter_mut().for_each(|r| apply_annotation(r, notes));
        }

        // 4. A replacement must not bring back another exclusion
        reject_conflicting_substitutions(&mut results, &self.knowledge);

        // 5. One merged list for the kitchen
        let consolidated = consolidate(&results, &self.knowledge);

        let override_mode = if self.overrides.is_live() {
            OverrideMode::Live
        } else {
            OverrideMode::StaticFallback
        };

        Ok(EvaluationResult::new(
            dish.id.clone(),
            dish.name.clone(),
            results,
            override_mode,
            self.review.needs_review(&dish.category),
        )
        .with_consolidated(consolidated))
    }

    fn evaluate_allergen(&self, dish: &Dish, allergen: Allergen) -> ExclusionResult {
        let target = Target::allergen(allergen, &self.knowledge.lexicon);
        let flag = dish.flag(allergen);
        let mentions = detect_mentions(dish, &target, &self.knowledge.composites);
        let has_evidence = flag.is_present() || !mentions.is_empty();
        let reported_flag = allergen.has_catalog_flag().then_some(flag);

        // A live store is authoritative: no record there means nobody checked.
        let lookup = match self.overrides.lookup(&dish.id, allergen) {
            OverrideLookup::NotFound if self.overrides.is_live() => OverrideLookup::Unverified,
            other => other,
        };

        match lookup {
            OverrideLookup::Record(record) => {
                from_override(dish, allergen, reported_flag, &mentions, has_evidence, record)
            }
            OverrideLookup::Unverified => ExclusionResult {
                exclusion: target.exclusion().clone(),
                flag: reported_flag,
                found_ingredients: mention_texts(&mentions),
                status: if has_evidence {
                    SafetyStatus::Unsafe
                } else {
                    SafetyStatus::Unverified
                },
                can_be_modified: false,
                instructions: vec![Instruction::Verify {
                    reason: UNVERIFIED_REASON.to_string(),
                }],
                basis: VerdictBasis::Unverified,
                rejected_substitutions: Vec::new(),
            },
            OverrideLookup::NotFound => {
                self.automatic(dish, &target, reported_flag, &mentions, has_evidence)
            }
        }
    }

    fn evaluate_custom(&self, dish: &Dish, term: &str) -> Result<ExclusionResult, CoreError> {
        let target = Target::custom(term)?;
        let mentions = detect_mentions(dish, &target, &self.knowledge.composites);
        let has_evidence = !mentions.is_empty();

        let mut result = self.automatic(dish, &target, None, &mentions, has_evidence);

        if result.status == SafetyStatus::Unsafe && result.can_be_modified {
            if let Some(related) = related_in_base(dish, &target) {
                result.can_be_modified = false;
                result.instructions = vec![Instruction::not_possible(format!(
                    "{} is also in the main preparation",
                    related
                ))];
            }
        }

        Ok(result)
    }

    fn automatic(
        &self,
        dish: &Dish,
        target: &Target<'_>,
        flag: Option<AllergenFlag>,
        mentions: &[Mention],
        has_evidence: bool,
    ) -> ExclusionResult {
        let verdict = analyze(dish, target, mentions, &self.knowledge);

        let (status, can_be_modified, instructions) = if has_evidence {
            let plan = generate(dish, target, &verdict, mentions);
            (SafetyStatus::Unsafe, plan.can_be_modified, plan.instructions)
        } else {
            (SafetyStatus::Safe, verdict.modifiable, Vec::new())
        };

        ExclusionResult {
            exclusion: target.exclusion().clone(),
            flag,
            found_ingredients: mention_texts(mentions),
            status,
            can_be_modified,
            instructions,
            basis: VerdictBasis::Automatic,
            rejected_substitutions: Vec::new(),
        }
    }
}

fn from_override(
    dish: &Dish,
    allergen: Allergen,
    flag: Option<AllergenFlag>,
    mentions: &[Mention],
    has_evidence: bool,
    record: OverrideRecord,
) -> ExclusionResult {
    if record.kind() == OverrideKind::NoChanges && has_evidence {
        warn!(
            "Override for {} ({}) says no changes but the dish mentions {:?}",
            dish.id,
            allergen.id(),
            mention_texts(mentions)
        );
    }

    let unsafe_ = has_evidence || !record.instructions.is_empty() || !record.can_be_modified;

    let instructions = if record.kind() == OverrideKind::NotModifiable
        && record.instructions.is_empty()
    {
        vec![Instruction::not_possible(format!(
            "{} cannot be removed from this dish",
            allergen.label()
        ))]
    } else {
        record
            .instructions
            .into_iter()
            .map(Instruction::Verbatim)
            .collect()
    };

    ExclusionResult {
        exclusion: Exclusion::Allergen(allergen),
        flag,
        found_ingredients: mention_texts(mentions),
        status: if unsafe_ {
            SafetyStatus::Unsafe
        } else {
            SafetyStatus::Safe
        },
        can_be_modified: record.can_be_modified,
        instructions,
        basis: VerdictBasis::Override,
        rejected_substitutions: Vec::new(),
    }
}

fn apply_annotation(result: &mut ExclusionResult, notes: &str) {
    result.can_be_modified = false;

    let has_not_possible = result
        .instructions
        .iter()
        .any(|i| matches!(i, Instruction::NotPossible { .. }));
    if result.status == SafetyStatus::Unsafe && !has_not_possible {
        result.instructions.insert(0, Instruction::not_possible(notes));
    }
}

/// First member of the target's ingredient family that sits in the base of
/// the dish rather than on top of it.
fn related_in_base(dish: &Dish, target: &Target<'_>) -> Option<String> {
    let term = match target.exclusion() {
        Exclusion::Custom(term) => term.to_lowercase(),
        Exclusion::Allergen(_) => return None,
    };
    let variants = custom_term_variants(&term);

    let family = RELATED_INGREDIENTS.iter().find(|family| {
        family
            .iter()
            .any(|member| variants.iter().any(|v| has_phrase(v, member)))
    })?;

    let applied_layers = clauses_after(&dish.description, APPLIED_LAYER_PHRASES);

    family
        .iter()
        .filter(|member| !target.matches(member))
        .find(|member| {
            let in_description = has_phrase(&dish.description, member)
                && !is_removable(
                    dish,
                    &Mention::new(**member, MentionSource::Description),
                    &applied_layers,
                );
            let in_ingredients = dish.ingredients.iter().any(|i| has_phrase(i, member));
            in_description || in_ingredients
        })
        .map(|member| member.to_string())
}

impl<D, O> DishSafetyService for Service<D, O>
where
    D: DishCatalog,
    O: OverrideStore,
{
    async fn evaluate_dish(&self, input: EvaluateDishInput) -> Result<EvaluationResult, CoreError> {
        let dish = self
            .dish_catalog
            .get_dish(input.dish_id.clone())
            .await?
            .ok_or_else(|| {
                warn!("Dish {} not found in catalog", input.dish_id);
                CoreError::NotFound
            })?;

        self.evaluator
            .evaluate(&dish, &input.allergens, &input.custom_exclusions)
    }

    async fn evaluate_inline_dish(
        &self,
        input: EvaluateInlineDishInput,
    ) -> Result<EvaluationResult, CoreError> {
        self.evaluator
            .evaluate(&input.dish, &input.allergens, &input.custom_exclusions)
    }

    async fn list_dishes(&self) -> Result<Vec<Dish>, CoreError> {
        self.dish_catalog.list_dishes().await
    }

    async fn override_stats(&self) -> Result<OverrideStats, CoreError> {
        Ok(self.evaluator.overrides().stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        overrides::{
            entities::OverrideLookup, ports::MockOverrideStore, snapshot::OverrideSnapshot,
            static_rules::StaticOverrideTable,
        },
        safety::{
            entities::{MESSAGE_NOT_MODIFIABLE, MESSAGE_UNVERIFIED},
            knowledge::shared_knowledge,
        },
    };

    struct StubCatalog {
        dish: Option<Dish>,
    }

    impl DishCatalog for StubCatalog {
        async fn get_dish(&self, dish_id: String) -> Result<Option<Dish>, CoreError> {
            Ok(self.dish.clone().filter(|d| d.id == dish_id))
        }

        async fn list_dishes(&self) -> Result<Vec<Dish>, CoreError> {
            Ok(self.dish.clone().into_iter().collect())
        }
    }

    fn offline_evaluator() -> SafetyEvaluator<OverrideSnapshot> {
        SafetyEvaluator::new(
            shared_knowledge().clone(),
            OverrideSnapshot::not_loaded(StaticOverrideTable::default()),
            ReviewConfig::default(),
        )
    }

    fn mocked_evaluator(store: MockOverrideStore) -> SafetyEvaluator<MockOverrideStore> {
        SafetyEvaluator::new(
            shared_knowledge().clone(),
            store,
            ReviewConfig::default(),
        )
    }

    fn caesar_salad() -> Dish {
        Dish::new("caesar_salad", "Caesar Salad")
            .with_category("Salads")
            .with_description(
                "Crisp romaine tossed with caesar dressing, garlic croutons and shaved parmesan.",
            )
    }

    fn grilled_salmon() -> Dish {
        Dish::new("grilled_salmon", "Grilled Salmon")
            .with_category("Seafood")
            .with_description("Atlantic salmon brushed with melted butter and grilled.")
    }

    fn lines(result: &ExclusionResult) -> Vec<String> {
        result.instruction_lines()
    }

    #[test]
    fn test_caesar_salad_shellfish() {
        let evaluation = offline_evaluator()
            .evaluate(&caesar_salad(), &[Allergen::Shellfish], &[])
            .unwrap();

        let result = &evaluation.results[0];
        assert_eq!(result.status, SafetyStatus::Unsafe);
        assert!(!result.can_be_modified);
        let line = lines(result).join(" ");
        assert!(line.contains("NOT POSSIBLE"));
        assert!(line.contains("dressing"));
        assert_eq!(evaluation.message, MESSAGE_NOT_MODIFIABLE);
    }

    #[test]
    fn test_grilled_salmon_butter() {
        let evaluation = offline_evaluator()
            .evaluate(&grilled_salmon(), &[Allergen::Dairy], &[])
            .unwrap();

        let result = &evaluation.results[0];
        assert_eq!(result.flag, Some(AllergenFlag::Unspecified));
        assert_eq!(result.status, SafetyStatus::Unsafe);
        assert!(result.can_be_modified);
        assert_eq!(lines(result), vec!["NO butter (use oil)"]);
        assert!(evaluation.needs_review);
    }

    #[test]
    fn test_mac_and_cheese_core_ingredient() {
        let dish = Dish::new("mac_and_cheese", "Mac and Cheese")
            .with_description("Elbow macaroni baked with cheddar and cream.")
            .with_flag(Allergen::Dairy, AllergenFlag::Present);

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[Allergen::Dairy], &[])
            .unwrap();

        let result = &evaluation.results[0];
        assert!(!result.can_be_modified);
        assert!(lines(result)[0].contains("core ingredient"));
    }

    #[test]
    fn test_unflagged_ingredient_list_is_unsafe() {
        let dish = Dish::new("pan_seared_salmon", "Pan Seared Salmon")
            .with_category("Seafood")
            .with_description("Seared salmon fillet.")
            .with_ingredients(["salmon", "butter", "wheat flour"]);

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[Allergen::Dairy, Allergen::Gluten], &[])
            .unwrap();

        assert_eq!(evaluation.overall_status, SafetyStatus::Unsafe);
        let dairy = &evaluation.results[0];
        assert_eq!(dairy.flag, Some(AllergenFlag::Unspecified));
        assert_eq!(dairy.status, SafetyStatus::Unsafe);
        assert_eq!(dairy.found_ingredients, vec!["butter"]);
        let gluten = &evaluation.results[1];
        assert_eq!(gluten.status, SafetyStatus::Unsafe);
        assert_eq!(gluten.found_ingredients, vec!["wheat flour"]);
    }

    #[test]
    fn test_not_modifiable_override_without_instructions() {
        let mut store = MockOverrideStore::new();
        store.expect_lookup().returning(|_, allergen| match allergen {
            Allergen::Dairy => {
                OverrideLookup::Record(OverrideRecord::new(Vec::<String>::new(), false))
            }
            _ => OverrideLookup::NotFound,
        });
        store.expect_is_live().return_const(false);

        let dish = Dish::new("mac_and_cheese", "Mac and Cheese")
            .with_description("Elbow macaroni baked with cheddar and cream.");

        let evaluation = mocked_evaluator(store)
            .evaluate(&dish, &[Allergen::Dairy], &[])
            .unwrap();

        let result = &evaluation.results[0];
        assert_eq!(result.status, SafetyStatus::Unsafe);
        assert!(!result.can_be_modified);
        assert_eq!(result.basis, VerdictBasis::Override);
        assert_eq!(
            lines(result),
            vec!["NOT POSSIBLE - Dairy cannot be removed from this dish"]
        );
        assert_eq!(evaluation.message, MESSAGE_NOT_MODIFIABLE);
        assert_eq!(
            evaluation.ticket_lines(),
            vec![
                "=== MAC AND CHEESE ===",
                "DAIRY:",
                "  NOT POSSIBLE - Dairy cannot be removed from this dish",
            ]
        );
    }

    #[test]
    fn test_consolidated_lines_across_allergens() {
        let mut store = MockOverrideStore::new();
        store.expect_lookup().returning(|_, allergen| match allergen {
            Allergen::Dairy => OverrideLookup::Record(OverrideRecord::new(
                ["NO cheese", "NO butter on bun"],
                true,
            )),
            Allergen::Egg => OverrideLookup::Record(OverrideRecord::new(
                ["NO butter on bun", "NO mayonnaise", "SUB gluten-free bun"],
                true,
            )),
            _ => OverrideLookup::NotFound,
        });
        store.expect_is_live().return_const(true);

        let dish = Dish::new("hamburger", "Hamburger")
            .with_category("Sandwiches")
            .with_description("Beef patty with cheddar and mayo on a toasted bun.");

        let evaluation = mocked_evaluator(store)
            .evaluate(&dish, &[Allergen::Dairy, Allergen::Egg], &[])
            .unwrap();

        let consolidated = &evaluation.consolidated;
        assert_eq!(
            consolidated.lines(),
            vec!["NO mayonnaise", "NO cheese", "NO butter on bun"]
        );
        assert_eq!(consolidated.bread, None);
        assert_eq!(consolidated.rejected[0].option, "SUB gluten-free bun");
    }

    #[test]
    fn test_live_store_without_record_is_unverified() {
        let mut store = MockOverrideStore::new();
        store
            .expect_lookup()
            .returning(|_, _| OverrideLookup::NotFound);
        store.expect_is_live().return_const(true);

        let dish = Dish::new("new_seasonal_special", "New Seasonal Special")
            .with_description("Chef's rotating creation.");

        let evaluation = mocked_evaluator(store)
            .evaluate(&dish, &[Allergen::TreeNut], &[])
            .unwrap();

        assert_eq!(evaluation.overall_status, SafetyStatus::Unverified);
        assert_eq!(evaluation.message, MESSAGE_UNVERIFIED);
        assert_eq!(evaluation.override_mode, OverrideMode::Live);
        assert_eq!(evaluation.results[0].basis, VerdictBasis::Unverified);
    }

    #[test]
    fn test_static_fallback_without_record_is_automatic() {
        let dish = Dish::new("new_seasonal_special", "New Seasonal Special")
            .with_description("Chef's rotating creation.");

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[Allergen::TreeNut], &[])
            .unwrap();

        assert_eq!(evaluation.overall_status, SafetyStatus::Safe);
        assert_eq!(evaluation.override_mode, OverrideMode::StaticFallback);
    }

    #[test]
    fn test_present_flag_is_always_unsafe() {
        let dish = Dish::new("mystery", "House Special")
            .with_flag(Allergen::Soy, AllergenFlag::Present);

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[Allergen::Soy], &[])
            .unwrap();

        assert_eq!(evaluation.results[0].status, SafetyStatus::Unsafe);
        assert_eq!(evaluation.results[0].flag, Some(AllergenFlag::Present));
    }

    #[test]
    fn test_annotation_blocks_every_result() {
        let dish = grilled_salmon().with_cannot_be_made_safe_notes("Cooked in shared fryer oil");

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[Allergen::Dairy, Allergen::Fish, Allergen::Peanut], &[])
            .unwrap();

        for result in &evaluation.results {
            assert!(!result.can_be_modified);
            if result.status == SafetyStatus::Unsafe {
                assert!(lines(result)[0].starts_with("NOT POSSIBLE"));
            }
        }
    }

    #[test]
    fn test_override_record_is_verbatim_and_idempotent() {
        let mut store = MockOverrideStore::new();
        store.expect_lookup().returning(|_, allergen| match allergen {
            Allergen::Dairy => OverrideLookup::Record(OverrideRecord::new(
                ["NO butter", "SUB olive oil for basting"],
                true,
            )),
            _ => OverrideLookup::NotFound,
        });
        store.expect_is_live().return_const(false);
        let evaluator = mocked_evaluator(store);

        let first = evaluator.evaluate(&grilled_salmon(), &[Allergen::Dairy], &[]).unwrap();
        let second = evaluator.evaluate(&grilled_salmon(), &[Allergen::Dairy], &[]).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            lines(&first.results[0]),
            vec!["NO butter", "SUB olive oil for basting"]
        );
        assert_eq!(first.results[0].basis, VerdictBasis::Override);
    }

    #[test]
    fn test_no_changes_override_without_evidence_is_safe() {
        let mut store = MockOverrideStore::new();
        store
            .expect_lookup()
            .returning(|_, _| {
                OverrideLookup::Record(OverrideRecord::new(Vec::<String>::new(), true))
            });
        store.expect_is_live().return_const(true);

        let dish = Dish::new("baked_potato", "Baked Potato").with_description("Russet potato.");

        let evaluation = mocked_evaluator(store)
            .evaluate(&dish, &[Allergen::Egg], &[])
            .unwrap();

        assert!(evaluation.is_safe());
        assert_eq!(evaluation.message, "No Changes");
    }

    #[test]
    fn test_composite_only_signal_is_unsafe() {
        let dish = Dish::new("fish_tacos", "Fish Tacos")
            .with_description("Flour tortillas with slaw.")
            .with_ingredients(["cod", "tartar sauce"]);

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[Allergen::Egg], &[])
            .unwrap();

        let result = &evaluation.results[0];
        assert_eq!(result.status, SafetyStatus::Unsafe);
        assert_eq!(result.found_ingredients, vec!["tartar sauce"]);
    }

    #[test]
    fn test_steak_house_butters_are_removable() {
        let dish = Dish::new("ribeye", "Ribeye")
            .with_category("Steaks")
            .with_description("Fourteen ounce ribeye, broiled to order.");

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[Allergen::Dairy], &[])
            .unwrap();

        let result = &evaluation.results[0];
        assert!(result.can_be_modified);
        assert_eq!(lines(result), vec!["NO pre-mark butter", "NO steak butter"]);
    }

    #[test]
    fn test_custom_exclusion_vetoed_by_related_base_ingredient() {
        let dish = Dish::new("smash_burger", "Smash Burger")
            .with_description("Beef patty seared with minced garlic, topped with crispy onions.");

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[], &["onion".to_string()])
            .unwrap();

        let result = evaluation
            .result_for(&Exclusion::Custom("onion".to_string()))
            .unwrap();
        assert_eq!(result.status, SafetyStatus::Unsafe);
        assert!(!result.can_be_modified);
        assert_eq!(
            lines(result),
            vec!["NOT POSSIBLE - garlic is also in the main preparation"]
        );
    }

    #[test]
    fn test_custom_exclusion_garnish_is_removable() {
        let dish = Dish::new("smash_burger", "Smash Burger")
            .with_description("Beef patty, topped with crispy onions.");

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[], &["Onions".to_string(), " onions ".to_string(), "  ".to_string()])
            .unwrap();

        assert_eq!(evaluation.results.len(), 1);
        assert!(evaluation.results[0].can_be_modified);
        assert_eq!(
            lines(&evaluation.results[0]),
            vec!["NO crispy onions (contains: onions)"]
        );
    }

    #[test]
    fn test_conflicting_substitution_is_rejected() {
        let dish = Dish::new("burger", "Classic Burger")
            .with_category("Burgers")
            .with_description(
                "Half-pound patty with lettuce and pickles, served with a toasted bun.",
            )
            .with_flag(Allergen::Gluten, AllergenFlag::Present);

        let evaluation = offline_evaluator()
            .evaluate(&dish, &[Allergen::Gluten, Allergen::Egg], &[])
            .unwrap();

        let gluten = evaluation
            .result_for(&Exclusion::Allergen(Allergen::Gluten))
            .unwrap();
        assert_eq!(lines(gluten), vec!["NO bun"]);
        assert_eq!(gluten.rejected_substitutions[0].replacement, "gluten-free bun");
    }

    #[test]
    fn test_malformed_dish_fails_fast() {
        let dish = Dish::new("", "Nameless");

        let result = offline_evaluator().evaluate(&dish, &[Allergen::Dairy], &[]);

        assert!(matches!(result, Err(CoreError::MalformedDish(_))));
    }

    #[test]
    fn test_ticket_for_modifiable_dish() {
        let evaluation = offline_evaluator()
            .evaluate(&grilled_salmon(), &[Allergen::Dairy, Allergen::Peanut], &[])
            .unwrap();

        assert_eq!(
            evaluation.ticket_lines(),
            vec!["=== GRILLED SALMON ===", "DAIRY:", "  NO butter (use oil)"]
        );
    }

    #[tokio::test]
    async fn test_service_evaluates_catalog_dish() {
        let catalog = StubCatalog {
            dish: Some(grilled_salmon()),
        };

        let service = Service::new(catalog, offline_evaluator());

        let evaluation = service
            .evaluate_dish(EvaluateDishInput {
                dish_id: "grilled_salmon".to_string(),
                allergens: vec![Allergen::Dairy],
                custom_exclusions: Vec::new(),
            })
            .await
            .unwrap();

        assert_eq!(evaluation.dish_name, "Grilled Salmon");
    }

    #[tokio::test]
    async fn test_service_reports_missing_dish() {
        let catalog = StubCatalog {
            dish: Some(grilled_salmon()),
        };

        let service = Service::new(catalog, offline_evaluator());

        let result = service
            .evaluate_dish(EvaluateDishInput {
                dish_id: "unknown".to_string(),
                allergens: vec![Allergen::Dairy],
                custom_exclusions: Vec::new(),
            })
            .await;

        assert!(matches!(result, Err(CoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_service_lists_catalog() {
        let service = Service::new(
            StubCatalog {
                dish: Some(grilled_salmon()),
            },
            offline_evaluator(),
        );

        let dishes = service.list_dishes().await.unwrap();

        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].id, "grilled_salmon");
    }
}
