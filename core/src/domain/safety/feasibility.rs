use crate::domain::{
    allergen::{
        entities::Allergen,
        matching::{find_phrase, has_phrase, sentences},
    },
    dish::entities::Dish,
    safety::{
        clauses::{
            APPLIED_LAYER_PHRASES, CRUST_PHRASES, MARINADE_PHRASES, any_clause_mentions,
            clauses_after,
        },
        detection::Target,
        garnish::is_removable,
        knowledge::SafetyKnowledge,
        value_objects::Mention,
    },
};

const BAKED_OR_FRIED_CUES: &[&str] = &[
    "baked in",
    "fried in",
    "deep fried",
    "deep-fried",
    "pan fried",
    "pan-fried",
    "breaded",
    "battered",
    "dredged",
    "baked together",
    "fried together",
];

const COVERING_CUES: &[&str] = &["covered", "smothered", "layered"];

const CORE_IDENTITY: &[(Allergen, &[&str])] = &[
    (
        Allergen::Dairy,
        &[
            "mac and cheese", "macaroni and cheese", "mac & cheese", "cheesecake", "creamed",
            "bisque", "au gratin", "alfredo", "grilled cheese", "fondue", "cheese curds",
        ],
    ),
    (
        Allergen::Egg,
        &["quiche", "frittata", "egg salad", "deviled eggs", "custard", "creme brulee", "meringue"],
    ),
    (
        Allergen::Gluten,
        &[
            "pasta", "linguine", "spaghetti", "fettuccine", "penne", "ravioli", "lasagna", "pizza",
            "flatbread", "pot pie", "dumplings", "tempura",
        ],
    ),
    (Allergen::Soy, &["tofu", "edamame"]),
    (Allergen::Peanut, &["peanut butter"]),
    (Allergen::TreeNut, &["pecan pie", "pesto"]),
    (Allergen::Sesame, &["tahini", "hummus"]),
    (Allergen::Tomato, &["marinara", "bruschetta", "tomato soup", "caprese"]),
    (Allergen::OnionGarlic, &["onion rings", "french onion", "garlic bread"]),
];

const SALAD_DRESSINGS: &[&str] = &[
    "citrus lime vinaigrette",
    "balsamic vinaigrette",
    "red wine vinaigrette",
    "lemon herb vinaigrette",
];

/// Which rule settled a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeasibilityRule {
    Annotation,
    MainComponent,
    AppliedLayer,
    Marinade,
    BakedOrFried,
    Crust,
    CoreIdentity,
    SoupThickener,
    EggBreakfast,
    CaesarDressing,
    PreMadeMixture,
    Salad,
    RemovableOnly,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibilityVerdict {
    pub modifiable: bool,
    pub rule: FeasibilityRule,
    pub reason: Option<String>,
    /// Clauses introduced by "brushed with" and friends, lowercase.
    pub applied_layers: Vec<String>,
    /// Dressings free of the target, for salads.
    pub safe_dressings: Vec<String>,
}

impl FeasibilityVerdict {
    fn modifiable(rule: FeasibilityRule) -> Self {
        Self {
            modifiable: true,
            rule,
            reason: None,
            applied_layers: Vec::new(),
            safe_dressings: Vec::new(),
        }
    }

    fn blocked(rule: FeasibilityRule, reason: impl Into<String>) -> Self {
        Self {
            modifiable: false,
            rule,
            reason: Some(reason.into()),
            applied_layers: Vec::new(),
            safe_dressings: Vec::new(),
        }
    }

    fn with_layers(mut self, applied_layers: Vec<String>) -> Self {
        self.applied_layers = applied_layers;
        self
    }
}

/// Decides whether the target can be taken out of the dish. Rules are
/// checked in priority order and the first one that applies wins.
pub fn analyze(
    dish: &Dish,
    target: &Target<'_>,
    mentions: &[Mention],
    knowledge: &SafetyKnowledge,
) -> FeasibilityVerdict {
    let label = target.exclusion().label();
    let applied_layers = clauses_after(&dish.description, APPLIED_LAYER_PHRASES);
    let removable: Vec<bool> = mentions
        .iter()
        .map(|m| is_removable(dish, m, &applied_layers))
        .collect();
    let core: Vec<&Mention> = mentions
        .iter()
        .zip(&removable)
        .filter(|(_, removable)| !**removable)
        .map(|(m, _)| m)
        .collect();

    let verdict = |v: FeasibilityVerdict| v.with_layers(applied_layers.clone());

    // 1. Kitchen annotation
    if let Some(notes) = dish.cannot_be_made_safe() {
        return verdict(FeasibilityVerdict::blocked(FeasibilityRule::Annotation, notes));
    }

    // 2. Seafood headline protein
    if target.is(Allergen::Fish) || target.is(Allergen::Shellfish) {
        if let Some(term) = target.find_mentions(&dish.name).first() {
            return verdict(FeasibilityVerdict::blocked(
                FeasibilityRule::MainComponent,
                format!("{} is the main component of this dish", capitalize(term)),
            ));
        }
    }

    // 3. Applied layer
    let in_layer = mentions
        .iter()
        .any(|m| any_clause_mentions(&applied_layers, &m.text));
    if in_layer && removable.iter().all(|r| *r) {
        return verdict(FeasibilityVerdict::modifiable(FeasibilityRule::AppliedLayer));
    }

    // 4. Marinade
    let marinades = clauses_after(&dish.description, MARINADE_PHRASES);
    if let Some(marinade) = marinades.iter().find(|c| clause_carries(c, target, knowledge)) {
        return verdict(FeasibilityVerdict::blocked(
            FeasibilityRule::Marinade,
            format!("{} is in the marinade ({}) and cannot be removed", label, marinade),
        ));
    }

    // 5. Baked or fried into the dish
    if let Some(mention) = baked_or_fried_in(dish, &core) {
        return verdict(FeasibilityVerdict::blocked(
            FeasibilityRule::BakedOrFried,
            format!("{} is baked or fried in and cannot be removed", mention),
        ));
    }

    // 6. Crust
    if has_carrying_crust(dish, target, mentions, knowledge) {
        return verdict(FeasibilityVerdict::blocked(
            FeasibilityRule::Crust,
            format!("{} is in the crust and cannot be removed", label),
        ));
    }

    // 7. Core identity
    if is_core_identity(dish, target) {
        return verdict(FeasibilityVerdict::blocked(
            FeasibilityRule::CoreIdentity,
            format!("{} is a core ingredient that defines this dish", label),
        ));
    }

    // 8. - 11. Pre-mixed bases
    if target.is(Allergen::Gluten) && dish.is_soup() {
        return verdict(FeasibilityVerdict::blocked(
            FeasibilityRule::SoupThickener,
            "Soups are thickened before service and cannot be made gluten free",
        ));
    }
    if target.is(Allergen::Egg) && dish.is_egg_breakfast() {
        return verdict(FeasibilityVerdict::blocked(
            FeasibilityRule::EggBreakfast,
            "Egg is the base of this breakfast dish",
        ));
    }
    if target.is(Allergen::Shellfish) && dish.is_caesar() {
        return verdict(FeasibilityVerdict::blocked(
            FeasibilityRule::CaesarDressing,
            "Caesar dressing is pre-mixed with anchovy and cannot be removed",
        ));
    }
    if dish.is_pre_made_mixture() && !dish.is_salad() {
        return verdict(FeasibilityVerdict::blocked(
            FeasibilityRule::PreMadeMixture,
            format!("{} is part of a pre-made mixture", label),
        ));
    }

    // 12. Salads swap dressings
    if dish.is_salad() && !dish.is_caesar() {
        let mut salad = verdict(FeasibilityVerdict::modifiable(FeasibilityRule::Salad));
        salad.safe_dressings = SALAD_DRESSINGS
            .iter()
            .filter(|d| {
                knowledge
                    .composites
                    .matching_sub_ingredients(d, target.matchers())
                    .is_empty()
            })
            .map(|d| d.to_string())
            .collect();
        return salad;
    }

    // 13. Only garnishes, layers and house steps
    if !mentions.is_empty() && core.is_empty() {
        return verdict(FeasibilityVerdict::modifiable(FeasibilityRule::RemovableOnly));
    }

    verdict(FeasibilityVerdict::blocked(
        FeasibilityRule::Default,
        "Unable to safely modify this dish to remove the allergen",
    ))
}

/// Whether a clause names the target directly or through a composite.
fn clause_carries(clause: &str, target: &Target<'_>, knowledge: &SafetyKnowledge) -> bool {
    target.matches(clause)
        || knowledge
            .composites
            .find_in_text(clause)
            .iter()
            .any(|name| {
                !knowledge
                    .composites
                    .matching_sub_ingredients(name, target.matchers())
                    .is_empty()
            })
}

fn baked_or_fried_in(dish: &Dish, core: &[&Mention]) -> Option<String> {
    let core_sentences: Vec<(String, &Mention)> = sentences(&dish.description)
        .into_iter()
        .flat_map(|s| {
            core.iter()
                .filter(|m| find_phrase(&s, &m.text.to_lowercase(), 0).is_some())
                .map(|m| (s.clone(), *m))
                .collect::<Vec<(String, &Mention)>>()
        })
        .collect();

    for (sentence, mention) in &core_sentences {
        let has = |cue: &str| find_phrase(sentence, cue, 0).is_some();
        let baked = sentence.contains("baked");
        let cooked = baked || sentence.contains("fried");

        if BAKED_OR_FRIED_CUES.iter().any(|cue| has(cue))
            || (COVERING_CUES.iter().any(|cue| has(cue)) && baked)
            || (has("mixture") && cooked)
        {
            return Some(mention.text.clone());
        }
    }

    if has_phrase(&dish.name, "baked") || has_phrase(&dish.name, "fried") {
        return core.first().map(|m| m.text.clone());
    }

    None
}

fn has_carrying_crust(
    dish: &Dish,
    target: &Target<'_>,
    mentions: &[Mention],
    knowledge: &SafetyKnowledge,
) -> bool {
    let composites = &knowledge.composites;
    let carries = |name: &str| {
        !composites
            .matching_sub_ingredients(name, target.matchers())
            .is_empty()
    };

    // crust composites reported as mentions, or listed as ingredients
    if mentions.iter().any(|m| has_phrase(&m.text, "crust") && !m.contains.is_empty()) {
        return true;
    }
    if dish
        .ingredients
        .iter()
        .any(|i| has_phrase(i, "crust") && (target.matches(i) || carries(i.as_str())))
    {
        return true;
    }

    // "parmesan crusted", "horseradish-crusted"
    for text in [&dish.name, &dish.description] {
        let lower = text.to_lowercase();
        let mut from = 0;
        while let Some(at) = lower[from..].find("crusted").map(|i| from + i) {
            let word = lower[..at]
                .trim_end_matches(['-', ' '])
                .rsplit([' ', '-'])
                .next()
                .unwrap_or_default();
            let crust = format!("{} crust", word);
            if !word.is_empty() && (target.matches(word) || carries(crust.as_str())) {
                return true;
            }
            from = at + "crusted".len();
        }
    }

    clauses_after(&dish.description, CRUST_PHRASES)
        .iter()
        .any(|c| clause_carries(c, target, knowledge))
}

fn is_core_identity(dish: &Dish, target: &Target<'_>) -> bool {
    match target.as_allergen() {
        Some(allergen) => CORE_IDENTITY
            .iter()
            .filter(|(a, _)| *a == allergen)
            .flat_map(|(_, patterns)| patterns.iter())
            .any(|pattern| has_phrase(&dish.name, pattern)),
        None => target.matches(&dish.name),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
