//! Behavioural coverage for the noise filter.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use trendscout_core::{Rejection, RuleSet};

type Outcome = RefCell<Option<Result<(), Rejection>>>;

const ACME_RULES: &str = r#"{
    "version": 1,
    "brand": ["Acme"],
    "generic": [],
    "news": [],
    "sports": [],
    "entertainment": [],
    "high_buildability": ["tool"],
    "low_buildability": []
}"#;

/// Rule set under test.
#[fixture]
pub fn rules() -> RefCell<Option<RuleSet>> {
    RefCell::new(None)
}

/// Classification outcome recorded by the `when` steps.
#[fixture]
pub fn outcome() -> Outcome {
    RefCell::new(None)
}

fn classify(rules: &RefCell<Option<RuleSet>>, outcome: &Outcome, keyword: &str) {
    let binding = rules.borrow();
    let rule_set = binding
        .as_ref()
        .unwrap_or_else(|| panic!("rule set must be initialised"));
    *outcome.borrow_mut() = Some(rule_set.classify(keyword));
}

#[given("the built-in rule set")]
fn builtin(rules: &RefCell<Option<RuleSet>>) {
    *rules.borrow_mut() = Some(RuleSet::builtin());
}

#[given("a rule document that lists acme as a brand")]
fn acme_document(rules: &RefCell<Option<RuleSet>>) {
    let parsed = RuleSet::from_json_str(ACME_RULES)
        .unwrap_or_else(|err| panic!("rule document should parse: {err}"));
    *rules.borrow_mut() = Some(parsed);
}

#[when("I classify a tool-shaped keyword")]
fn classify_tool(rules: &RefCell<Option<RuleSet>>, outcome: &Outcome) {
    classify(rules, outcome, "invoice generator tool");
}

#[when("I classify a keyword naming a brand")]
fn classify_brand(rules: &RefCell<Option<RuleSet>>, outcome: &Outcome) {
    classify(rules, outcome, "Notion template tracker");
}

#[when("I classify a tool keyword mentioning acme")]
fn classify_acme(rules: &RefCell<Option<RuleSet>>, outcome: &Outcome) {
    classify(rules, outcome, "ACME invoice tool");
}

#[when("I classify a keyword shaped like a person's name")]
fn classify_name(rules: &RefCell<Option<RuleSet>>, outcome: &Outcome) {
    classify(rules, outcome, "Jordan Reyes");
}

#[then("the keyword is buildable")]
fn is_buildable(outcome: &Outcome) {
    assert_eq!(*outcome.borrow(), Some(Ok(())));
}

#[then("the keyword is rejected as a brand")]
fn rejected_brand(outcome: &Outcome) {
    assert_eq!(*outcome.borrow(), Some(Err(Rejection::Brand)));
}

#[then("the keyword is rejected as a person name")]
fn rejected_name(outcome: &Outcome) {
    assert_eq!(*outcome.borrow(), Some(Err(Rejection::PersonName)));
}

#[scenario(path = "tests/features/noise_filter.feature", index = 0)]
fn tool_keyword_survives(rules: RefCell<Option<RuleSet>>, outcome: Outcome) {
    let _ = (rules, outcome);
}

#[scenario(path = "tests/features/noise_filter.feature", index = 1)]
fn brand_keyword_rejected(rules: RefCell<Option<RuleSet>>, outcome: Outcome) {
    let _ = (rules, outcome);
}

#[scenario(path = "tests/features/noise_filter.feature", index = 2)]
fn loaded_brand_rejected(rules: RefCell<Option<RuleSet>>, outcome: Outcome) {
    let _ = (rules, outcome);
}

#[scenario(path = "tests/features/noise_filter.feature", index = 3)]
fn name_keyword_rejected(rules: RefCell<Option<RuleSet>>, outcome: Outcome) {
    let _ = (rules, outcome);
}
