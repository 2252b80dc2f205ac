use api_contract::Outcome;

#[test]
fn outcome_success() {
    let outcome = Outcome::success("ok");
    assert!(outcome.is_success);
    assert_eq!(outcome.data, "ok");
    assert!(outcome.error.is_empty());
}

#[test]
fn outcome_failure() {
    let outcome = Outcome::failure("The remote id is not specified.");
    assert!(!outcome.is_success);
    assert!(outcome.data.is_empty());
    assert!(!outcome.error.is_empty());
}

#[test]
fn outcome_failure_never_has_empty_error() {
    let outcome = Outcome::failure("");
    assert!(!outcome.is_success);
    assert!(!outcome.error.is_empty());
}

#[test]
fn outcome_from_result() {
    let ok: Result<String, std::fmt::Error> = Ok("{}".to_string());
    assert_eq!(Outcome::from(ok), Outcome::success("{}"));

    let err: Result<String, std::fmt::Error> = Err(std::fmt::Error);
    let outcome = Outcome::from(err);
    assert!(!outcome.is_success);
    assert!(outcome.data.is_empty());
}

#[test]
fn outcome_is_camel_case() {
    let value = serde_json::to_value(Outcome::success("x")).expect("serialize");
    assert_eq!(value["isSuccess"], true);
    assert!(value.get("is_success").is_none());
}
