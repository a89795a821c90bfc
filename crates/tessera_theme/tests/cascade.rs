use tessera_theme::{
    resolve, resolve_body, seed_schema, unset_token, update_body, update_tokens, State, TokenKey,
    TokenSet, TokenValue,
};

fn radius(value: f64) -> TokenSet {
    TokenSet {
        border_radius: Some(value),
        ..TokenSet::default()
    }
}

#[test]
fn resolve_is_deterministic_and_pure() {
    let schema = update_tokens(&seed_schema(), "light", "card", State::Hover, &radius(3.0));
    let snapshot = schema.clone();

    let first = resolve(&schema, "card", "light", State::Hover);
    let second = resolve(&schema, "card", "light", State::Hover);
    assert_eq!(first, second);
    assert_eq!(schema, snapshot);
}

#[test]
fn empty_state_inherits_rest_for_every_property() {
    let schema = seed_schema();
    let rest = resolve(&schema, "button", "dark", State::Rest);
    for state in State::ALL {
        assert_eq!(
            resolve(&schema, "button", "dark", state),
            rest,
            "State {state} should inherit rest"
        );
    }
}

#[test]
fn override_shadows_only_its_own_state() {
    let schema = seed_schema();
    let before_rest = resolve(&schema, "input", "light", State::Rest);

    let schema = update_tokens(&schema, "light", "input", State::Hover, &radius(12.0));
    assert_eq!(resolve(&schema, "input", "light", State::Hover).border_radius, Some(12.0));
    assert_eq!(resolve(&schema, "input", "light", State::Rest), before_rest);
    assert_eq!(resolve(&schema, "input", "dark", State::Hover).border_radius, Some(6.0));
}

#[test]
fn unset_reverts_to_rest_inherited_value() {
    let schema = seed_schema();
    let edited = update_tokens(&schema, "light", "input", State::Hover, &radius(12.0));
    let reverted = unset_token(&edited, "light", "input", State::Hover, TokenKey::BorderRadius);

    assert_eq!(
        resolve(&reverted, "input", "light", State::Hover).border_radius,
        resolve(&reverted, "input", "light", State::Rest).border_radius
    );
    assert!(reverted
        .cell("input", "light", State::Hover)
        .is_some_and(|cell| !cell.contains(TokenKey::BorderRadius)));
}

#[test]
fn unset_on_rest_restores_the_default() {
    let edited = update_tokens(&seed_schema(), "dark", "badge", State::Rest, &radius(99.0));
    let reverted = unset_token(&edited, "dark", "badge", State::Rest, TokenKey::BorderRadius);
    assert_eq!(resolve(&reverted, "badge", "dark", State::Rest).border_radius, Some(6.0));
}

#[test]
fn unknown_control_resolves_to_defaults() {
    let schema = seed_schema();
    assert_eq!(
        resolve(&schema, "carousel", "light", State::Active),
        TokenSet::defaults()
    );
    assert_eq!(
        resolve(&schema, "button", "sepia", State::Rest),
        TokenSet::defaults()
    );
}

#[test]
fn body_tokens_resolve_over_defaults() {
    let patch = TokenSet {
        background_color: Some("#0b1120".into()),
        ..TokenSet::default()
    };
    let schema = update_body(&seed_schema(), "dark", &patch);

    let body = resolve_body(&schema, "dark");
    assert_eq!(
        body.get(TokenKey::BackgroundColor),
        Some(TokenValue::Text("#0b1120".into()))
    );
    assert_eq!(body.font_size, Some(14.0));
    assert_eq!(
        resolve_body(&schema, "light").background_color.as_deref(),
        Some("#ffffff")
    );
}
