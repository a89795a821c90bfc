use tessera_theme::{
    clear_state_overrides, copy_rest_to_all_states, copy_rest_to_state, duplicate_component,
    ensure_component, ensure_theme, heal, remove_component, remove_theme, rename_component,
    rename_theme, resolve, seed_schema, update_tokens, Schema, State, TokenSet,
};

fn tinted(color: &str) -> TokenSet {
    TokenSet {
        background_color: Some(color.into()),
        ..TokenSet::default()
    }
}

#[test]
fn seed_has_two_themes_and_base_controls() {
    let schema = seed_schema();
    assert_eq!(schema.themes, vec!["light", "dark"]);
    assert!(schema.has_component("button"));
    assert!(schema.has_component("h6"));
    for control in schema.control_ids() {
        for theme in &schema.themes {
            assert_eq!(
                schema.cell(control, theme, State::Rest),
                Some(&TokenSet::defaults())
            );
            assert!(schema
                .cell(control, theme, State::Hover)
                .is_some_and(|c| c.is_empty()));
        }
    }
}

#[test]
fn ensure_theme_clones_the_base_shape() {
    let schema = update_tokens(&seed_schema(), "light", "button", State::Hover, &tinted("#eee"));
    let schema = ensure_theme(&schema, "sepia", Some("light"));

    assert_eq!(schema.themes, vec!["light", "dark", "sepia"]);
    assert!(schema.body("sepia").is_some());
    assert_eq!(
        resolve(&schema, "button", "sepia", State::Hover),
        resolve(&schema, "button", "light", State::Hover)
    );

    let again = ensure_theme(&schema, "sepia", Some("dark"));
    assert_eq!(again, schema);
}

#[test]
fn rename_theme_moves_every_entry() {
    let schema = update_tokens(&seed_schema(), "dark", "card", State::Focus, &tinted("#222"));
    let before = resolve(&schema, "card", "dark", State::Focus);

    let renamed = rename_theme(&schema, "dark", "midnight");
    assert_eq!(renamed.themes, vec!["light", "midnight"]);
    assert!(renamed.body("dark").is_none());
    assert!(renamed.body("midnight").is_some());
    for control in renamed.control_ids() {
        let themes = &renamed.components[control];
        assert!(themes.contains_key("midnight"));
        assert!(!themes.contains_key("dark"));
    }
    assert_eq!(resolve(&renamed, "card", "midnight", State::Focus), before);
}

#[test]
fn rename_theme_onto_existing_is_a_no_op() {
    let schema = seed_schema();
    assert_eq!(rename_theme(&schema, "dark", "light"), schema);
    assert_eq!(rename_theme(&schema, "sepia", "other"), schema);
    assert_eq!(rename_theme(&schema, "dark", "  "), schema);
}

#[test]
fn last_theme_cannot_be_removed() {
    let schema = remove_theme(&seed_schema(), "dark");
    assert_eq!(schema.themes, vec!["light"]);
    assert!(schema.components["button"].get("dark").is_none());

    assert_eq!(remove_theme(&schema, "light"), schema);
}

#[test]
fn components_are_never_empty() {
    let mut schema = seed_schema();
    let controls: Vec<String> = schema.control_ids().map(str::to_string).collect();
    for control in &controls {
        schema = remove_component(&schema, control);
        assert!(!schema.components.is_empty());
    }
    assert_eq!(schema.control_ids().collect::<Vec<_>>(), vec!["button"]);
}

#[test]
fn duplicate_and_rename_components() {
    let schema = update_tokens(&seed_schema(), "light", "button", State::Active, &tinted("#123"));

    let dup = duplicate_component(&schema, "button", "cta");
    assert_eq!(dup.components["cta"], dup.components["button"]);
    assert_eq!(duplicate_component(&dup, "button", "cta"), dup);

    let renamed = rename_component(&dup, "cta", "hero");
    assert!(!renamed.has_component("cta"));
    assert_eq!(
        resolve(&renamed, "hero", "light", State::Active).background_color.as_deref(),
        Some("#123")
    );
    assert_eq!(rename_component(&renamed, "hero", "button"), renamed);
}

#[test]
fn ensure_component_is_idempotent() {
    let schema = ensure_component(&seed_schema(), "toolbar");
    assert!(schema.cell("toolbar", "dark", State::Inert).is_some());
    assert_eq!(ensure_component(&schema, "toolbar"), schema);
}

#[test]
fn copy_and_clear_state_overrides() {
    let schema = update_tokens(&seed_schema(), "light", "link", State::Rest, &tinted("#abc"));

    let copied = copy_rest_to_state(&schema, "light", "link", State::Visited);
    assert_eq!(
        copied.cell("link", "light", State::Visited),
        Some(&resolve(&schema, "link", "light", State::Rest))
    );

    let all = copy_rest_to_all_states(&schema, "light", "link");
    for state in State::ALL {
        assert_eq!(
            all.cell("link", "light", state).and_then(|c| c.background_color.as_deref()),
            Some("#abc")
        );
    }

    let cleared = clear_state_overrides(&all, "light", "link", State::Hover);
    assert!(cleared.cell("link", "light", State::Hover).is_some_and(|c| c.is_empty()));
    assert_eq!(clear_state_overrides(&all, "light", "link", State::Rest), all);
}

#[test]
fn update_tokens_creates_missing_shapes() {
    let schema = update_tokens(&seed_schema(), "sepia", "toolbar", State::Hover, &tinted("#f4ecd8"));
    assert!(schema.has_theme("sepia"));
    assert!(schema.body("sepia").is_some());
    assert!(schema.cell("button", "sepia", State::Rest).is_some());
    assert_eq!(
        schema.cell("toolbar", "light", State::Rest),
        Some(&TokenSet::defaults())
    );
}

#[test]
fn heal_fills_partial_data() {
    let partial: Schema = serde_json::from_value(serde_json::json!({
        "components": {"button": {"brand": {"hover": {"opacity": 0.8}}}},
        "global": {"body": {"brand": {"textColor": "#000"}}}
    }))
    .unwrap();

    let healed = heal(&partial);
    assert_eq!(healed.themes, vec!["brand"]);
    assert_eq!(
        healed.cell("button", "brand", State::Rest),
        Some(&TokenSet::defaults())
    );
    assert_eq!(
        healed.cell("button", "brand", State::Hover).and_then(|c| c.opacity),
        Some(0.8)
    );
    assert_eq!(heal(&healed), healed);
}

#[test]
fn operations_never_mutate_their_input() {
    let schema = seed_schema();
    let snapshot = schema.clone();
    let _ = rename_theme(&schema, "light", "paper");
    let _ = remove_component(&schema, "button");
    let _ = update_tokens(&schema, "dark", "button", State::Rest, &tinted("#000"));
    assert_eq!(schema, snapshot);
}
