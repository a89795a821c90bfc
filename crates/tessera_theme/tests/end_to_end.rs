use tessera_theme::{
    bulk_copy, ensure_theme, generate_css, import_json, resolve, seed_schema, update_tokens,
    BulkCopyRequest, Command, CssOptions, State, ThemeAliases, ThemeDocument, ThemeScope,
    TokenKey, TokenSet,
};

/// Body of the first rule whose selector line is exactly `selector`
fn block<'a>(css: &'a str, selector: &str) -> &'a str {
    let open = format!("{selector} {{\n");
    let start = css
        .find(&open)
        .unwrap_or_else(|| panic!("missing block {selector}"))
        + open.len();
    let end = css[start..].find("}\n").expect("unterminated block") + start;
    &css[start..end]
}

#[test]
fn dark_button_flows_from_edit_to_remap_block() {
    let schema = ensure_theme(&seed_schema(), "dark", Some("light"));
    let patch = TokenSet {
        background_color: Some("#111".into()),
        ..TokenSet::default()
    };
    let schema = update_tokens(&schema, "dark", "button", State::Rest, &patch);
    let aliases = ThemeAliases::new("light", "dark");

    let css = generate_css(&schema, &aliases, &CssOptions::default());

    assert!(css.contains("/* theme: dark */\n:root {\n"));
    assert!(css.contains("  --button-backgroundColor-dark-rest: #111;\n"));
    let dark = block(&css, "html[data-theme=\"dark\"]");
    assert!(dark.contains(
        "--button-backgroundColor-rest: var(--button-backgroundColor-dark-rest);"
    ));
    let light = block(&css, "html[data-theme=\"light\"]");
    assert!(light.contains(
        "--button-backgroundColor-rest: var(--button-backgroundColor-light-rest);"
    ));
}

#[test]
fn bulk_copy_materializes_resolved_values() {
    let schema = seed_schema();
    let aliases = ThemeAliases::default();
    let request = BulkCopyRequest::new("button", ["input"])
        .scope(ThemeScope::Light)
        .properties([TokenKey::BorderRadius])
        .states([State::Rest])
        .into_state(State::Hover);

    let copied = bulk_copy(&schema, &aliases, &request);
    let inherited = resolve(&schema, "button", "light", State::Rest).border_radius;
    assert_eq!(
        copied.cell("input", "light", State::Hover).and_then(|c| c.border_radius),
        inherited
    );
    // Dark was out of scope
    assert!(copied
        .cell("input", "dark", State::Hover)
        .is_some_and(|c| c.is_empty()));

    // Later edits to the source never leak into the copy
    let bigger = TokenSet {
        border_radius: Some(20.0),
        ..TokenSet::default()
    };
    let edited = update_tokens(&copied, "light", "button", State::Rest, &bigger);
    assert_eq!(
        resolve(&edited, "input", "light", State::Hover).border_radius,
        inherited
    );
}

#[test]
fn bulk_copy_mirrors_states_across_aliased_themes() {
    let aliases = ThemeAliases::default();
    let schema = update_tokens(
        &seed_schema(),
        "dark",
        "button",
        State::Error,
        &TokenSet {
            border_color: Some("#f87171".into()),
            ..TokenSet::default()
        },
    );

    let request = BulkCopyRequest::new("button", ["select", "textarea"]).states([State::Error]);
    let copied = bulk_copy(&schema, &aliases, &request);
    for target in ["select", "textarea"] {
        assert_eq!(
            resolve(&copied, target, "dark", State::Error),
            resolve(&schema, "button", "dark", State::Error)
        );
        assert_eq!(
            copied.cell(target, "light", State::Error),
            Some(&resolve(&schema, "button", "light", State::Error))
        );
    }
}

#[test]
fn document_session_with_scripted_commands() {
    let script = r##"[
        {"op": "ensureTheme", "theme": "midnight", "base": "dark"},
        {"op": "updateBody", "theme": "midnight", "patch": {"backgroundColor": "#0b1120"}},
        {"op": "applyPreset", "theme": "midnight", "preset": "midnight"},
        {"op": "removeTheme", "theme": "dark"}
    ]"##;
    let commands: Vec<Command> = serde_json::from_str(script).unwrap();

    let mut doc = ThemeDocument::seeded();
    for command in &commands {
        assert!(doc.dispatch(command), "{} should change the schema", command.name());
    }
    doc.set_alias(tessera_theme::Slot::Dark, "midnight");

    let css = doc.stylesheet().to_string();
    assert!(!css.contains("-dark-rest"));
    assert!(css.contains("--body-backgroundColor: var(--body-backgroundColor-midnight);"));

    let exported = doc.export_json().unwrap();
    let imported = import_json(&exported).unwrap();
    assert_eq!(imported.schema.themes, vec!["light", "midnight"]);
    assert_eq!(imported.aliases.as_ref(), Some(doc.config()));
}
