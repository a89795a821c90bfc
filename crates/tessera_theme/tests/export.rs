use serde_json::{json, Value};
use tessera_theme::{
    ensure_theme, export_json, import_json, list_variables, seed_schema, AliasConfig, Slot,
    State, ThemeAliases, ThemeExport, ThemeScope, TokenKey, TokenSet, VariableFilter,
    VariableTier,
};

#[test]
fn export_is_limited_to_aliased_themes() {
    let schema = ensure_theme(&seed_schema(), "sepia", None);
    let config = AliasConfig::new(ThemeAliases::new("sepia", "dark"), Slot::Dark);

    let value: Value = serde_json::from_str(&export_json(&schema, &config).unwrap()).unwrap();
    assert_eq!(value["$version"], json!(1));
    assert_eq!(value["aliases"], json!({"light": "sepia", "dark": "dark"}));
    assert_eq!(value["initialSlot"], json!("dark"));
    assert_eq!(value["themes"], json!(["sepia", "dark"]));
    assert!(value["components"]["button"].get("light").is_none());
    assert!(value["global"]["body"].get("light").is_none());
    assert!(value["global"].get("font").is_none());
}

#[test]
fn export_payload_imports_back_with_aliases() {
    let schema = seed_schema();
    let config = AliasConfig::new(ThemeAliases::new("dark", "light"), Slot::Light);
    let exported = ThemeExport::new(&schema, &config).to_json().unwrap();

    let imported = import_json(&exported).unwrap();
    assert_eq!(imported.aliases, Some(config));
    assert_eq!(imported.schema.themes, vec!["dark", "light"]);
}

#[test]
fn raw_schema_import_heals_and_keeps_unknown_keys() {
    let payload = json!({
        "version": 1,
        "themes": ["light"],
        "components": {"button": {"light": {"hover": {"borderRadius": 2}}}},
        "notes": "hand edited"
    });

    let imported = import_json(&payload.to_string()).unwrap();
    assert_eq!(imported.aliases, None);
    assert_eq!(
        imported.schema.cell("button", "light", State::Rest),
        Some(&TokenSet::defaults())
    );
    assert_eq!(imported.schema.extra.get("notes"), Some(&json!("hand edited")));
    assert!(imported.schema.body("light").is_some());

    let saved: Value = serde_json::to_value(&imported.schema).unwrap();
    assert_eq!(saved["notes"], json!("hand edited"));
}

#[test]
fn one_bad_token_value_does_not_reject_the_import() {
    let mut payload = serde_json::to_value(seed_schema()).unwrap();
    payload["components"]["button"]["light"]["hover"] =
        json!({"transitionSpeed": "medium", "opacity": 0.5});
    payload["components"]["input"]["dark"]["rest"]["paddingX"] = json!("8px");

    let imported = import_json(&payload.to_string()).unwrap();
    let schema = &imported.schema;
    assert_eq!(
        schema.cell("button", "light", State::Hover),
        Some(&TokenSet {
            opacity: Some(0.5),
            ..TokenSet::default()
        })
    );
    assert_eq!(
        schema.cell("input", "dark", State::Rest).and_then(|c| c.padding_x),
        TokenSet::defaults().padding_x,
        "healed rest falls back to the default"
    );
}

#[test]
fn malformed_alias_section_is_ignored() {
    let payload = json!({"themes": ["light"], "aliases": "nope"});
    let imported = import_json(&payload.to_string()).unwrap();
    assert_eq!(imported.aliases, None);
}

#[test]
fn variables_filter_by_every_axis() {
    let schema = seed_schema();
    let aliases = ThemeAliases::default();

    let all = list_variables(&schema, &aliases, &VariableFilter::default());
    let physical = all.iter().filter(|v| v.tier == VariableTier::Physical).count();
    let remapped = all.iter().filter(|v| v.tier == VariableTier::Alias).count();
    assert_eq!(physical, remapped);

    let filter = VariableFilter {
        scope: ThemeScope::Light,
        control: Some("card".into()),
        state: Some(State::Disabled),
        property: Some(TokenKey::Opacity),
        search: None,
    };
    let names: Vec<String> = list_variables(&schema, &aliases, &filter)
        .into_iter()
        .map(|v| v.name)
        .collect();
    assert_eq!(
        names,
        vec!["--card-opacity-light-disabled", "--card-opacity-disabled"]
    );
}

#[test]
fn search_is_case_insensitive() {
    let filter = VariableFilter {
        search: Some("BODY-TEXTCOLOR-DARK".into()),
        ..VariableFilter::default()
    };
    let found = list_variables(&seed_schema(), &ThemeAliases::default(), &filter);
    assert!(!found.is_empty());
    assert!(found
        .iter()
        .all(|v| v.name.contains("body-textColor") && v.theme == "dark"));
}
