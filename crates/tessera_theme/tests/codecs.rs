use tessera_theme::{BoxShadow, Color, ColorParts, TransitionSpeed};

#[test]
fn shadow_string_normalizes_through_parse_and_display() {
    let input = "2px 4px 6px 0px rgba(0,0,0,0.2)";
    assert_eq!(BoxShadow::parse(input).to_string(), input);

    let shadow = BoxShadow::parse("  inset 1px 2px  #00000080 ");
    assert!(shadow.inset);
    assert_eq!(shadow.to_string(), "inset 1px 2px 0px 0px #00000080");
}

#[test]
fn malformed_shadows_degrade_instead_of_failing() {
    assert_eq!(BoxShadow::parse("none"), BoxShadow::none());
    assert_eq!(BoxShadow::parse(""), BoxShadow::none());

    let shadow = BoxShadow::parse("wobbly 3px");
    assert_eq!(shadow.offset_x, 3.0);
    assert_eq!(shadow.color, "rgba(0,0,0,0.2)");
}

#[test]
fn shadow_alpha_edits_keep_the_base_color() {
    let shadow = BoxShadow::new(0.0, 2.0, 4.0, 0.0, "#336699").with_color_alpha(0.5);
    assert_eq!(shadow.color, "#33669980");
}

#[test]
fn colors_compose_base_and_alpha() {
    let color = Color::parse("#f00");
    assert_eq!(color.to_string(), "#ff0000ff");
    assert_eq!(color.with_alpha(0.0).to_string(), "#ff000000");

    let parts = Color::parse("#11223380").parts();
    assert_eq!(parts.base_hex, "#112233");
    assert!((parts.alpha - 128.0 / 255.0).abs() < 1e-6);
    assert!(!parts.is_transparent);
}

#[test]
fn transparent_is_its_own_state() {
    let parts = Color::parse("Transparent").parts();
    assert!(parts.is_transparent);
    assert_eq!(parts.alpha, 0.0);
    assert_eq!(parts.compose(), "transparent");

    let picked = ColorParts {
        is_transparent: false,
        ..parts
    };
    assert_eq!(picked.compose(), "#00000000");
}

#[test]
fn function_colors_pass_through_opaque() {
    let color = Color::parse("rgba(10, 20, 30, 0.4)");
    assert_eq!(color.alpha(), 1.0);
    assert_eq!(color.with_alpha(0.2), color);
    assert_eq!(color.to_string(), "rgba(10, 20, 30, 0.4)");
}

#[test]
fn transition_speeds_map_to_durations() {
    let millis: Vec<u32> = TransitionSpeed::ALL.iter().map(|s| s.millis()).collect();
    assert_eq!(millis, vec![0, 150, 250, 400, 600]);
    assert_eq!(TransitionSpeed::Slow.to_css(), "400ms");
    assert_eq!("fast".parse::<TransitionSpeed>(), Ok(TransitionSpeed::Fast));
}
