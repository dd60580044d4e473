//! End-to-end tests: load a scene, place its content and render the result

use overlay_placement::{place, place_scene, render_css, Scene, SceneError, DEFAULT_FRAMES};
use pretty_assertions::assert_eq;

const LIST_SCENE: &str = r#"
target = "button"
content = "menu"

[viewport]
width = 800
height = 600

[[element]]
id = "list"
x = 50
y = 50
width = 300
height = 400
overflow = "auto"
scroll_height = 1200

[[element]]
id = "button"
parent = "list"
x = 60
y = 300
width = 80
height = 24

[[element]]
id = "menu"
parent = "list"
width = 160
height = 120

[props]
location = "bottom start"
offset = 4

[config]
viewport_margin = 8

[css]
selector = ".menu"
"#;

const RTL_SCENE: &str = r#"
target = "button"
content = "menu"

[viewport]
width = 800
height = 600

[[element]]
id = "button"
x = 300
y = 100
width = 80
height = 20

[[element]]
id = "menu"
x = 680
width = 120
height = 60

[props]
location = "bottom start"
rtl = true
"#;

fn load(source: &str) -> Scene {
    Scene::from_str(source).unwrap()
}

#[test]
fn test_menu_in_scrolling_list() {
    let scene = load(LIST_SCENE);
    let directive = place(&scene, DEFAULT_FRAMES);
    insta::assert_snapshot!(render_css(&directive, &scene.css), @r###"
    .menu {
      --overlay-anchor-origin: top left;
      transform-origin: bottom left;
      top: 176px;
      left: 60px;
      min-width: 80px;
      max-width: 284px;
      max-height: 384px;
    }
    "###);
}

#[test]
fn test_rtl_scene() {
    let scene = load(RTL_SCENE);
    let directive = place(&scene, DEFAULT_FRAMES);
    insta::assert_snapshot!(render_css(&directive, &scene.css), @r###"
    --overlay-anchor-origin: bottom right;
    transform-origin: top right;
    top: 120px;
    right: 420px;
    min-width: 80px;
    max-width: 776px;
    max-height: 576px;
    "###);
}

#[test]
fn test_styles_are_applied_to_the_document() {
    let scene = load(LIST_SCENE);
    let directive = place(&scene, DEFAULT_FRAMES);
    let menu = scene.element("menu").unwrap();
    assert_eq!(scene.document.inline(menu, "top"), directive.top);
    assert_eq!(scene.document.inline(menu, "left"), directive.left);
    assert_eq!(
        scene.document.inline(menu, "--overlay-anchor-origin"),
        directive.anchor_origin
    );
}

#[test]
fn test_toml_output() {
    let directive = place_scene(RTL_SCENE).unwrap();
    let text = toml::to_string(&directive).unwrap();
    assert!(text.contains(r#"anchor-origin = "bottom right""#));
    assert!(text.contains(r#"right = "420px""#));
    assert!(!text.contains("left ="));
}

#[test]
fn test_point_target() {
    let source = RTL_SCENE
        .replace(r#"target = "button""#, "target = [400, 300]")
        .replace("rtl = true", "rtl = false")
        .replace("x = 680\n", "");
    let directive = place_scene(&source).unwrap();
    assert_eq!(directive.top.as_deref(), Some("300px"));
    assert_eq!(directive.left.as_deref(), Some("400px"));
    assert_eq!(directive.transform_origin.as_deref(), Some("top left"));
}

#[test]
fn test_element_list_target_uses_first() {
    let source = LIST_SCENE.replace(r#"target = "button""#, r#"target = ["button", "list"]"#);
    let from_list = place_scene(&source).unwrap();
    let from_button = place_scene(LIST_SCENE).unwrap();
    assert_eq!(from_list, from_button);
}

#[test]
fn test_static_strategy_scene() {
    let source = LIST_SCENE.replace("[props]\n", "[props]\nstrategy = \"static\"\n");
    let directive = place_scene(&source).unwrap();
    assert!(directive.is_empty());
}

#[test]
fn test_scene_errors() {
    let missing = LIST_SCENE.replace(r#"content = "menu""#, r#"content = "tooltip""#);
    assert!(matches!(
        place_scene(&missing),
        Err(SceneError::UnknownElement(name)) if name == "tooltip"
    ));
    assert!(matches!(place_scene("[viewport"), Err(SceneError::ParseError(_))));
}
