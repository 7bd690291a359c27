#![cfg(target_arch = "wasm32")]

use snowfall_launcher::browser::{html, Listener};
use snowfall_launcher::config::Config;
use snowfall_launcher::gallery::{self, GalleryEntry};
use snowfall_launcher::launch::{Action, Launcher};
use snowfall_launcher::search::SearchBox;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn body() -> HtmlElement {
    document().body().unwrap()
}

fn div(inner_html: &str) -> HtmlElement {
    let element = document()
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    element.set_inner_html(inner_html);
    body().append_child(&element).unwrap();
    element
}

const TILES: &str = r#"
<div class="game-launcher" data-url="games/zelda.html"><img src="zelda.png"><span class="game-title">Zelda Clone</span></div>
<div class="game-launcher" data-url="games/tetris.html"><span class="cover-label"> Tetris </span></div>
<div class="game-launcher" data-url="games/puzzle.html"><span class="game-title">  </span><span class="cover-label">Puzzle</span></div>
"#;

const UNLAUNCHABLE: &str = r#"
<div class="game-launcher"><span class="game-title">No Url</span></div>
<p>gap</p>
"#;

fn launch_nodes() -> u32 {
    document()
        .query_selector_all(&format!("[{}]", html::ROLE_ATTRIBUTE))
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
fn loopable_sequence_appends_marked_copies() {
    let container = div(TILES);
    let sequence = gallery::build_loopable_sequence(&container).unwrap();

    let children = container.children();
    assert_eq!(children.length(), 6);
    assert_eq!(sequence.len(), 6);
    for i in 0..3 {
        let original = children.item(i).unwrap();
        let copy = children.item(i + 3).unwrap();
        assert_eq!(original.get_attribute(html::CLONE_ATTRIBUTE), None);
        assert_eq!(copy.get_attribute(html::CLONE_ATTRIBUTE).as_deref(), Some("true"));
        assert_eq!(
            GalleryEntry::from_element(&original),
            GalleryEntry::from_element(&copy)
        );
    }

    let entries = gallery::canonical_entries(&container);
    let titles: Vec<&str> = entries.iter().map(|entry| entry.title.as_str()).collect();
    assert_eq!(titles, ["Zelda Clone", "Tetris", "Puzzle"]);
    assert_eq!(entries[0].thumbnail.as_deref(), Some("zelda.png"));

    container.remove();
}

#[wasm_bindgen_test]
fn launch_session_mounts_and_tears_down_three_nodes() {
    let wrapper = div(TILES);
    wrapper.style().set_property("display", "flex").unwrap();
    let listing = div("");

    let launcher = Launcher::new(body(), vec![wrapper.clone(), listing.clone()], 1500);
    let before = launch_nodes();

    launcher
        .open(GalleryEntry::new("Tetris", "games/tetris.html"))
        .unwrap();
    assert!(launcher.is_open());
    assert_eq!(launch_nodes(), before + 3);
    assert_eq!(document().query_selector_all("iframe[data-launch-role]").unwrap().length(), 1);
    assert_eq!(
        document()
            .query_selector_all(&format!("button[{}]", html::ACTION_ATTRIBUTE))
            .unwrap()
            .length(),
        2
    );
    assert_eq!(wrapper.style().get_property_value("display").unwrap(), "none");
    assert_eq!(listing.style().get_property_value("display").unwrap(), "none");

    launcher.close();
    assert!(!launcher.is_open());
    assert_eq!(launch_nodes(), before);
    assert_eq!(wrapper.style().get_property_value("display").unwrap(), "flex");
    assert_eq!(listing.style().get_property_value("display").unwrap(), "");

    wrapper.remove();
    listing.remove();
}

#[wasm_bindgen_test]
fn reopening_replaces_the_open_session() {
    let wrapper = div("");
    let launcher = Launcher::new(body(), vec![wrapper.clone()], 1500);
    let before = launch_nodes();

    launcher.open(GalleryEntry::new("A", "a.html")).unwrap();
    launcher.open(GalleryEntry::new("B", "b.html")).unwrap();
    assert_eq!(launch_nodes(), before + 3);
    assert_eq!(launcher.playing().map(|entry| entry.title), Some("B".to_string()));

    launcher.close();
    assert_eq!(launch_nodes(), before);
    assert_eq!(wrapper.style().get_property_value("display").unwrap(), "");
    wrapper.remove();
}

#[wasm_bindgen_test]
fn search_renders_capped_suggestions_without_touching_tiles() {
    let tiles = div(TILES);
    let suggestions = div("");
    let input = input();

    let search = SearchBox::new(
        input.clone(),
        suggestions.clone(),
        gallery::canonical_entries(&tiles),
        6,
    );

    search.update("zel").unwrap();
    assert_eq!(suggestions.children().length(), 1);
    assert_eq!(suggestions.text_content().as_deref(), Some("Zelda Clone"));
    assert_eq!(suggestions.style().get_property_value("display").unwrap(), "block");

    search.update("").unwrap();
    assert_eq!(suggestions.children().length(), 0);
    assert_eq!(suggestions.style().get_property_value("display").unwrap(), "none");

    let launchers = tiles.query_selector_all(html::LAUNCHER_SELECTOR).unwrap();
    for i in 0..launchers.length() {
        let tile = launchers.item(i).unwrap().dyn_into::<HtmlElement>().unwrap();
        assert_eq!(tile.style().get_property_value("display").unwrap(), "");
    }

    tiles.remove();
    suggestions.remove();
    input.remove();
}

fn control(action: Action) -> HtmlElement {
    document()
        .query_selector(&format!("[{}=\"{}\"]", html::ACTION_ATTRIBUTE, action.as_str()))
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn input() -> HtmlInputElement {
    let input = document()
        .create_element("input")
        .unwrap()
        .dyn_into::<HtmlInputElement>()
        .unwrap();
    body().append_child(&input).unwrap();
    input
}

#[wasm_bindgen_test]
fn clicking_a_loop_copy_opens_the_same_game_and_dismiss_tears_down() {
    let container = div(TILES);
    container.style().set_property("display", "flex").unwrap();
    gallery::build_loopable_sequence(&container).unwrap();
    let launcher = Rc::new(Launcher::new(body(), vec![container.clone()], 1500));
    let before = launch_nodes();

    let on_tile = launcher.clone();
    let _tiles = Listener::new(&container, "click", move |event| {
        on_tile.on_tile_click(&event).unwrap()
    })
    .unwrap();
    let on_control = launcher.clone();
    let _controls = Listener::new(&document(), "click", move |event| {
        on_control.on_control_click(&event).unwrap()
    })
    .unwrap();

    // title span inside the copy of the second tile
    let copy = container.children().item(4).unwrap();
    assert_eq!(copy.get_attribute(html::CLONE_ATTRIBUTE).as_deref(), Some("true"));
    copy.query_selector(".cover-label")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();

    let playing = launcher.playing().unwrap();
    assert_eq!(playing.url, "games/tetris.html");
    assert_eq!(playing.title, "Tetris");
    assert_eq!(launch_nodes(), before + 3);
    assert_eq!(document().query_selector_all("iframe[data-launch-role]").unwrap().length(), 1);
    assert_eq!(container.style().get_property_value("display").unwrap(), "none");

    // the original tile resolves to the same game
    container
        .children()
        .item(1)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
    assert_eq!(launcher.playing().map(|entry| entry.url), Some(playing.url));
    assert_eq!(launch_nodes(), before + 3);

    control(Action::Dismiss).click();
    assert!(!launcher.is_open());
    assert_eq!(launch_nodes(), before);
    assert_eq!(container.style().get_property_value("display").unwrap(), "flex");

    container.remove();
}

#[wasm_bindgen_test]
fn clicks_outside_launchable_tiles_are_ignored() {
    let container = div(UNLAUNCHABLE);
    let launcher = Rc::new(Launcher::new(body(), vec![container.clone()], 1500));
    let on_tile = launcher.clone();
    let _tiles = Listener::new(&container, "click", move |event| {
        on_tile.on_tile_click(&event).unwrap()
    })
    .unwrap();

    for index in 0..2 {
        container
            .children()
            .item(index)
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
            .click();
    }
    assert!(!launcher.is_open());
    container.remove();
}

#[wasm_bindgen_test]
fn suggestion_click_resolves_to_its_entry() {
    let tiles = div(TILES);
    let suggestions = div("");
    let input = input();
    let search = Rc::new(SearchBox::new(
        input.clone(),
        suggestions.clone(),
        gallery::canonical_entries(&tiles),
        6,
    ));
    let picked: Rc<RefCell<Option<GalleryEntry>>> = Rc::new(RefCell::new(None));

    let on_click = search.clone();
    let slot = picked.clone();
    let _clicks = Listener::new(&suggestions, "click", move |event| {
        *slot.borrow_mut() = on_click.on_suggestion_click(&event).unwrap();
    })
    .unwrap();

    // "Puzzle" and "Zelda Clone" both contain a z; Puzzle sorts first
    search.update("z").unwrap();
    assert_eq!(suggestions.children().length(), 2);
    suggestions
        .children()
        .item(1)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();

    let entry = picked.borrow_mut().take().unwrap();
    assert_eq!(entry.title, "Zelda Clone");
    assert_eq!(entry.url, "games/zelda.html");
    assert_eq!(suggestions.style().get_property_value("display").unwrap(), "none");

    tiles.remove();
    suggestions.remove();
    input.remove();
}

#[wasm_bindgen_test]
fn partial_config_keeps_defaults() {
    let value = js_sys::JSON::parse(r#"{"snow":{"density":0.3},"gallery":{"scrollSpeed":2}}"#)
        .unwrap();
    let config: Config = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(config.snow.density, 0.3);
    assert_eq!(config.snow.min_particles, 50);
    assert_eq!(config.gallery.scroll_speed, 2.0);
    assert_eq!(config.search, Config::default().search);
}
