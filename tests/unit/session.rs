use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::export::delivery::InMemoryDelivery;
use crate::foundation::error::NameCardError;
use crate::input::CardParams;

/// Records every call and encodes the parameters into the fake payload.
#[derive(Default)]
struct StubRenderer {
    calls: Rc<RefCell<Vec<(String, CardParams)>>>,
    fail_on: Option<String>,
}

impl CardRenderer for StubRenderer {
    fn render(&mut self, name: &str, params: &CardParams) -> NameCardResult<NameCard> {
        if self.fail_on.as_deref() == Some(name) {
            return Err(NameCardError::render(format!("cannot draw {name}")));
        }
        self.calls.borrow_mut().push((name.to_owned(), *params));
        let payload = format!("{name}/{}/{}", params.font_size, params.page_size).into_bytes();
        Ok(NameCard::new(name, payload, 1, 1))
    }
}

fn session() -> (NameCardSession, Rc<RefCell<Vec<(String, CardParams)>>>) {
    let stub = StubRenderer::default();
    let calls = stub.calls.clone();
    (NameCardSession::new(Box::new(stub)), calls)
}

fn names(s: &NameCardSession) -> Vec<&str> {
    s.cards().iter().map(NameCard::name).collect()
}

#[test]
fn one_card_per_name_in_order() {
    let (mut s, calls) = session();
    s.set_names_text("Carol,Alice Bob，Alice").unwrap();
    assert_eq!(names(&s), vec!["Carol", "Alice", "Bob", "Alice"]);
    assert_eq!(calls.borrow().len(), 4);
}

#[test]
fn preset_changes_regenerate_everything_with_same_order() {
    let (mut s, calls) = session();
    s.set_names(["Alice", "Bob"]).unwrap();
    s.set_font_size(FontSize::new(64).unwrap()).unwrap();
    assert_eq!(names(&s), vec!["Alice", "Bob"]);
    assert_eq!(s.cards()[1].png(), b"Bob/64/A4");

    s.set_page_size(PageSize::A3).unwrap();
    assert_eq!(names(&s), vec!["Alice", "Bob"]);
    assert_eq!(s.cards()[0].png(), b"Alice/64/A3");
    assert_eq!(calls.borrow().len(), 6);
}

#[test]
fn empty_names_disable_both_exports() {
    let (mut s, _) = session();
    s.set_names_text(" , ").unwrap();
    assert!(s.cards().is_empty());
    assert_eq!(s.menu(), ExportMenu::default());

    let mut d = InMemoryDelivery::new();
    assert!(s.export_images(ExportScope::All, &mut d).unwrap().is_noop());
    assert!(s.export_document(ExportScope::All, &mut d).unwrap().is_noop());
    assert!(d.files().is_empty());
}

#[test]
fn export_selected_is_disabled_without_selection() {
    let (mut s, _) = session();
    s.set_names(["Alice"]).unwrap();
    let menu = s.menu();
    assert!(menu.all_enabled);
    assert!(!menu.selected_enabled);

    let mut d = InMemoryDelivery::new();
    assert!(
        s.export_images(ExportScope::Selected, &mut d)
            .unwrap()
            .is_noop()
    );
    assert!(d.files().is_empty());
}

#[test]
fn toggle_is_idempotent_and_ignores_unknown_names() {
    let (mut s, _) = session();
    s.set_names(["Alice", "Bob"]).unwrap();
    assert!(s.toggle("Bob"));
    assert!(s.is_selected("Bob"));
    assert!(!s.toggle("Bob"));
    assert!(s.selection().is_empty());
    assert!(!s.toggle("Zed"));
    assert!(s.selection().is_empty());
}

#[test]
fn export_selected_filters_in_card_order() {
    let (mut s, _) = session();
    s.set_names(["Alice", "Bob", "Carol"]).unwrap();
    s.toggle("Carol");
    s.toggle("Alice");

    let mut d = InMemoryDelivery::new();
    let report = s.export_images(ExportScope::Selected, &mut d).unwrap();
    assert_eq!(report.files, vec!["Alice.png", "Carol.png"]);
    assert_eq!(d.files()[1].bytes, b"Carol/36/A4");
}

#[test]
fn regeneration_prunes_selections_of_removed_names() {
    let (mut s, _) = session();
    s.set_names(["Alice", "Bob"]).unwrap();
    s.toggle("Alice");
    s.toggle("Bob");
    s.set_names(["Bob", "Carol"]).unwrap();
    assert_eq!(s.selection().iter().collect::<Vec<_>>(), vec!["Bob"]);

    s.set_names(["Carol"]).unwrap();
    assert!(!s.menu().selected_enabled);
}

#[test]
fn render_failure_clears_cards_and_surfaces_error() {
    let stub = StubRenderer {
        fail_on: Some("Bob".to_string()),
        ..StubRenderer::default()
    };
    let mut s = NameCardSession::new(Box::new(stub));
    s.set_names(["Alice"]).unwrap();
    assert_eq!(s.cards().len(), 1);

    let err = s.set_names(["Alice", "Bob"]).unwrap_err();
    assert!(err.to_string().contains("cannot draw Bob"));
    assert!(s.cards().is_empty());
    assert_eq!(s.inputs().names(), ["Alice", "Bob"]);
}

#[test]
fn apply_regenerates_once() {
    let (mut s, calls) = session();
    let mut inputs = CardInputs::with_names(["Alice", "Bob"]);
    inputs.set_page_size(PageSize::A5);
    s.apply(inputs).unwrap();
    assert_eq!(calls.borrow().len(), 2);
    assert!(
        calls
            .borrow()
            .iter()
            .all(|(_, p)| p.page_size == PageSize::A5)
    );
}
