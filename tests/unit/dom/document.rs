use super::*;
use crate::animation::props::Prop;

fn doc() -> Document {
    Document::new(Size::new(1280.0, 4000.0))
}

#[test]
fn created_elements_start_detached() {
    let mut d = doc();
    let e = d.create("section", Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!(!d.is_attached(e));
    assert!(d.rect(e).is_none());
    assert!(d.append(d.root(), e));
    assert!(d.is_attached(e));
}

#[test]
fn appending_under_detached_parent_keeps_subtree_detached() {
    let mut d = doc();
    let section = d.create("section", Rect::ZERO);
    let card = d.create("card", Rect::ZERO);
    assert!(d.append(section, card));
    assert!(!d.is_attached(card));
    d.append(d.root(), section);
    assert!(d.is_attached(card));
}

#[test]
fn remove_detaches_the_whole_subtree() {
    let mut d = doc();
    let section = d.create("section", Rect::ZERO);
    let card = d.create("card", Rect::ZERO);
    d.append(d.root(), section);
    d.append(section, card);
    d.remove(section);
    assert!(!d.is_attached(section));
    assert!(!d.is_attached(card));
    assert!(d.children(d.root()).is_empty());
}

#[test]
fn commit_to_detached_element_is_a_no_op() {
    let mut d = doc();
    let e = d.create("card", Rect::ZERO);
    let values = PropMap::from([(Prop::Opacity, 0.0)]);
    assert!(!d.commit(e, &values));
    assert_eq!(d.visual(e).unwrap().get(Prop::Opacity), 1.0);
    d.append(d.root(), e);
    assert!(d.commit(e, &values));
    assert_eq!(d.visual(e).unwrap().get(Prop::Opacity), 0.0);
    assert!(!d.commit(ElementId(999), &values));
}

#[test]
fn anchors_resolve_only_when_attached() {
    let mut d = doc();
    let e = d.create("section", Rect::new(0.0, 900.0, 1280.0, 1500.0));
    d.set_anchor(e, "contact");
    assert_eq!(d.find_anchor("contact"), None);
    d.append(d.root(), e);
    assert_eq!(d.find_anchor("contact"), Some(e));
    assert_eq!(d.content_height(), 4000.0);
}

#[test]
fn double_parenting_is_rejected() {
    let mut d = doc();
    let a = d.create("a", Rect::ZERO);
    let b = d.create("b", Rect::ZERO);
    assert!(d.append(d.root(), a));
    assert!(!d.append(b, a));
    assert!(!d.append(a, a));
    assert!(!d.append(a, d.root()));
}

#[test]
fn cycles_are_rejected() {
    let mut d = doc();
    let outer = d.create("outer", Rect::ZERO);
    let inner = d.create("inner", Rect::ZERO);
    assert!(d.append(outer, inner));
    assert!(!d.append(inner, outer));
}
