use std::sync::{Arc, Mutex};

use super::*;
use crate::style::store::MemoryStore;

#[derive(Clone, Default)]
struct SharedStore(Arc<Mutex<MemoryStore>>);

impl BoundsStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> FractreeResult<()> {
        self.0.lock().unwrap().set(key, value)
    }

    fn remove(&mut self, key: &str) -> FractreeResult<()> {
        self.0.lock().unwrap().remove(key)
    }
}

struct ReadOnlyStore;

impl BoundsStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, key: &str, _value: &str) -> FractreeResult<()> {
        Err(FractreeError::resource(format!("read-only: {key}")))
    }

    fn remove(&mut self, _key: &str) -> FractreeResult<()> {
        Ok(())
    }
}

fn defaults() -> StyleDefaults {
    StyleDefaults::from_json_str(
        r##"{
            "color": {"start": "#000000", "end": "#ffffff"},
            "width": {"start": 5, "end": 1},
            "length": {"start": 10, "end": 10},
            "opacity": {"start": 1, "end": 0.5},
            "symbol": {"start": "none", "end": "circle"},
            "symbolColor": {"start": "#ff0000", "end": "#00ff00"}
        }"##,
    )
    .unwrap()
}

#[test]
fn queries_before_layer_count_are_contract_violations() {
    let style = BranchStyle::new(Box::new(MemoryStore::new()));
    let err = style.width(0).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(style.snapshot().is_err());
}

#[test]
fn first_run_seeds_store_from_defaults() {
    let store = SharedStore::default();
    let mut style = BranchStyle::new(Box::new(store.clone()));
    style.initialise(Some(&defaults()), false).unwrap();

    let inner = store.0.lock().unwrap();
    assert_eq!(inner.get("branchWidthStart").as_deref(), Some("5"));
    assert_eq!(inner.get("symbolEnd").as_deref(), Some("circle"));
    drop(inner);

    style.set_num_layers(3).unwrap();
    assert_eq!(style.width(0).unwrap(), 5.0);
    assert_eq!(style.symbol(3).unwrap(), Symbol::Circle);
}

#[test]
fn cached_bounds_win_unless_forced() {
    let store = SharedStore::default();
    store.0.lock().unwrap().set("branchWidthStart", "8").unwrap();
    let mut style = BranchStyle::new(Box::new(store.clone()));

    style.initialise(Some(&defaults()), false).unwrap();
    assert_eq!(style.bounds(StyleAttribute::Width).start, StyleValue::Number(8.0));

    style.reset_to_defaults(&defaults()).unwrap();
    assert_eq!(style.bounds(StyleAttribute::Width).start, StyleValue::Number(5.0));
    assert_eq!(
        store.0.lock().unwrap().get("branchWidthStart").as_deref(),
        Some("5")
    );
}

#[test]
fn unparseable_cached_bound_is_treated_as_absent() {
    let store = SharedStore::default();
    store.0.lock().unwrap().set("branchOpacityEnd", "NaN").unwrap();
    let mut style = BranchStyle::new(Box::new(store.clone()));
    style.initialise(Some(&defaults()), false).unwrap();
    assert_eq!(style.bounds(StyleAttribute::Opacity).end, StyleValue::Number(0.5));
}

#[test]
fn missing_defaults_resource_falls_back_to_builtins() {
    let mut style = BranchStyle::new(Box::new(MemoryStore::new()));
    style
        .initialise_from_path(Path::new("target/no/such/defaults.json"), false)
        .unwrap();
    for attr in StyleAttribute::ALL {
        assert_eq!(style.bounds(attr), BoundPair::builtin(attr));
    }
    style.set_num_layers(4).unwrap();
    assert!(style.snapshot().is_ok());
}

#[test]
fn persistence_failures_do_not_block_styling() {
    let mut style = BranchStyle::new(Box::new(ReadOnlyStore));
    style.initialise(Some(&defaults()), false).unwrap();
    style.set_num_layers(2).unwrap();
    // Store writes failed, but the document's bounds still apply.
    assert_eq!(style.width(0).unwrap(), 5.0);
    assert_eq!(style.width(2).unwrap(), 1.0);
    assert_eq!(style.color(2).unwrap(), Rgb8::new(255, 255, 255));
    assert_eq!(style.symbol(2).unwrap(), Symbol::Circle);

    style.reset_to_defaults(&defaults()).unwrap();
    assert_eq!(style.length(1).unwrap(), 10.0);

    style.set_bounds(StyleAttribute::Width, "2", "6").unwrap();
    assert_eq!(style.width(2).unwrap(), 6.0);
}

#[test]
fn forced_reset_beats_stale_cached_values() {
    let store = SharedStore::default();
    store.0.lock().unwrap().set("branchWidthStart", "42").unwrap();
    let mut style = BranchStyle::new(Box::new(store.clone()));
    assert_eq!(style.bounds(StyleAttribute::Width).start, StyleValue::Number(42.0));

    style.initialise(Some(&defaults()), false).unwrap();
    assert_eq!(style.bounds(StyleAttribute::Width).start, StyleValue::Number(42.0));
    assert_eq!(style.bounds(StyleAttribute::Width).end, StyleValue::Number(1.0));

    style.initialise(Some(&defaults()), true).unwrap();
    assert_eq!(style.bounds(StyleAttribute::Width).start, StyleValue::Number(5.0));
    assert_eq!(store.get("branchWidthStart").as_deref(), Some("5"));
}

#[test]
fn set_num_layers_rebuilds_every_map() {
    let mut style = BranchStyle::new(Box::new(MemoryStore::new()));
    style.initialise(Some(&defaults()), true).unwrap();
    style.set_num_layers(6).unwrap();
    assert!(style.opacity(6).is_ok());

    style.set_num_layers(2).unwrap();
    assert_eq!(style.num_layers(), Some(2));
    for attr in StyleAttribute::ALL {
        assert!(style.get_value(attr, 2).is_ok());
        assert!(style.get_value(attr, 3).unwrap_err().is_contract_violation());
    }
}

#[test]
fn set_bounds_validates_and_rebuilds() {
    let store = SharedStore::default();
    let mut style = BranchStyle::new(Box::new(store.clone()));
    style.initialise(Some(&defaults()), true).unwrap();
    style.set_num_layers(2).unwrap();

    assert!(style.set_bounds(StyleAttribute::Color, "#zzzzzz", "#000000").is_err());
    assert_eq!(style.color(2).unwrap(), Rgb8::new(255, 255, 255));

    style.set_bounds(StyleAttribute::Color, "#000000", "#102030").unwrap();
    assert_eq!(style.color(2).unwrap(), Rgb8::new(0x10, 0x20, 0x30));
    assert_eq!(
        store.0.lock().unwrap().get("branchColorEnd").as_deref(),
        Some("#102030")
    );
}

#[test]
fn lookup_by_name() {
    let mut style = BranchStyle::new(Box::new(MemoryStore::new()));
    style.initialise(Some(&defaults()), true).unwrap();
    style.set_num_layers(1).unwrap();
    assert_eq!(
        style.get_value_by_name("symbolColor", 1).unwrap(),
        &StyleValue::Color(Rgb8::new(0, 255, 0))
    );
    let err = style.get_value_by_name("shadow", 0).unwrap_err();
    assert!(matches!(err, FractreeError::UnknownAttribute(_)));
}

#[test]
fn snapshot_resolves_every_layer() {
    let mut style = BranchStyle::new(Box::new(MemoryStore::new()));
    style.initialise(Some(&defaults()), true).unwrap();
    style.set_num_layers(3).unwrap();
    let snap = style.snapshot().unwrap();
    assert_eq!(snap.num_layers(), 3);
    let last = snap.layer(3).unwrap();
    assert_eq!(last.symbol, Symbol::Circle);
    assert_eq!(last.width, 1.0);
    assert_eq!(snap.layer(0).unwrap().length, 10.0);
    assert!(snap.layer(4).is_err());
}
