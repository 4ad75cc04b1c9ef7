use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Prefs {
    open: bool,
}

#[test]
fn memory_store_sets_and_removes() {
    let store = MemoryStore::default();
    store.set("k", "v");
    assert_eq!(store.get("k").as_deref(), Some("v"));
    store.remove("k");
    assert_eq!(store.get("k"), None);
}

#[test]
fn clones_share_entries() {
    let store = MemoryStore::default();
    store.clone().set("k", "v");
    assert_eq!(store.get("k").as_deref(), Some("v"));
}

#[test]
fn json_helpers_round_trip_and_tolerate_garbage() {
    let store = MemoryStore::default();
    save_json(&store, "prefs", &Prefs { open: true });
    assert_eq!(load_json::<Prefs>(&store, "prefs"), Some(Prefs { open: true }));

    store.set("prefs", "[]");
    assert_eq!(load_json::<Prefs>(&store, "prefs"), None);
    assert_eq!(load_json::<Prefs>(&store, "missing"), None);
}

#[test]
fn local_storage_is_empty_off_browser() {
    LocalStorage.set("k", "v");
    assert_eq!(LocalStorage.get("k"), None);
}
