use super::*;

const TABLE: &str = r#"{"de": {"Save": "Speichern", "Empty": ""}, "fr": {"Save": "Enregistrer"}}"#;

#[test]
fn exact_language_is_selected() {
    let catalog = Catalog::from_table(TABLE, "fr").expect("table");
    assert_eq!(catalog.language(), "fr");
    assert_eq!(catalog.get_string("Save"), "Enregistrer");
}

#[test]
fn regional_tag_falls_back_to_primary_language() {
    let catalog = Catalog::from_table(TABLE, "de-AT").expect("table");
    assert_eq!(catalog.language(), "de");
    assert_eq!(catalog.get_string("Save"), "Speichern");
}

#[test]
fn unknown_language_returns_msgids() {
    let catalog = Catalog::from_table(TABLE, "nl").expect("table");
    assert_eq!(catalog.language(), SOURCE_LANGUAGE);
    assert_eq!(catalog.get_string("Save"), "Save");
}

#[test]
fn missing_and_empty_entries_return_msgid() {
    let catalog = Catalog::from_table(TABLE, "de").expect("table");
    assert_eq!(catalog.get_string("Delete"), "Delete");
    assert_eq!(catalog.get_string("Empty"), "Empty");
}

#[test]
fn malformed_table_is_an_error() {
    assert!(Catalog::from_table("[1, 2]", "de").is_err());
}

#[test]
fn embedded_table_has_german_notifications() {
    let catalog = Catalog::embedded("de-DE");
    assert_eq!(
        catalog.get_string("eduMFA Server Config saved."),
        "eduMFA-Server-Konfiguration gespeichert."
    );
    assert_eq!(Catalog::embedded("en").get_string("eduMFA Server Config saved."), "eduMFA Server Config saved.");
}
