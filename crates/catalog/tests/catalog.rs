use mediacenter_catalog::{
    Catalog, Folder, GroupKey, LanguageFilter, Policy, Selection, count_files, initial_selection, locate,
};
use mediacenter_manifest::models::{FileType, LanguageCode, LanguageTable};
use mediacenter_manifest::{SkipReason, parse_categories, parse_manifest};
use rstest::{fixture, rstest};

const MANIFEST: &str = r#"{
    "files": [
        { "hash": "h1", "fullFileName": "en_Manual.pdf", "languageCode": "en", "folderLocation": ["Docs"] },
        { "hash": "h1", "fullFileName": "de_Manual.pdf", "languageCode": "de", "folderLocation": ["Docs"] },
        { "hash": "h2", "fullFileName": "Contract.pdf", "languageCode": "en", "folderLocation": ["Docs", "Legal", "2023"] },
        { "hash": "h3", "fullFileName": "Contract.pdf", "languageCode": "en", "folderLocation": ["Docs", "Legal", "2024"] },
        { "hash": "h4", "fullFileName": "fr_Intro.mp4", "folderLocation": ["Media", " Clips "] },
        { "hash": "h5", "fullFileName": "https://example.com/tour", "languageCode": "de", "folderLocation": ["Media"] },
        { "hash": "h6", "fullFileName": "orphan.pdf", "languageCode": "en", "folderLocation": [] },
        { "hash": "", "fullFileName": "nohash.pdf", "folderLocation": ["Docs"] },
        "not a record"
    ]
}"#;

const CATEGORIES: &str = r#"[
    { "name": "Docs", "icon": "📄", "description": "Manuals and paperwork" },
    { "id": "media", "name": "Videos", "icon": "🎬" },
    { "name": 42 }
]"#;

#[fixture]
fn catalog() -> Catalog {
    let manifest = parse_manifest(MANIFEST).unwrap();
    let categories = parse_categories(CATEGORIES).unwrap();
    Catalog::new(&manifest.records, &categories)
}

fn hashes<F: Folder + ?Sized>(node: &F) -> Vec<&str> {
    node.files().iter().map(|f| f.hash.as_str()).collect()
}

#[test]
fn test_manifest_skips_malformed_entries() {
    let manifest = parse_manifest(MANIFEST).unwrap();
    assert_eq!(manifest.records.len(), 6);
    let reasons: Vec<_> = manifest.skipped.iter().map(|s| (s.index, s.reason)).collect();
    assert_eq!(
        reasons,
        vec![
            (6, SkipReason::EmptyFolderLocation),
            (7, SkipReason::MissingHash),
            (8, SkipReason::Undecodable),
        ]
    );
    let clip = manifest.records.iter().find(|r| r.hash == "h4").unwrap();
    assert_eq!(clip.folder_location, vec!["Media", "Clips"]);
    assert_eq!(clip.language.as_ref().map(LanguageCode::as_str), Some("fr"));
    assert_eq!(clip.kind, FileType::Video);
    let link = manifest.records.iter().find(|r| r.hash == "h5").unwrap();
    assert_eq!(link.kind, FileType::ExternalLink);
}

#[rstest]
fn test_hierarchy_and_metadata(catalog: Catalog) {
    let tree = catalog.tree();
    assert_eq!(tree.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["Docs", "Media"]);

    let docs = &tree[0];
    assert_eq!(docs.icon.as_deref(), Some("📄"));
    assert_eq!(docs.description.as_deref(), Some("Manuals and paperwork"));
    assert_eq!(hashes(docs), vec!["h1", "h1"]);
    let legal = &docs.subfolders[0];
    assert_eq!((legal.name.as_str(), legal.level, legal.path.as_str()), ("Legal", 1, "Docs/Legal"));
    assert_eq!(legal.subfolders.iter().map(|s| s.level).collect::<Vec<_>>(), vec![2, 2]);
    assert_eq!(count_files(legal), 2);

    // Matched by id, not by name.
    let media = &tree[1];
    assert_eq!(media.icon.as_deref(), Some("🎬"));
    assert_eq!(media.description, None);
}

#[rstest]
#[case("de", vec!["h1"], "de")]
#[case("fr", vec!["h1"], "en")]
#[case("en", vec!["h1"], "en")]
fn test_fallback_picks_one_variant(
    catalog: Catalog,
    #[case] selection: &str,
    #[case] expected: Vec<&str>,
    #[case] language: &str,
) {
    let view = catalog.view(&LanguageFilter::default(), &selection.parse().unwrap());
    let docs = &view.categories[0];
    assert_eq!(hashes(docs), expected);
    assert_eq!(docs.files[0].language.as_ref().unwrap(), language);
}

#[rstest]
fn test_strict_view_counts(catalog: Catalog) {
    let strict = LanguageFilter::new(Policy::Strict);
    let view = catalog.view(&strict, &"de".parse().unwrap());
    assert_eq!(view.count(), 2);
    let summaries = view.summaries();
    assert_eq!(
        summaries.iter().map(|s| (s.id.as_str(), s.total_files)).collect::<Vec<_>>(),
        vec![("docs", 1), ("media", 1)]
    );

    let view = catalog.view(&strict, &"ja".parse().unwrap());
    assert!(view.is_empty());
    assert_eq!(view.categories.len(), 2);
    let pruned = view.pruned();
    assert!(pruned.categories.iter().all(|c| c.subfolders.is_empty()));
}

#[rstest]
#[case(Policy::Strict)]
#[case(Policy::Fallback)]
fn test_all_is_passthrough(catalog: Catalog, #[case] policy: Policy) {
    let view = catalog.view(&LanguageFilter::new(policy), &Selection::All);
    assert_eq!(view.categories, catalog.tree());
    assert_eq!(view.count(), 6);
}

#[rstest]
fn test_group_by_document_name(catalog: Catalog) {
    // h2 and h3 share a name but live in different nodes, so both survive.
    let filter = LanguageFilter::default().with_group_by(GroupKey::DocumentName);
    let view = catalog.view(&filter, &"de".parse().unwrap());
    let legal = &view.categories[0].subfolders[0];
    assert_eq!(count_files(legal), 2);
    assert_eq!(hashes(&view.categories[0]), vec!["h1"]);
}

#[rstest]
fn test_locate_in_tree_and_view(catalog: Catalog) {
    let path = catalog.locate("h3").unwrap();
    assert_eq!(path.nodes, vec!["docs", "docs-legal", "docs-legal-2024"]);
    assert!(catalog.locate("h6").is_none());

    // Hidden by the selection, but still in the full tree.
    let view = catalog.view(&LanguageFilter::new(Policy::Strict), &"de".parse().unwrap());
    assert!(view.locate("h4").is_none());
    assert_eq!(catalog.locate("h4").unwrap().nodes, vec!["media", "media-clips"]);
    assert_eq!(view.locate("h5"), locate(catalog.tree(), "h5"));
}

#[rstest]
fn test_languages_and_initial_selection(catalog: Catalog) {
    let codes: Vec<&str> = catalog.languages().iter().map(LanguageCode::as_str).collect();
    assert_eq!(codes, vec!["en", "de", "fr"]);

    let fallback = LanguageCode::default_language();
    let table = LanguageTable::default();
    let order = |options: &[mediacenter_catalog::LanguageOption]| -> Vec<String> {
        options.iter().map(|o| o.selection.to_string()).collect()
    };
    assert_eq!(order(&catalog.language_options(None, &fallback, &table)), vec!["all", "en", "de", "fr"]);

    let device: LanguageCode = "fr".parse().unwrap();
    let options = catalog.language_options(Some(&device), &fallback, &table);
    assert_eq!(order(&options), vec!["all", "fr", "de", "en"]);

    assert_eq!(initial_selection(None, Some("fr-CA"), &options, &fallback).to_string(), "fr");
    assert_eq!(initial_selection(Some("all"), Some("fr-CA"), &options, &fallback), Selection::All);
    assert_eq!(initial_selection(Some("es"), None, &options, &fallback).to_string(), "en");
}

#[test]
fn test_malformed_documents_raise() {
    assert!(parse_manifest("{").is_err());
    assert!(parse_manifest(r#"{"items": []}"#).is_err());
    assert!(parse_categories("42").is_err());
}

#[test]
fn test_catalog_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Catalog>();
    assert_send_sync::<mediacenter_catalog::View>();
}
