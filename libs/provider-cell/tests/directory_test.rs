use uuid::Uuid;

use provider_cell::models::{DirectoryRole, Provider};
use provider_cell::services::directory::ProviderDirectory;

fn provider(name: &str, category: &str, role: DirectoryRole, specialties: &[&str]) -> Provider {
    Provider {
        id: Uuid::new_v4(),
        display_name: name.to_string(),
        category: category.to_string(),
        role,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        fee: Some(80.0),
        rating: Some(4.8),
        review_count: Some(120),
        location: Some("San Diego".to_string()),
        years_experience: Some(8),
    }
}

fn seeded_directory() -> ProviderDirectory {
    let directory = ProviderDirectory::new();
    directory.replace_all(vec![
        provider("Dr. Emily Chen", "Pediatrician", DirectoryRole::Provider, &["Child Care"]),
        provider("Dr. Mark Reyes", "Neurology", DirectoryRole::Provider, &["Epilepsy", "Migraine"]),
        provider("Dr. Sofia Ali", "Neurology", DirectoryRole::Provider, &["Stroke Care"]),
        provider("Jordan Blake", "Neurology", DirectoryRole::Consumer, &[]),
    ]);
    directory
}

#[test]
fn find_by_category_returns_exact_matches() {
    let directory = seeded_directory();

    let neurologists = directory.find_by_category("Neurology");
    assert_eq!(neurologists.len(), 3);
    assert!(neurologists.iter().all(|p| p.category == "Neurology"));
}

#[test]
fn find_by_category_with_no_match_is_empty_not_error() {
    let directory = seeded_directory();

    assert!(directory.find_by_category("Dermatology").is_empty());
    assert!(directory.find_by_category("").is_empty());
}

#[test]
fn search_is_case_insensitive_over_name_category_and_specialties() {
    let directory = seeded_directory();

    let by_name = directory.search("emily");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].display_name, "Dr. Emily Chen");

    let by_category = directory.search("NEURO");
    assert_eq!(by_category.len(), 3);

    let by_specialty = directory.search("migraine");
    assert_eq!(by_specialty.len(), 1);
    assert_eq!(by_specialty[0].display_name, "Dr. Mark Reyes");
}

#[test]
fn empty_search_returns_full_directory() {
    let directory = seeded_directory();

    assert_eq!(directory.search("").len(), 4);
}

#[test]
fn group_by_category_excludes_non_provider_roles() {
    let directory = seeded_directory();

    let grouped = directory.grouped();

    assert_eq!(grouped["Pediatrician"].len(), 1);
    // The consumer record in Neurology is a domain exclusion.
    assert_eq!(grouped["Neurology"].len(), 2);
    assert!(grouped
        .values()
        .flatten()
        .all(|p| p.role == DirectoryRole::Provider));
}

#[test]
fn replace_all_is_wholesale() {
    let directory = seeded_directory();
    assert_eq!(directory.len(), 4);

    directory.replace_all(vec![provider(
        "Dr. Lena Ortiz",
        "Cardiology",
        DirectoryRole::Provider,
        &["Heart Health"],
    )]);

    assert_eq!(directory.len(), 1);
    assert!(directory.find_by_category("Neurology").is_empty());
    assert_eq!(directory.find_by_category("Cardiology").len(), 1);
}
