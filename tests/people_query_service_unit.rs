use std::sync::Arc;

use qaboard::application::error::ApplicationError;
use qaboard::application::queries::people::{ListPeopleQuery, PeopleQueryService};
use qaboard::application::services::PeopleSettings;

mod support;

use support::{
    InMemoryProfileRepo, InMemorySpaceRepo, admin_user, fixed_now, plain_user, population,
    private_settings,
};

fn service(
    profiles: Arc<InMemoryProfileRepo>,
    spaces: Arc<InMemorySpaceRepo>,
    settings: PeopleSettings,
) -> PeopleQueryService {
    PeopleQueryService::new(profiles, spaces, settings)
}

#[tokio::test]
async fn anonymous_listing_of_private_space_is_unauthorized() {
    let profiles = Arc::new(InMemoryProfileRepo::new(population(3)));
    let svc = service(profiles.clone(), Arc::new(InMemorySpaceRepo::default()), private_settings());

    let err = svc.list_people(None, ListPeopleQuery::default()).await.unwrap_err();

    assert!(matches!(err, ApplicationError::Unauthorized(_)));
    assert_eq!(profiles.find_calls(), 0);
}

#[tokio::test]
async fn anonymous_listing_is_confined_to_default_space() {
    let profiles = Arc::new(InMemoryProfileRepo::new(population(3)));
    let svc = service(profiles.clone(), Arc::new(InMemorySpaceRepo::default()), PeopleSettings::default());

    let page = svc
        .list_people(
            None,
            ListPeopleQuery {
                q: Some("bob OR (x)".into()),
                space: Some("*".into()),
                ..ListPeopleQuery::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.query, "properties.spaces:\"default\" AND (bob x)");
    assert_eq!(page.profiles.len(), 3);
    assert_eq!(page.pager.count, 3);
    assert!(page.spaces.is_none());
}

#[tokio::test]
async fn members_may_list_their_own_space() {
    let profiles = Arc::new(InMemoryProfileRepo::new(population(1)));
    let svc = service(profiles.clone(), Arc::new(InMemorySpaceRepo::default()), private_settings());
    let user = plain_user(fixed_now());

    let page = svc
        .list_people(
            Some(&user),
            ListPeopleQuery {
                space: Some("eng".into()),
                ..ListPeopleQuery::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.query, "properties.spaces:\"eng\"");
}

#[tokio::test]
async fn bulk_edit_flag_is_ignored_for_non_admins() {
    let spaces = Arc::new(InMemorySpaceRepo::new(&["default", "eng"]));
    let svc = service(Arc::new(InMemoryProfileRepo::new(population(2))), spaces.clone(), PeopleSettings::default());
    let user = plain_user(fixed_now());

    let page = svc
        .list_people(
            Some(&user),
            ListPeopleQuery {
                bulk_edit: true,
                ..ListPeopleQuery::default()
            },
        )
        .await
        .unwrap();

    assert!(page.spaces.is_none());
    assert_eq!(spaces.find_calls(), 0);
}

#[tokio::test]
async fn admin_bulk_edit_uses_raw_query_and_loads_spaces() {
    let profiles = Arc::new(InMemoryProfileRepo::new(population(2)));
    let spaces = Arc::new(InMemorySpaceRepo::new(&["default", "eng", "ops"]));
    let svc = service(profiles.clone(), spaces.clone(), PeopleSettings::default());
    let admin = admin_user(fixed_now());

    let page = svc
        .list_people(
            Some(&admin),
            ListPeopleQuery {
                q: Some("name:(ann OR bob)".into()),
                bulk_edit: true,
                ..ListPeopleQuery::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.query, "name:(ann OR bob)");
    let names: Vec<String> = page.spaces.unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["default", "eng", "ops"]);
}

#[tokio::test]
async fn pages_and_sort_are_forwarded() {
    let profiles = Arc::new(InMemoryProfileRepo::new(population(45)));
    let svc = service(profiles.clone(), Arc::new(InMemorySpaceRepo::default()), PeopleSettings::default());

    let page = svc
        .list_people(
            None,
            ListPeopleQuery {
                page: Some(2),
                sortby: Some("name; drop".into()),
                ..ListPeopleQuery::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.pager.page, 2);
    assert_eq!(page.pager.sortby, "timestamp");
    assert_eq!(page.profiles.len(), 15);
    assert_eq!(page.profiles[0].id, "u030");
}
