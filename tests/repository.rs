use chrono::Utc;
use diesel::prelude::*;
use picto_catalog::domain::association::AssociationPivot;
use picto_catalog::domain::category::{Category, CategoryUpdate, NewCategory};
use picto_catalog::domain::phrase::NewPhrase;
use picto_catalog::domain::pictogram::{NewPictogram, Pictogram, PictogramUpdate};
use picto_catalog::domain::settings::UserSettings;
use picto_catalog::domain::types::{
    ButtonsPerScreen, CategoryId, CategoryName, CredentialHash, DisplayName, Email, Ownership,
    PhraseText, PictogramId, PictogramKind, PictogramName, Scope, UserId, Voice,
};
use picto_catalog::domain::user::NewUser;
use picto_catalog::repository::{
    AssociationQuery, AssociationReader, AssociationWriter, CategoryReader, CategoryWriter,
    DieselRepository, HiddenPictogramReader, HiddenPictogramWriter, OwnerFilter, PhraseReader,
    PhraseWriter, PictogramReader, PictogramWriter, RepositoryError, UserReader,
    UserSettingsReader, UserSettingsWriter, UserWriter,
};
use picto_catalog::schema::category_pictograms;

mod common;

fn new_user(email: &str) -> NewUser {
    NewUser {
        display_name: DisplayName::new("Test User").expect("valid display name"),
        email: Email::new(email).expect("valid email"),
        credential_hash: CredentialHash::new("$argon2id$hash").expect("valid hash"),
        created_at: Utc::now().naive_utc(),
    }
}

fn new_category(name: &str, owner: Ownership) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        image: None,
        owner,
        created_at: now,
        updated_at: now,
    }
}

fn new_pictogram(name: &str, owner: Ownership) -> NewPictogram {
    let now = Utc::now().naive_utc();
    NewPictogram {
        name: PictogramName::new(name).expect("valid pictogram name"),
        image: None,
        kind: PictogramKind::new("noun").expect("valid kind"),
        owner,
        created_at: now,
        updated_at: now,
    }
}

fn add_pictogram(repo: &DieselRepository, name: &str, owner: Ownership) -> Pictogram {
    repo.create_pictogram(&new_pictogram(name, owner), &[])
        .expect("should create pictogram")
}

fn add_category(
    repo: &DieselRepository,
    name: &str,
    owner: Ownership,
    pictogram_ids: &[PictogramId],
) -> Category {
    repo.create_category(&new_category(name, owner), pictogram_ids)
        .expect("should create category")
}

fn new_phrase(user_id: UserId, text: &str) -> NewPhrase {
    NewPhrase {
        user_id,
        text: PhraseText::new(text).expect("valid phrase"),
        created_at: Utc::now().naive_utc(),
    }
}

fn pairs_in(repo: &DieselRepository, scope: Scope) -> Vec<(CategoryId, PictogramId)> {
    repo.list_associations(AssociationQuery::new(scope))
        .expect("should list associations")
        .into_iter()
        .map(|a| (a.category_id, a.pictogram_id))
        .collect()
}

#[test]
fn test_user_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_user(&new_user("Ann@Example.com"))
        .expect("should create user");
    assert_eq!(created.email.as_str(), "ann@example.com");

    let by_id = repo
        .get_user_by_id(created.id)
        .expect("lookup")
        .expect("user exists");
    assert_eq!(by_id, created);

    let by_email = repo
        .get_user_by_email(&Email::new("ann@example.com").unwrap())
        .expect("lookup");
    assert_eq!(by_email.map(|u| u.id), Some(created.id));

    let duplicate = repo.create_user(&new_user("ann@example.com"));
    assert!(matches!(duplicate, Err(RepositoryError::Conflict(_))));
}

#[test]
fn category_listing_respects_ownership_filters() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let bob = repo.create_user(&new_user("bob@example.com")).unwrap().id;

    let food = add_category(&repo, "Food", Ownership::General, &[]);
    let mine = add_category(&repo, "Mine", Ownership::OwnedBy(ann), &[]);
    add_category(&repo, "Theirs", Ownership::OwnedBy(bob), &[]);

    let general: Vec<_> = repo
        .list_categories(OwnerFilter::General)
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(general, vec![food.id]);

    let owned: Vec<_> = repo
        .list_categories(OwnerFilter::OwnedBy(ann))
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(owned, vec![mine.id]);

    let visible: Vec<_> = repo
        .list_categories(OwnerFilter::VisibleTo(ann))
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(visible, vec![food.id, mine.id]);
}

#[test]
fn create_category_links_pictograms_in_owner_scope() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let dog = add_pictogram(&repo, "dog", Ownership::OwnedBy(ann));

    let animals = add_category(&repo, "Animals", Ownership::OwnedBy(ann), &[cat.id, dog.id]);

    assert_eq!(
        pairs_in(&repo, Scope::OwnedBy(ann)),
        vec![(animals.id, cat.id), (animals.id, dog.id)]
    );
    assert!(pairs_in(&repo, Scope::General).is_empty());
}

#[test]
fn create_category_with_missing_pictogram_rolls_back() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let missing = PictogramId::new(999).unwrap();

    let result = repo.create_category(
        &new_category("Animals", Ownership::General),
        &[cat.id, missing],
    );
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    let categories = repo.list_categories(OwnerFilter::General).unwrap();
    assert!(categories.is_empty());
    assert!(pairs_in(&repo, Scope::General).is_empty());
}

#[test]
fn general_association_cannot_target_private_pictogram() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let private = add_pictogram(&repo, "mine", Ownership::OwnedBy(ann));
    let food = add_category(&repo, "Food", Ownership::General, &[]);

    let result = repo.create_associations(food.id, &[private.id], Scope::General);
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[test]
fn duplicate_scoped_association_is_a_conflict() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[cat.id]);

    let again = repo.create_associations(food.id, &[cat.id], Scope::General);
    assert!(matches!(again, Err(RepositoryError::Conflict(_))));

    let repeated = repo.create_associations(food.id, &[cat.id, cat.id], Scope::OwnedBy(ann));
    assert!(matches!(repeated, Err(RepositoryError::Conflict(_))));

    // Same pair in another scope is a separate fact.
    assert_eq!(
        repo.create_associations(food.id, &[cat.id], Scope::OwnedBy(ann))
            .unwrap(),
        1
    );
}

#[test]
fn unique_indexes_reject_raw_duplicates() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[cat.id]);

    let mut conn = test_db.pool().get().expect("connection");
    let result = diesel::insert_into(category_pictograms::table)
        .values((
            category_pictograms::category_id.eq(food.id.get()),
            category_pictograms::pictogram_id.eq(cat.id.get()),
            category_pictograms::created_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn);
    assert!(result.is_err());
}

#[test]
fn replace_with_empty_set_clears_only_that_scope() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[cat.id]);
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;

    assert_eq!(
        pairs_in(&repo, Scope::OwnedBy(ann)),
        vec![(food.id, cat.id)]
    );

    repo.replace_category_pictograms(food.id, &[], Scope::OwnedBy(ann))
        .expect("should replace");
    repo.replace_category_pictograms(food.id, &[], Scope::OwnedBy(ann))
        .expect("replacing again is a no-op");

    assert!(pairs_in(&repo, Scope::OwnedBy(ann)).is_empty());
    assert_eq!(pairs_in(&repo, Scope::General), vec![(food.id, cat.id)]);
}

#[test]
fn failed_replace_keeps_previous_associations() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let dog = add_pictogram(&repo, "dog", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[cat.id]);

    let result = repo.replace_category_pictograms(
        food.id,
        &[dog.id, PictogramId::new(404).unwrap()],
        Scope::General,
    );
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    assert_eq!(pairs_in(&repo, Scope::General), vec![(food.id, cat.id)]);
}

#[test]
fn update_pictogram_replaces_categories_in_given_scope() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let food = add_category(&repo, "Food", Ownership::General, &[]);
    let pets = add_category(&repo, "Pets", Ownership::OwnedBy(ann), &[]);
    let cat = repo
        .create_pictogram(&new_pictogram("cat", Ownership::General), &[food.id])
        .unwrap();

    let update = PictogramUpdate {
        name: PictogramName::new("kitten").unwrap(),
        image: None,
        kind: PictogramKind::new("noun").unwrap(),
    };
    let updated = repo
        .update_pictogram(cat.id, &update, &[pets.id], Scope::OwnedBy(ann))
        .expect("should update");
    assert_eq!(updated.name.as_str(), "kitten");

    assert_eq!(pairs_in(&repo, Scope::General), vec![(food.id, cat.id)]);
    assert_eq!(
        pairs_in(&repo, Scope::OwnedBy(ann)),
        vec![(pets.id, cat.id)]
    );
}

#[test]
fn update_category_of_unknown_id_is_not_found() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let update = CategoryUpdate {
        name: CategoryName::new("Nothing").unwrap(),
        image: None,
    };

    let result = repo.update_category(CategoryId::new(5).unwrap(), &update, &[], Scope::General);
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[test]
fn deleting_entities_cascades_to_every_scope() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let dog = add_pictogram(&repo, "dog", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[cat.id, dog.id]);
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    repo.hide_pictogram(ann, dog.id).unwrap();

    repo.delete_pictogram(dog.id)
        .expect("should delete pictogram");
    assert_eq!(pairs_in(&repo, Scope::General), vec![(food.id, cat.id)]);
    assert_eq!(
        pairs_in(&repo, Scope::OwnedBy(ann)),
        vec![(food.id, cat.id)]
    );
    assert!(repo.list_hidden_pictograms(ann).unwrap().is_empty());

    assert_eq!(repo.delete_category(food.id).unwrap(), 1);
    assert!(pairs_in(&repo, Scope::General).is_empty());
    assert!(pairs_in(&repo, Scope::OwnedBy(ann)).is_empty());
}

#[test]
fn bootstrap_clones_general_graph_exactly_once() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let dog = add_pictogram(&repo, "dog", Ownership::General);
    let animals = add_category(&repo, "Animals", Ownership::General, &[cat.id, dog.id]);
    let food = add_category(&repo, "Food", Ownership::General, &[dog.id]);

    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let expected = vec![(animals.id, cat.id), (animals.id, dog.id), (food.id, dog.id)];
    assert_eq!(pairs_in(&repo, Scope::OwnedBy(ann)), expected);

    assert_eq!(repo.bootstrap_user_associations(ann).unwrap(), 0);
    assert_eq!(pairs_in(&repo, Scope::OwnedBy(ann)), expected);

    let unknown = repo.bootstrap_user_associations(UserId::new(77).unwrap());
    assert!(matches!(unknown, Err(RepositoryError::NotFound(_))));
}

#[test]
fn association_listing_puts_general_rows_first() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let dog = add_pictogram(&repo, "dog", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[]);

    repo.create_associations(food.id, &[dog.id], Scope::OwnedBy(ann))
        .unwrap();
    repo.create_associations(food.id, &[cat.id], Scope::General)
        .unwrap();

    let rows = repo
        .list_associations(
            AssociationQuery::new(Scope::OwnedBy(ann))
                .category(food.id)
                .with_general(),
        )
        .unwrap();
    let scopes: Vec<_> = rows.iter().map(|a| a.scope).collect();
    assert_eq!(scopes, vec![Scope::General, Scope::OwnedBy(ann)]);

    assert_eq!(
        repo.delete_associations(AssociationPivot::Category(food.id), Scope::OwnedBy(ann))
            .unwrap(),
        1
    );
    assert_eq!(
        repo.delete_associations_for_entity(AssociationPivot::Category(food.id))
            .unwrap(),
        1
    );
}

#[test]
fn hide_entries_are_idempotent() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let cat = add_pictogram(&repo, "cat", Ownership::General);

    assert_eq!(repo.hide_pictogram(ann, cat.id).unwrap(), 1);
    assert_eq!(repo.hide_pictogram(ann, cat.id).unwrap(), 0);
    assert_eq!(repo.list_hidden_pictograms(ann).unwrap(), vec![cat.id]);
    assert_eq!(repo.unhide_pictogram(ann, cat.id).unwrap(), 1);
    assert_eq!(repo.unhide_pictogram(ann, cat.id).unwrap(), 0);
}

#[test]
fn delete_user_removes_owned_content_only() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[cat.id]);
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let bob = repo.create_user(&new_user("bob@example.com")).unwrap().id;
    let mine = add_pictogram(&repo, "mine", Ownership::OwnedBy(ann));
    add_category(&repo, "Pets", Ownership::OwnedBy(ann), &[mine.id, cat.id]);
    repo.hide_pictogram(ann, cat.id).unwrap();

    assert_eq!(repo.delete_user(ann).unwrap(), 1);

    assert!(repo.get_user_by_id(ann).unwrap().is_none());
    assert!(repo.get_pictogram_by_id(mine.id).unwrap().is_none());
    let categories = repo.list_categories(OwnerFilter::OwnedBy(ann)).unwrap();
    assert!(categories.is_empty());
    assert!(pairs_in(&repo, Scope::OwnedBy(ann)).is_empty());
    assert_eq!(pairs_in(&repo, Scope::General), vec![(food.id, cat.id)]);
    assert_eq!(
        pairs_in(&repo, Scope::OwnedBy(bob)),
        vec![(food.id, cat.id)]
    );
}

#[test]
fn lookups_by_ids_skip_unknown_ids() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[]);

    let pictograms = repo
        .get_pictograms_by_ids(&[cat.id, PictogramId::new(50).unwrap()])
        .unwrap();
    assert_eq!(pictograms.len(), 1);

    let categories = repo
        .get_categories_by_ids(&[CategoryId::new(50).unwrap(), food.id])
        .unwrap();
    assert_eq!(categories.len(), 1);
}

#[test]
fn later_replace_of_same_scope_wins() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let dog = add_pictogram(&repo, "dog", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[]);
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let scope = Scope::OwnedBy(ann);

    repo.replace_category_pictograms(food.id, &[cat.id, dog.id], scope)
        .expect("first replace");
    repo.replace_category_pictograms(food.id, &[dog.id], scope)
        .expect("second replace");

    assert_eq!(pairs_in(&repo, scope), vec![(food.id, dog.id)]);
}

#[test]
fn concurrent_replaces_of_same_scope_never_mix() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let dog = add_pictogram(&repo, "dog", Ownership::General);
    let owl = add_pictogram(&repo, "owl", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[]);
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let scope = Scope::OwnedBy(ann);
    let first = vec![(food.id, cat.id), (food.id, dog.id)];
    let second = vec![(food.id, owl.id)];

    for _ in 0..5 {
        std::thread::scope(|s| {
            let spawn_replace = |repo: DieselRepository, ids: Vec<PictogramId>| {
                s.spawn(move || repo.replace_category_pictograms(food.id, &ids, scope))
            };
            let left = spawn_replace(repo.clone(), vec![cat.id, dog.id]);
            let right = spawn_replace(repo.clone(), vec![owl.id]);
            assert_eq!(left.join().unwrap().expect("first writer"), 2);
            assert_eq!(right.join().unwrap().expect("second writer"), 1);
        });

        let pairs = pairs_in(&repo, scope);
        assert!(pairs == first || pairs == second, "mixed result: {pairs:?}");
    }
}

#[test]
fn replace_behind_a_held_write_lock_is_a_database_error() {
    use diesel::connection::SimpleConnection;

    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let cat = add_pictogram(&repo, "cat", Ownership::General);
    let food = add_category(&repo, "Food", Ownership::General, &[]);
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;

    let mut holder = test_db.pool().get().expect("should get connection");
    holder
        .batch_execute("BEGIN IMMEDIATE")
        .expect("should take write lock");

    let result = repo.replace_category_pictograms(food.id, &[cat.id], Scope::OwnedBy(ann));
    assert!(matches!(result, Err(RepositoryError::DatabaseError(_))));

    holder
        .batch_execute("ROLLBACK")
        .expect("should release write lock");
    assert_eq!(
        repo.replace_category_pictograms(food.id, &[cat.id], Scope::OwnedBy(ann))
            .expect("should replace once the lock is released"),
        1
    );
}

#[test]
fn phrases_are_scoped_to_their_user() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let bob = repo.create_user(&new_user("bob@example.com")).unwrap().id;

    let first = repo
        .create_phrase(&new_phrase(ann, "I want water"))
        .unwrap();
    repo.create_phrase(&new_phrase(bob, "Hello")).unwrap();
    let second = repo.create_phrase(&new_phrase(ann, "I am tired")).unwrap();
    assert_eq!(first.user_id, ann);

    let ids: Vec<_> = repo
        .list_phrases(ann)
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(repo.list_phrases(bob).unwrap().len(), 1);
}

#[test]
fn user_settings_upsert_and_delete() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    assert!(repo.get_user_settings(ann).unwrap().is_none());

    let mut settings = UserSettings::defaults(ann, Utc::now().naive_utc());
    settings.voice = Voice::Male;
    let saved = repo.save_user_settings(&settings).unwrap();
    assert_eq!(saved.voice, Voice::Male);
    assert_eq!(saved.buttons_per_screen, ButtonsPerScreen::default());

    settings.buttons_per_screen = ButtonsPerScreen::new(24).unwrap();
    settings.show_by_category = true;
    repo.save_user_settings(&settings).unwrap();
    let loaded = repo
        .get_user_settings(ann)
        .unwrap()
        .expect("stored settings");
    assert_eq!(loaded.buttons_per_screen.get(), 24);
    assert!(loaded.show_by_category);
    assert_eq!(loaded.voice, Voice::Male);

    assert_eq!(repo.delete_user_settings(ann).unwrap(), 1);
    assert_eq!(repo.delete_user_settings(ann).unwrap(), 0);
    assert!(repo.get_user_settings(ann).unwrap().is_none());
}

#[test]
fn delete_user_drops_phrases_and_settings() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let ann = repo.create_user(&new_user("ann@example.com")).unwrap().id;
    let bob = repo.create_user(&new_user("bob@example.com")).unwrap().id;
    repo.create_phrase(&new_phrase(ann, "Hello")).unwrap();
    repo.create_phrase(&new_phrase(bob, "Hi")).unwrap();
    repo.save_user_settings(&UserSettings::defaults(ann, Utc::now().naive_utc()))
        .unwrap();

    repo.delete_user(ann).unwrap();

    assert!(repo.list_phrases(ann).unwrap().is_empty());
    assert!(repo.get_user_settings(ann).unwrap().is_none());
    assert_eq!(repo.list_phrases(bob).unwrap().len(), 1);
}
