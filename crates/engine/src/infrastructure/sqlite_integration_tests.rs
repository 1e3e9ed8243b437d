use chrono::{TimeZone, Utc};
use sqlx::Row;

use ghostagotchi_domain::{Message, MessageSender, OwnerId, Pet, PetId, PetName, Profile, Username};

use crate::infrastructure::ports::{MessageRepo, PetRepo, ProfileRepo};
use crate::infrastructure::sqlite::{connect, SqliteRepositories};

fn owner(token: &str) -> OwnerId {
    OwnerId::new(token).expect("owner id")
}

fn pet_named(token: &str, name: &str) -> Pet {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    Pet::adopt(owner(token), PetName::new(name).expect("pet name"), now)
}

async fn open_repos(db_path: &str) -> SqliteRepositories {
    let pool = connect(db_path).await.expect("connect");
    SqliteRepositories::new(pool).await.expect("schema")
}

#[tokio::test]
async fn pet_round_trips_and_survives_reopen() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("game.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let mut pet = pet_named("owner-1", "Casper");
    pet.feed(Utc.timestamp_opt(1_700_000_100, 0).unwrap());

    {
        let repos = open_repos(&db_path_str).await;
        repos.pets.create(&pet).await.expect("create");
    }

    // Fresh pool over the same file simulates a restart.
    let repos = open_repos(&db_path_str).await;
    let loaded = repos
        .pets
        .get_by_owner(&owner("owner-1"))
        .await
        .expect("get")
        .expect("pet exists");

    assert_eq!(loaded.id, pet.id);
    assert_eq!(loaded.name.as_str(), "Casper");
    assert_eq!(loaded.level, pet.level);
    assert_eq!(loaded.experience, pet.experience);
    assert_eq!(loaded.hunger, pet.hunger);
    assert_eq!(loaded.mood, pet.mood);
    assert_eq!(loaded.created_at, pet.created_at);
    assert_eq!(loaded.last_fed_at, pet.last_fed_at);
    assert_eq!(loaded.last_played_at, None);

    let by_id = repos
        .pets
        .get_by_id(pet.id)
        .await
        .expect("get by id")
        .expect("pet exists");
    assert_eq!(by_id.owner_id.as_str(), "owner-1");

    let absent = repos.pets.get_by_id(PetId::new()).await.expect("get by id");
    assert!(absent.is_none());
}

#[tokio::test]
async fn second_pet_for_same_owner_is_rejected() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("game.db").to_string_lossy().to_string();
    let repos = open_repos(&db_path).await;

    let first = pet_named("owner-1", "Casper");
    let second = pet_named("owner-1", "Boo");

    repos.pets.create(&first).await.expect("first create");
    let err = repos
        .pets
        .create(&second)
        .await
        .expect_err("duplicate owner must fail");

    assert!(err.is_constraint_violation());
    assert!(err.to_string().contains("User already has a pet"));

    // The original pet is untouched.
    let kept = repos
        .pets
        .get_by_owner(&owner("owner-1"))
        .await
        .expect("get")
        .expect("pet exists");
    assert_eq!(kept.id, first.id);
}

#[tokio::test]
async fn care_update_is_guarded_by_experience() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("game.db").to_string_lossy().to_string();
    let repos = open_repos(&db_path).await;

    let mut pet = pet_named("owner-1", "Casper");
    repos.pets.create(&pet).await.expect("create");

    let read_experience = pet.experience;
    pet.feed(Utc.timestamp_opt(1_700_000_200, 0).unwrap());

    let updated = repos
        .pets
        .update_care(&pet, read_experience)
        .await
        .expect("guarded update");
    assert!(updated);

    // A writer holding the stale experience loses.
    let stale = repos
        .pets
        .update_care(&pet, read_experience)
        .await
        .expect("stale update");
    assert!(!stale);

    let stored = repos
        .pets
        .get_by_owner(&owner("owner-1"))
        .await
        .expect("get")
        .expect("pet exists");
    assert_eq!(stored.experience, pet.experience);
    assert_eq!(stored.last_fed_at, pet.last_fed_at);
}

#[tokio::test]
async fn ranking_orders_pets_and_joins_usernames() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("game.db").to_string_lossy().to_string();
    let repos = open_repos(&db_path).await;

    let mut older = pet_named("owner-1", "Older");
    older.level = 5;
    older.experience = 450;
    older.created_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let mut younger = pet_named("owner-2", "Younger");
    younger.level = 5;
    younger.experience = 450;
    younger.created_at = Utc.timestamp_opt(1_700_000_500, 0).unwrap();

    let mut grinder = pet_named("owner-3", "Grinder");
    grinder.level = 3;
    grinder.experience = 900;
    grinder.created_at = Utc.timestamp_opt(1_699_999_000, 0).unwrap();

    repos.pets.create(&younger).await.expect("create");
    repos.pets.create(&grinder).await.expect("create");
    repos.pets.create(&older).await.expect("create");

    let profile = Profile::new(
        owner("owner-2"),
        Username::new("spooky_steve").expect("username"),
        Utc.timestamp_opt(1_700_001_000, 0).unwrap(),
    );
    repos.profiles.upsert(&profile).await.expect("upsert");

    let ranked = repos.pets.list_ranked(10).await.expect("list");
    let names: Vec<&str> = ranked.iter().map(|r| r.pet.name.as_str()).collect();
    assert_eq!(names, vec!["Older", "Younger", "Grinder"]);

    assert_eq!(ranked[0].username, None);
    assert_eq!(
        ranked[1].username.as_ref().map(|u| u.as_str()),
        Some("spooky_steve")
    );
    assert_eq!(ranked[2].username, None);

    let top_two = repos.pets.list_ranked(2).await.expect("list");
    assert_eq!(top_two.len(), 2);
}

#[tokio::test]
async fn profile_rename_frees_the_old_username() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("game.db").to_string_lossy().to_string();
    let repos = open_repos(&db_path).await;

    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let casper = Username::new("casper").expect("username");
    let boo = Username::new("boo").expect("username");

    repos
        .profiles
        .upsert(&Profile::new(owner("owner-1"), casper.clone(), now))
        .await
        .expect("claim");
    repos
        .profiles
        .upsert(&Profile::new(owner("owner-1"), boo.clone(), now))
        .await
        .expect("rename");

    let freed = repos
        .profiles
        .get_by_username(&casper)
        .await
        .expect("lookup");
    assert!(freed.is_none());

    let current = repos
        .profiles
        .get_by_owner(&owner("owner-1"))
        .await
        .expect("get")
        .expect("profile exists");
    assert_eq!(current.username, boo);
}

#[tokio::test]
async fn username_held_by_another_owner_is_rejected() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("game.db").to_string_lossy().to_string();
    let repos = open_repos(&db_path).await;

    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let name = Username::new("spooky_steve").expect("username");

    repos
        .profiles
        .upsert(&Profile::new(owner("owner-1"), name.clone(), now))
        .await
        .expect("claim");

    let err = repos
        .profiles
        .upsert(&Profile::new(owner("owner-2"), name, now))
        .await
        .expect_err("taken username must fail");
    assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn stored_messages_keep_sender_and_order() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let db_path = temp_dir.path().join("game.db").to_string_lossy().to_string();

    let pool = connect(&db_path).await.expect("connect");
    let repos = SqliteRepositories::new(pool.clone()).await.expect("schema");

    let pet = pet_named("owner-1", "Casper");
    repos.pets.create(&pet).await.expect("create");

    let asked = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let replied = Utc.timestamp_opt(1_700_000_001, 0).unwrap();
    repos
        .messages
        .store(&Message::new(pet.id, MessageSender::User, "Boo?", asked))
        .await
        .expect("store user turn");
    repos
        .messages
        .store(&Message::new(pet.id, MessageSender::Ghost, "Boo!", replied))
        .await
        .expect("store ghost turn");

    let rows = sqlx::query("SELECT sender, body FROM messages WHERE pet_id = ? ORDER BY sent_at")
        .bind(pet.id.to_string())
        .fetch_all(&pool)
        .await
        .expect("fetch");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get::<String, _>("sender"), "user");
    assert_eq!(rows[0].get::<String, _>("body"), "Boo?");
    assert_eq!(rows[1].get::<String, _>("sender"), "ghost");
    assert_eq!(rows[1].get::<String, _>("body"), "Boo!");
}
