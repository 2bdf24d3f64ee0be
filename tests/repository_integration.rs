//! Integration tests for repository layer
//!
//! These tests verify that the SQLite repository implementations correctly
//! interact with a migrated in-memory database, including CRUD operations,
//! constraint mapping, and transaction handling.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use fullstack_api::domain::drink::{DrinkDraft, DrinkPatch, Ingredient, RecipeInput};
use fullstack_api::domain::listing::{ArtistDraft, NewShow, VenueDraft};
use fullstack_api::domain::repositories::{
    ArtistRepository, CategoryRepository, DbError, DrinkRepository, QuestionRepository,
    ShowRepository, VenueRepository,
};
use fullstack_api::domain::trivia::{NewQuestion, QuizScope};
use fullstack_api::infrastructure::db::{self, DbPool};
use fullstack_api::infrastructure::repositories::{
    SqliteArtistRepository, SqliteCategoryRepository, SqliteDrinkRepository,
    SqliteQuestionRepository, SqliteShowRepository, SqliteVenueRepository,
};

/// Set up a fresh migrated database
async fn setup_test_db() -> DbPool {
    db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database")
}

fn question(text: &str, category_id: i64) -> NewQuestion {
    NewQuestion {
        question: text.to_string(),
        answer: "answer".to_string(),
        difficulty: 2,
        category_id,
    }
}

fn venue(name: &str, city: &str, state: &str) -> VenueDraft {
    VenueDraft {
        name: name.to_string(),
        genres: "Jazz,Folk".to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        ..Default::default()
    }
}

fn artist(name: &str) -> ArtistDraft {
    ArtistDraft {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        genres: "Rock n Roll".to_string(),
        ..Default::default()
    }
}

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, 0, 0))
        .expect("valid date")
}

fn ingredient(name: &str, color: &str, parts: i64) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        color: color.to_string(),
        parts,
    }
}

#[tokio::test]
async fn test_categories_are_seeded_in_id_order() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");

    let categories = SqliteCategoryRepository::new(&mut conn)
        .list()
        .await
        .expect("list categories");

    let names: Vec<&str> = categories.iter().map(|c| c.kind.as_str()).collect();
    assert_eq!(
        names,
        vec!["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
    );
}

#[tokio::test]
async fn test_question_repository_insert_find_and_delete() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteQuestionRepository::new(&mut conn);

    let created = repo
        .insert(&question("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", 4))
        .await
        .expect("insert question");
    assert_eq!(repo.count().await.expect("count"), 1);

    let found = repo.find_by_id(created.id).await.expect("find").expect("exists");
    assert_eq!(found, created);

    repo.delete(created.id).await.expect("delete");
    assert_eq!(repo.find_by_id(created.id).await.expect("find"), None);

    let missing = repo.delete(created.id).await;
    assert!(matches!(missing, Err(DbError::NotFound { resource: "question", .. })));
}

#[tokio::test]
async fn test_question_with_unknown_category_is_a_constraint_violation() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");

    let result = SqliteQuestionRepository::new(&mut conn)
        .insert(&question("Orphan?", 99))
        .await;

    assert!(matches!(result, Err(DbError::Constraint(_))));
}

#[tokio::test]
async fn test_question_search_is_case_insensitive() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteQuestionRepository::new(&mut conn);

    repo.insert(&question("What is the largest lake in Africa?", 3)).await.expect("insert");
    repo.insert(&question("Which planet is closest to the sun?", 1)).await.expect("insert");
    repo.insert(&question("WHAT boxer's original name is Cassius Clay?", 4)).await.expect("insert");

    let hits = repo.search("what").await.expect("search");
    assert_eq!(hits.len(), 2);

    let none = repo.search("penicillin").await.expect("search");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");

    let mut questions = SqliteQuestionRepository::new(&mut conn);
    questions
        .insert(&question("Which ÉCOLE did Monet attend?", 2))
        .await
        .expect("insert");
    let hits = questions.search("école").await.expect("search");
    assert_eq!(hits.len(), 1);

    let mut venues = SqliteVenueRepository::new(&mut conn);
    venues
        .insert(&venue("Café Über", "San Francisco", "CA"))
        .await
        .expect("insert");
    let now = Local::now().naive_local();
    let by_name = venues.search_by_name("CAFÉ ÜBER", now).await.expect("search");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Café Über");
}

#[tokio::test]
async fn test_questions_by_category() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteQuestionRepository::new(&mut conn);

    repo.insert(&question("Q1", 1)).await.expect("insert");
    repo.insert(&question("Q2", 2)).await.expect("insert");
    repo.insert(&question("Q3", 1)).await.expect("insert");

    let science = repo.list_by_category(1).await.expect("list");
    assert_eq!(science.len(), 2);
    assert!(science.iter().all(|q| q.category_id == 1));
    assert!(science[0].id < science[1].id);
}

#[tokio::test]
async fn test_random_question_excludes_previous_and_respects_scope() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteQuestionRepository::new(&mut conn);

    let a = repo.insert(&question("A", 1)).await.expect("insert");
    let b = repo.insert(&question("B", 1)).await.expect("insert");
    let c = repo.insert(&question("C", 2)).await.expect("insert");

    for _ in 0..10 {
        let picked = repo
            .random_excluding(QuizScope::Category(1), &[a.id])
            .await
            .expect("pick")
            .expect("one left");
        assert_eq!(picked.id, b.id);
    }

    let exhausted = repo
        .random_excluding(QuizScope::Category(1), &[a.id, b.id])
        .await
        .expect("pick");
    assert_eq!(exhausted, None);

    let any = repo
        .random_excluding(QuizScope::All, &[a.id, b.id])
        .await
        .expect("pick")
        .expect("one left");
    assert_eq!(any.id, c.id);

    let unfiltered = repo.random_excluding(QuizScope::All, &[]).await.expect("pick");
    assert!(unfiltered.is_some());
}

#[tokio::test]
async fn test_drink_repository_round_trips_recipe_json() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteDrinkRepository::new(&mut conn);

    let draft = DrinkDraft {
        title: "Latte".to_string(),
        recipe: vec![ingredient("espresso", "brown", 1), ingredient("milk", "white", 3)],
    };
    let drink = repo.insert(&draft).await.expect("insert drink");

    let found = repo.find_by_id(drink.id).await.expect("find").expect("exists");
    assert_eq!(found.recipe, draft.recipe);
    assert_eq!(repo.list().await.expect("list").len(), 1);
}

#[tokio::test]
async fn test_drink_update_and_duplicate_title() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteDrinkRepository::new(&mut conn);

    let water = DrinkDraft {
        title: "Water".to_string(),
        recipe: vec![ingredient("water", "blue", 1)],
    };
    let mut drink = repo.insert(&water).await.expect("insert");

    drink
        .apply(DrinkPatch {
            title: None,
            recipe: Some(RecipeInput::One(ingredient("sparkling water", "clear", 1))),
        })
        .expect("apply patch");
    repo.update(&drink).await.expect("update");

    let found = repo.find_by_id(drink.id).await.expect("find").expect("exists");
    assert_eq!(found.title, "Water");
    assert_eq!(found.recipe[0].name, "sparkling water");

    let duplicate = repo.insert(&water).await;
    assert!(matches!(duplicate, Err(DbError::Constraint(_))));
}

#[tokio::test]
async fn test_drink_delete_missing_is_not_found() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");

    let result = SqliteDrinkRepository::new(&mut conn).delete(42).await;
    assert!(matches!(result, Err(DbError::NotFound { resource: "drink", id: 42 })));
}

#[tokio::test]
async fn test_venue_repository_insert_update_and_duplicate_name() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteVenueRepository::new(&mut conn);

    let id = repo
        .insert(&venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .expect("insert venue");
    assert_eq!(repo.count().await.expect("count"), 1);

    let mut edited = venue("The Musical Hop", "Oakland", "CA");
    edited.phone = Some("123-123-1234".to_string());
    edited.seeking_talent = true;
    repo.update(id, &edited).await.expect("update venue");

    let found = repo.find_by_id(id).await.expect("find").expect("exists");
    assert_eq!(found.city, "Oakland");
    assert_eq!(found.phone.as_deref(), Some("123-123-1234"));
    assert_eq!(found.seeking_talent, Some(true));
    assert!(found.created_at.is_some());

    let duplicate = repo.insert(&venue("The Musical Hop", "NYC", "NY")).await;
    assert!(matches!(duplicate, Err(DbError::Constraint(_))));

    let missing = repo.update(999, &edited).await;
    assert!(matches!(missing, Err(DbError::NotFound { .. })));
}

#[tokio::test]
async fn test_venue_summaries_count_only_upcoming_shows() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");

    let hop = SqliteVenueRepository::new(&mut conn)
        .insert(&venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .expect("insert venue");
    let park = SqliteVenueRepository::new(&mut conn)
        .insert(&venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
        .await
        .expect("insert venue");
    let guns = SqliteArtistRepository::new(&mut conn)
        .insert(&artist("Guns N Petals"))
        .await
        .expect("insert artist");

    let now = Local::now().naive_local();
    let mut shows = SqliteShowRepository::new(&mut conn);
    for start_time in [now - Duration::days(30), now + Duration::days(3), now + Duration::days(10)] {
        shows
            .insert(&NewShow {
                venue_id: hop,
                artist_id: guns,
                start_time,
            })
            .await
            .expect("insert show");
    }

    let summaries = SqliteVenueRepository::new(&mut conn)
        .list_summaries(now)
        .await
        .expect("summaries");
    let hop_summary = summaries.iter().find(|s| s.id == hop).expect("hop listed");
    let park_summary = summaries.iter().find(|s| s.id == park).expect("park listed");
    assert_eq!(hop_summary.num_upcoming_shows, 2);
    assert_eq!(park_summary.num_upcoming_shows, 0);

    let artists = SqliteArtistRepository::new(&mut conn)
        .list_summaries(now)
        .await
        .expect("artist summaries");
    assert_eq!(artists[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn test_venue_search_by_name_and_location() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteVenueRepository::new(&mut conn);

    repo.insert(&venue("The Musical Hop", "San Francisco", "CA")).await.expect("insert");
    repo.insert(&venue("The Dueling Pianos Bar", "New York", "NY")).await.expect("insert");
    repo.insert(&venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
        .await
        .expect("insert");

    let now = Local::now().naive_local();
    let by_name = repo.search_by_name("hop", now).await.expect("search");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "The Musical Hop");

    let music = repo.search_by_name("Music", now).await.expect("search");
    assert_eq!(music.len(), 2);

    let sf = repo
        .search_by_location("San Francisco", "CA", now)
        .await
        .expect("search");
    assert_eq!(sf.len(), 2);

    let wrong_state = repo
        .search_by_location("San Francisco", "NY", now)
        .await
        .expect("search");
    assert!(wrong_state.is_empty());
}

#[tokio::test]
async fn test_recent_listings_newest_first() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");
    let mut repo = SqliteArtistRepository::new(&mut conn);

    for i in 0..12 {
        repo.insert(&artist(&format!("Artist {}", i))).await.expect("insert");
    }

    let recent = repo.list_recent(10).await.expect("recent");
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].name, "Artist 11");
}

#[tokio::test]
async fn test_deleting_booked_venue_fails() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");

    let venue_id = SqliteVenueRepository::new(&mut conn)
        .insert(&venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .expect("insert venue");
    let artist_id = SqliteArtistRepository::new(&mut conn)
        .insert(&artist("Guns N Petals"))
        .await
        .expect("insert artist");
    SqliteShowRepository::new(&mut conn)
        .insert(&NewShow {
            venue_id,
            artist_id,
            start_time: at(2019, 5, 21, 21),
        })
        .await
        .expect("insert show");

    let result = SqliteVenueRepository::new(&mut conn).delete(venue_id).await;
    assert!(matches!(result, Err(DbError::Constraint(_))));
}

#[tokio::test]
async fn test_duplicate_shows_are_allowed_and_joined() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");

    let venue_id = SqliteVenueRepository::new(&mut conn)
        .insert(&venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .expect("insert venue");
    let artist_id = SqliteArtistRepository::new(&mut conn)
        .insert(&artist("Guns N Petals"))
        .await
        .expect("insert artist");

    let show = NewShow {
        venue_id,
        artist_id,
        start_time: at(2035, 4, 1, 20),
    };
    let mut repo = SqliteShowRepository::new(&mut conn);
    repo.insert(&show).await.expect("insert show");
    repo.insert(&show).await.expect("insert duplicate show");

    let listed = repo.list().await.expect("list shows");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].venue_name, "The Musical Hop");
    assert_eq!(listed[0].artist_name, "Guns N Petals");
    assert_eq!(listed[0].start_time, show.start_time);

    assert_eq!(repo.for_venue(venue_id).await.expect("for venue").len(), 2);
    assert_eq!(repo.for_artist(artist_id).await.expect("for artist").len(), 2);
    assert!(repo.for_artist(artist_id + 1).await.expect("for artist").is_empty());
}

#[tokio::test]
async fn test_show_with_unknown_artist_is_rejected() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.expect("acquire");

    let venue_id = SqliteVenueRepository::new(&mut conn)
        .insert(&venue("The Musical Hop", "San Francisco", "CA"))
        .await
        .expect("insert venue");

    let result = SqliteShowRepository::new(&mut conn)
        .insert(&NewShow {
            venue_id,
            artist_id: 404,
            start_time: at(2035, 4, 1, 20),
        })
        .await;
    assert!(matches!(result, Err(DbError::Constraint(_))));
}

#[tokio::test]
async fn test_transaction_rollback_discards_insert() {
    let pool = setup_test_db().await;

    let mut tx = pool.begin().await.expect("begin");
    let result = async {
        let mut repo = SqliteQuestionRepository::new(&mut tx);
        repo.insert(&question("Rolled back?", 1)).await?;
        repo.insert(&question("Bad category", 99)).await
    }
    .await;
    let outcome = db::finish(tx, result).await;
    assert!(matches!(outcome, Err(DbError::Constraint(_))));

    let mut conn = pool.acquire().await.expect("acquire");
    let count = SqliteQuestionRepository::new(&mut conn).count().await.expect("count");
    assert_eq!(count, 0);
}
