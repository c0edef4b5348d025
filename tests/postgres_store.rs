//! Ranking engine against a real Postgres
//!
//! Needs a Docker daemon: `cargo test -- --ignored`

use std::{sync::Arc, time::Duration};

use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

use quizrank::{
    config::DatabaseConfig,
    db::{self, RankingRepository},
    handlers::ranking::RankingQuery,
    services::RankingService,
};

async fn start_postgres() -> (ContainerAsync<Postgres>, RankingService) {
    let container = Postgres::default()
        .with_user("quizrank")
        .with_password("quizrank_test")
        .with_db_name("quizrank_test")
        .with_tag("16-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://quizrank:quizrank_test@{host}:{port}/quizrank_test");

    let config = DatabaseConfig {
        url: Some(url.clone()),
        max_connections: 8,
        acquire_timeout: Duration::from_secs(10),
    };
    let pool = db::create_pool(&url, &config)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let service = RankingService::new(Arc::new(RankingRepository::new(pool)));
    (container, service)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_inserts_shift_the_tail() {
    let (_container, service) = start_postgres().await;

    assert_eq!(service.insert("A", "1A", 50.0).await.unwrap().position, 1);
    assert_eq!(service.insert("B", "2b", 70.0).await.unwrap().position, 1);
    assert_eq!(service.insert("C", "3C", 50.0).await.unwrap().position, 3);
    assert_eq!(service.insert("D", "1B", 70.0).await.unwrap().position, 2);

    let entries = service.get_range(&RankingQuery::default()).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["B", "D", "A", "C"]);
    assert_eq!(entries[0].grade_and_class, "2B");

    let by_position = service.get_by_position(3).await.unwrap();
    assert_eq!(by_position.name, "A");
    let by_id = service.get_by_id(&by_position.id.to_string()).await.unwrap();
    assert_eq!(by_id.position, 3);

    let query = RankingQuery {
        name: Some("b".to_string()),
        ..Default::default()
    };
    let filtered = service.get_range(&query).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "B");

    let query = RankingQuery {
        position_start: Some("4".to_string()),
        ..Default::default()
    };
    let tail = service.get_range(&query).await.unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].name, "C");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_inserts_keep_positions_unique() {
    let (_container, service) = start_postgres().await;

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let service = service.clone();
        tasks.spawn(async move { service.insert(&format!("P{i}"), "2A", (i % 4) as f64).await });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    let entries = service.get_range(&RankingQuery::default()).await.unwrap();
    assert_eq!(entries.len(), 16);
    for (index, entry) in entries.iter().enumerate() {
        assert_eq!(entry.position, index as i64 + 1);
    }
    assert!(entries.windows(2).all(|pair| pair[0].score >= pair[1].score));
}
