use sqlx::PgPool;

/// Connect, migrate, and verify the seeded technology catalogue.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    portfolio_db::health_check(&pool).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM technologies")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(count > 0, "technologies should have seed data");
}

/// Every table (except _sqlx_migrations) must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// The link table must reject duplicate (project, technology) pairs.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_pairs_are_unique(pool: PgPool) {
    let project_id: i64 =
        sqlx::query_scalar("INSERT INTO projects (name) VALUES ('dup') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    let technology_id: i64 = sqlx::query_scalar("SELECT id FROM technologies LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();

    let insert = "INSERT INTO project_technologies (project_id, technology_id) VALUES ($1, $2)";
    sqlx::query(insert)
        .bind(project_id)
        .bind(technology_id)
        .execute(&pool)
        .await
        .unwrap();
    let err = sqlx::query(insert)
        .bind(project_id)
        .bind(technology_id)
        .execute(&pool)
        .await
        .unwrap_err();

    let code = err.as_database_error().and_then(|e| e.code()).unwrap();
    assert_eq!(code, portfolio_db::error::UNIQUE_VIOLATION);
}

/// Blank names are rejected by the database even if validation is bypassed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_project_name_rejected(pool: PgPool) {
    let result = sqlx::query("INSERT INTO projects (name) VALUES ('   ')")
        .execute(&pool)
        .await;
    assert!(result.is_err());
}
