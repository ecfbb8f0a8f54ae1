#[cfg(test)]
mod tests {
    use crate::database::entity::{category, comment, post, user};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
        PostgresUserRepository,
    };
    use blog_core::domain::{Category, Post};
    use blog_core::ports::{BaseRepository, CategoryRepository, CommentRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn user_model(username: &str) -> user::Model {
        user::Model {
            id: uuid::Uuid::new_v4(),
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: "hash".to_owned(),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let category_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                title: "Test Post".to_owned(),
                text: "Content".to_owned(),
                image: None,
                pub_date: now.into(),
                is_published: true,
                created_at: now.into(),
                author_id,
                location_id: None,
                category_id: Some(category_id),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.expect("post should be found");
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.category_id, Some(category_id));
        assert_eq!(post.location_id, None);
    }

    #[tokio::test]
    async fn test_find_category_by_slug() {
        let now = chrono::Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category::Model {
                id: uuid::Uuid::new_v4(),
                slug: "travel".to_owned(),
                title: "Travel".to_owned(),
                description: "Trips".to_owned(),
                is_published: false,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);
        let category = repo.find_by_slug("travel").await.unwrap().unwrap();

        assert_eq!(category.slug, "travel");
        assert!(!category.is_published);
    }

    #[tokio::test]
    async fn test_find_user_by_username_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        assert!(repo.find_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_comments_carry_author() {
        let author = user_model("anna");
        let post_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();
        let comment = comment::Model {
            id: uuid::Uuid::new_v4(),
            text: "Nice".to_owned(),
            author_id: author.id,
            post_id,
            created_at: now.into(),
            is_published: true,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![(comment.clone(), author.clone())]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);
        let comments = repo.find_by_post(post_id).await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author.username, "anna");
        assert_eq!(comments[0].comment.id, comment.id);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(blog_core::error::RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_save_category_with_invalid_slug_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repo = PostgresCategoryRepository::new(db);
        let bad = Category::new("with space/../x".into(), "Bad".into(), String::new());
        let result = BaseRepository::<Category, uuid::Uuid>::save(&repo, bad).await;

        assert!(matches!(result, Err(blog_core::error::RepoError::Invalid(_))));
    }
}
