//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
    sea_query::{Expr, JoinType},
};
use uuid::Uuid;

use blog_core::domain::{Author, Category, CommentEntry, Location, PostEntry, User};
use blog_core::error::RepoError;
use blog_core::pagination::Window;
use blog_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostFilter, PostRepository,
    UserRepository, Visibility,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

impl LocationRepository for PostgresLocationRepository {}

/// Translate a feed filter into a post query.
fn filtered_posts(filter: &PostFilter) -> Select<PostEntity> {
    let mut select = PostEntity::find();

    if let Some(author_id) = filter.author_id {
        select = select.filter(post::Column::AuthorId.eq(author_id));
    }
    if let Some(category_id) = filter.category_id {
        select = select.filter(post::Column::CategoryId.eq(category_id));
    }
    if let Visibility::PublicAt(now) = filter.visibility {
        // Inner join drops posts without a category.
        select = select
            .join(JoinType::InnerJoin, post::Relation::Category.def())
            .filter(post::Column::IsPublished.eq(true))
            .filter(category::Column::IsPublished.eq(true))
            .filter(post::Column::PubDate.lte(now));
    }

    select
}

/// Attach authors, categories, locations and comment counts to a batch of posts.
async fn load_entries(db: &DbConn, posts: Vec<post::Model>) -> Result<Vec<PostEntry>, DbErr> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    let category_ids: Vec<Uuid> = posts.iter().filter_map(|p| p.category_id).collect();
    let location_ids: Vec<Uuid> = posts.iter().filter_map(|p| p.location_id).collect();

    let authors: HashMap<Uuid, user::Model> = UserEntity::find()
        .filter(user::Column::Id.is_in(author_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    let categories: HashMap<Uuid, Category> = CategoryEntity::find()
        .filter(category::Column::Id.is_in(category_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.into()))
        .collect();

    let locations: HashMap<Uuid, Location> = LocationEntity::find()
        .filter(location::Column::Id.is_in(location_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.into()))
        .collect();

    let comment_counts: HashMap<Uuid, i64> = CommentEntity::find()
        .select_only()
        .column(comment::Column::PostId)
        .column_as(Expr::col(comment::Column::Id).count(), "comment_count")
        .filter(comment::Column::PostId.is_in(post_ids))
        .group_by(comment::Column::PostId)
        .into_tuple::<(Uuid, i64)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let entries = posts
        .into_iter()
        .filter_map(|model| {
            let Some(author) = authors.get(&model.author_id) else {
                tracing::warn!(post_id = %model.id, "Post author missing, skipping");
                return None;
            };

            Some(PostEntry {
                author: Author {
                    id: author.id,
                    username: author.username.clone(),
                },
                category: model.category_id.and_then(|id| categories.get(&id).cloned()),
                location: model.location_id.and_then(|id| locations.get(&id).cloned()),
                comment_count: comment_counts.get(&model.id).copied().unwrap_or(0) as u64,
                post: model.into(),
            })
        })
        .collect();

    Ok(entries)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        filtered_posts(filter)
            .count(&self.db)
            .await
            .map_err(query_error)
    }

    async fn feed(
        &self,
        filter: &PostFilter,
        window: Window,
    ) -> Result<Vec<PostEntry>, RepoError> {
        let posts = filtered_posts(filter)
            .order_by_desc(post::Column::PubDate)
            .order_by_desc(post::Column::CreatedAt)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        load_entries(&self.db, posts).await.map_err(query_error)
    }

    async fn entry(&self, id: Uuid) -> Result<Option<PostEntry>, RepoError> {
        let Some(post) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?
        else {
            return Ok(None);
        };

        let mut entries = load_entries(&self.db, vec![post])
            .await
            .map_err(query_error)?;
        Ok(entries.pop())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<CommentEntry>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(comment, author)| {
                author.map(|author| CommentEntry {
                    author: Author {
                        id: author.id,
                        username: author.username,
                    },
                    comment: comment.into(),
                })
            })
            .collect())
    }
}
