//! Domain values rendered as API payloads.

use blog_core::domain::{
    Author, Category, Comment, CommentEntry, Location, Post, PostEntry, User,
};
use blog_core::pagination::Page;
use blog_core::services::{Access, Feed, FeedContext, PostDetail};
use blog_shared::dto::{
    AuthorResponse, CategoryResponse, CommentForm, CommentResponse, FeedContextResponse,
    FeedResponse, LocationResponse, PageResponse, PostDetailResponse, PostForm, PostResponse,
    ProfileForm, UserResponse,
};

pub fn author(author: Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        username: author.username,
    }
}

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        created_at: user.created_at,
    }
}

fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        slug: category.slug,
        title: category.title,
        description: category.description,
    }
}

fn location(location: Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name,
    }
}

pub fn post(entry: PostEntry) -> PostResponse {
    let PostEntry {
        post,
        author: writer,
        category: filed_under,
        location: place,
        comment_count,
    } = entry;

    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        image: post.image,
        pub_date: post.pub_date,
        is_published: post.is_published,
        created_at: post.created_at,
        author: author(writer),
        category: filed_under.map(category),
        location: place.map(location),
        comment_count,
    }
}

pub fn comment(entry: CommentEntry) -> CommentResponse {
    CommentResponse {
        id: entry.comment.id,
        post_id: entry.comment.post_id,
        text: entry.comment.text,
        created_at: entry.comment.created_at,
        author: author(entry.author),
    }
}

fn page<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageResponse<U> {
    let page = page.map(f);
    PageResponse {
        has_next: page.has_next(),
        has_previous: page.has_previous(),
        next_page_number: page.next_page_number(),
        previous_page_number: page.previous_page_number(),
        number: page.number,
        num_pages: page.num_pages,
        count: page.count,
        items: page.items,
    }
}

pub fn feed(feed: Feed) -> FeedResponse {
    let context = match feed.context {
        FeedContext::Home => FeedContextResponse::Home,
        FeedContext::Category(c) => FeedContextResponse::Category {
            category: category(c),
        },
        FeedContext::Profile(u) => FeedContextResponse::Profile { profile: user(u) },
    };

    FeedResponse {
        context,
        page: page(feed.page, post),
    }
}

pub fn detail(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        is_owner: detail.access == Access::Owner,
        post: post(detail.entry),
        comments: detail.comments.into_iter().map(comment).collect(),
    }
}

pub fn post_form(post: Post) -> PostForm {
    PostForm {
        title: post.title,
        text: post.text,
        image: post.image,
        pub_date: post.pub_date,
        is_published: post.is_published,
        location_id: post.location_id,
        category_id: post.category_id,
    }
}

pub fn comment_form(comment: Comment) -> CommentForm {
    CommentForm { text: comment.text }
}

pub fn profile_form(user: User) -> ProfileForm {
    ProfileForm {
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
    }
}
