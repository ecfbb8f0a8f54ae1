//! Submitted payloads turned into domain drafts.

use blog_core::domain::{CommentDraft, PostDraft, ProfileDraft, RegistrationDraft};
use blog_shared::dto::{CommentForm, PostForm, ProfileForm, RegisterRequest};

pub fn post(form: PostForm) -> PostDraft {
    PostDraft {
        title: form.title,
        text: form.text,
        image: form.image.filter(|s| !s.trim().is_empty()),
        pub_date: form.pub_date,
        is_published: form.is_published,
        location_id: form.location_id,
        category_id: form.category_id,
    }
}

pub fn comment(form: CommentForm) -> CommentDraft {
    CommentDraft { text: form.text }
}

pub fn profile(form: ProfileForm) -> ProfileDraft {
    ProfileDraft {
        username: form.username,
        email: form.email,
        first_name: form.first_name,
        last_name: form.last_name,
    }
}

pub fn registration(form: RegisterRequest) -> RegistrationDraft {
    RegistrationDraft {
        username: form.username,
        email: form.email,
        password: form.password,
    }
}
