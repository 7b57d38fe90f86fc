//! GraphQL schema definition.
//!
//! Resolvers here are thin; the domain edges do the work. Whether a field may
//! be reached at all is decided by the authorization gate before juniper runs.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldResult, RootNode};

use crate::domains::auth::data::{ChangePasswordResponse, LoginResponse};
use crate::domains::auth::edges as auth_edges;
use crate::domains::authors::data::{AuthorCreateInput, AuthorData, AuthorUpdateInput, AuthorsPayload};
use crate::domains::authors::edges as author_edges;
use crate::domains::posts::data::{PostCreateInput, PostData, PostUpdateInput, PostsPayload};
use crate::domains::posts::edges as post_edges;
use crate::domains::users::data::{UserData, UsersPayload};
use crate::domains::users::edges as user_edges;

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // User Queries
    // =========================================================================

    /// The signed-in user
    async fn me(ctx: &GraphQLContext) -> FieldResult<UserData> {
        user_edges::me(ctx).await
    }

    /// All users (super admins only)
    async fn users(
        ctx: &GraphQLContext,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<UsersPayload> {
        user_edges::users(ctx, limit, offset).await
    }

    // =========================================================================
    // Author Queries
    // =========================================================================

    async fn author(ctx: &GraphQLContext, id: String) -> FieldResult<Option<AuthorData>> {
        author_edges::author(ctx, id).await
    }

    async fn authors(
        ctx: &GraphQLContext,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<AuthorsPayload> {
        author_edges::authors(ctx, limit, offset).await
    }

    // =========================================================================
    // Post Queries
    // =========================================================================

    /// One of the signed-in author's posts
    async fn post_by_id(ctx: &GraphQLContext, id: String) -> FieldResult<Option<PostData>> {
        post_edges::post_by_id(ctx, id).await
    }

    async fn all_post_by_author(
        ctx: &GraphQLContext,
        author_id: String,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<PostsPayload> {
        post_edges::all_post_by_author(ctx, author_id, limit, offset).await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Auth Mutations
    // =========================================================================

    async fn login(ctx: &GraphQLContext, username: String, password: String) -> FieldResult<LoginResponse> {
        auth_edges::login(ctx, username, password).await
    }

    async fn author_login(
        ctx: &GraphQLContext,
        email: String,
        password: String,
    ) -> FieldResult<LoginResponse> {
        auth_edges::author_login(ctx, email, password).await
    }

    async fn change_password(
        ctx: &GraphQLContext,
        old_password: String,
        new_password: String,
    ) -> FieldResult<ChangePasswordResponse> {
        auth_edges::change_password(ctx, old_password, new_password).await
    }

    async fn refresh_token(ctx: &GraphQLContext, token: String) -> FieldResult<LoginResponse> {
        auth_edges::refresh_token(ctx, token).await
    }

    // =========================================================================
    // Author Mutations
    // =========================================================================

    /// Sign up as an author
    async fn create_author(ctx: &GraphQLContext, input: AuthorCreateInput) -> FieldResult<AuthorData> {
        author_edges::create_author(ctx, input).await
    }

    async fn update_author(ctx: &GraphQLContext, input: AuthorUpdateInput) -> FieldResult<AuthorData> {
        author_edges::update_author(ctx, input).await
    }

    async fn delete_author(ctx: &GraphQLContext, id: String) -> FieldResult<AuthorData> {
        author_edges::delete_author(ctx, id).await
    }

    // =========================================================================
    // Post Mutations
    // =========================================================================

    async fn create_post(ctx: &GraphQLContext, input: PostCreateInput) -> FieldResult<PostData> {
        post_edges::create_post(ctx, input).await
    }

    async fn update_post(ctx: &GraphQLContext, input: PostUpdateInput) -> FieldResult<PostData> {
        post_edges::update_post(ctx, input).await
    }

    async fn delete_post(ctx: &GraphQLContext, id: String) -> FieldResult<PostData> {
        post_edges::delete_post(ctx, id).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
