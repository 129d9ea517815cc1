//! User data repository for database operations.
//!
//! Provides `UserRepository` for account creation, lookups used by authentication,
//! role assignment and the recipient lists needed by notifications. Entity models are
//! converted to `User` at this boundary.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::user::Role,
    server::{
        data::territory::rt_ids_in_rw,
        model::{
            page::Paginated,
            user::{NewUser, RoleAssignment, User, UserQuery},
        },
    },
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new active user.
    ///
    /// # Arguments
    /// - `user` - Account data with an already hashed password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation on `username`
    pub async fn create(&self, user: NewUser) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(user.username),
            password_hash: ActiveValue::Set(user.password_hash),
            name: ActiveValue::Set(user.name),
            role: ActiveValue::Set(user.role.to_string()),
            rt_id: ActiveValue::Set(user.rt_id),
            rw: ActiveValue::Set(user.rw),
            resident_id: ActiveValue::Set(user.resident_id),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by id regardless of its active flag.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds a user by username regardless of its active flag.
    ///
    /// Login checks `is_active` itself so inactive accounts get the same generic error.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Display names of the given users, including deactivated ones.
    pub async fn names_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, String)> = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .column(entity::user::Column::Name)
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether an active account is already linked to the resident.
    pub async fn resident_has_account(&self, resident_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::ResidentId.eq(resident_id))
            .filter(entity::user::Column::IsActive.eq(true))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if any active admin exists.
    ///
    /// Used at startup to decide whether a setup code must be generated.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one active ADMIN account exists
    /// - `Ok(false)` - First-time setup scenario
    /// - `Err(DbErr)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(Role::Admin.as_str()))
            .filter(entity::user::Column::IsActive.eq(true))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Gets active users page by page, ordered by name.
    ///
    /// `query.rw` keeps accounts of one RW: users whose `rw` matches or whose RT lies in it.
    pub async fn get_paginated(&self, query: &UserQuery) -> Result<Paginated<User>, DbErr> {
        let mut select = entity::prelude::User::find()
            .filter(entity::user::Column::IsActive.eq(true))
            .order_by_asc(entity::user::Column::Name)
            .order_by_asc(entity::user::Column::Id);

        if let Some(role) = query.role {
            select = select.filter(entity::user::Column::Role.eq(role.as_str()));
        }
        if let Some(rw) = query.rw {
            select = select.filter(
                Condition::any()
                    .add(entity::user::Column::Rw.eq(rw))
                    .add(entity::user::Column::RtId.in_subquery(rt_ids_in_rw(rw))),
            );
        }

        let paginator = select.paginate(self.db, query.page.per_page);
        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(query.page.page)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(users, total, query.page))
    }

    /// Updates name and role assignment.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error
    pub async fn update(
        &self,
        id: i32,
        name: String,
        assignment: RoleAssignment,
    ) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::user::ActiveModel = entity.into();
        active_model.name = ActiveValue::Set(name);
        active_model.role = ActiveValue::Set(assignment.role.to_string());
        active_model.rt_id = ActiveValue::Set(assignment.rt_id);
        active_model.rw = ActiveValue::Set(assignment.rw);
        active_model.resident_id = ActiveValue::Set(assignment.resident_id);
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let entity = active_model.update(self.db).await?;
        User::from_entity(entity).map(Some)
    }

    pub async fn set_password_hash(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Soft deletes a user.
    ///
    /// # Returns
    /// - `Ok(true)` - An active user was deactivated
    /// - `Ok(false)` - No active user with that id
    pub async fn deactivate(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .filter(entity::user::Column::IsActive.eq(true))
            .col_expr(
                entity::user::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Moves the accounts linked to a resident into the resident's new RT.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of accounts updated
    /// - `Err(DbErr)` - Database error
    pub async fn move_resident_accounts(
        &self,
        resident_id: i32,
        rt_id: i32,
        rw: i32,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::User::update_many()
            .filter(entity::user::Column::ResidentId.eq(resident_id))
            .col_expr(entity::user::Column::RtId, sea_orm::sea_query::Expr::value(rt_id))
            .col_expr(entity::user::Column::Rw, sea_orm::sea_query::Expr::value(rw))
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Ids of active accounts linked to any of the residents.
    pub async fn ids_for_residents(&self, resident_ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if resident_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::ResidentId.is_in(resident_ids.to_vec()))
            .filter(entity::user::Column::IsActive.eq(true))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Ids of active staff responsible for an RT: its RT accounts and the RW accounts of its RW.
    pub async fn staff_ids_for_rt(&self, rt_id: i32, rw: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(entity::user::Column::Role.eq(Role::Rt.as_str()))
                            .add(entity::user::Column::RtId.eq(rt_id)),
                    )
                    .add(
                        Condition::all()
                            .add(entity::user::Column::Role.eq(Role::Rw.as_str()))
                            .add(entity::user::Column::Rw.eq(rw)),
                    ),
            )
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Ids of active accounts living or working in an area.
    ///
    /// With `rt_id` only accounts of that RT are returned, otherwise every account of
    /// the RW. Passing neither returns every active account.
    pub async fn active_ids_in_area(
        &self,
        rw: Option<i32>,
        rt_id: Option<i32>,
    ) -> Result<Vec<i32>, DbErr> {
        let mut select = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::IsActive.eq(true));

        if let Some(rt_id) = rt_id {
            select = select.filter(entity::user::Column::RtId.eq(rt_id));
        } else if let Some(rw) = rw {
            select = select.filter(
                Condition::any()
                    .add(entity::user::Column::Rw.eq(rw))
                    .add(entity::user::Column::RtId.in_subquery(rt_ids_in_rw(rw))),
            );
        }

        select.into_tuple().all(self.db).await
    }
}
