use crate::{
    model::user::Role,
    server::{
        data::user::UserRepository,
        model::{
            page::PageRequest,
            user::{NewUser, RoleAssignment, UserQuery},
        },
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod create;
mod deactivate;
mod get_paginated;
mod recipients;
