use crate::server::{
    data::rt::RtRepository,
    model::rt::{CreateRtParams, UpdateRtParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod crud;
mod summary;
