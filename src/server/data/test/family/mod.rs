use crate::server::{
    data::family::FamilyRepository,
    model::{
        family::{CreateFamilyParams, UpdateFamilyParams},
        page::PageRequest,
        scope::Scope,
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod crud;
