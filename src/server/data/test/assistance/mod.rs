use crate::{
    model::assistance::{AssistanceType, RecipientStatus},
    server::{
        data::assistance::{AssistanceRepository, RecipientRepository},
        model::{assistance::AssistanceParams, page::PageRequest, scope::Scope},
    },
};
use chrono::{NaiveDate, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod programs;
mod recipients;
