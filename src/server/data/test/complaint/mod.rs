use crate::{
    model::complaint::{ComplaintCategory, ComplaintStatus},
    server::{
        data::complaint::ComplaintRepository,
        model::{
            complaint::{ComplaintQuery, CreateComplaintParams},
            scope::Scope,
        },
    },
};
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod crud;
