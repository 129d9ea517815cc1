use crate::server::{
    data::event::EventRepository,
    model::{
        event::{EventDetails, EventQuery},
        page::PageRequest,
        scope::Scope,
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_paginated;
mod participation;
mod reminders;
