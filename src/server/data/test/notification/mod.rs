use crate::{
    model::notification::NotificationKind,
    server::{
        data::notification::NotificationRepository,
        model::{notification::NewNotification, page::PageRequest},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod crud;
