use crate::{
    model::document::{DocumentStatus, DocumentType},
    server::{
        data::document::{DocumentRepository, DocumentUpdate, NewDocument},
        model::{document::DocumentQuery, page::PageRequest, scope::Scope},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod update;
