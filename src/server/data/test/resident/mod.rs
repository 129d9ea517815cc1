use crate::{
    model::resident::{FamilyRole, Gender, MaritalStatus},
    server::{
        data::resident::ResidentRepository,
        model::{
            page::PageRequest,
            resident::{ResidentParams, ResidentQuery},
            scope::Scope,
        },
    },
};
use chrono::NaiveDate;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod family_membership;
mod get_paginated;

fn params(nik: &str, rt_id: i32) -> ResidentParams {
    ResidentParams {
        nik: nik.to_string(),
        name: "Dewi Lestari".to_string(),
        birth_place: "Bandung".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1992, 8, 17).unwrap(),
        gender: Gender::Female,
        religion: "Islam".to_string(),
        occupation: None,
        marital_status: MaritalStatus::Married,
        address: "Jl. Mawar 3".to_string(),
        rt_id,
        phone: Some("081234567890".to_string()),
    }
}
