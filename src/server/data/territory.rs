//! Query conditions restricting rows to what a `Scope` may see.
//!
//! `Scope::Unassigned` maps to an empty `Condition::any()`, which matches nothing.

use sea_orm::{
    sea_query::SelectStatement, ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect,
    QueryTrait,
};

use crate::server::model::scope::Scope;

/// Sub-select of the ids of every RT in an RW.
pub fn rt_ids_in_rw(rw: i32) -> SelectStatement {
    entity::prelude::Rt::find()
        .select_only()
        .column(entity::rt::Column::Id)
        .filter(entity::rt::Column::Rw.eq(rw))
        .into_query()
}

/// Rows whose RT column lies in the territory the scope manages or lives in.
pub fn by_rt<C: ColumnTrait>(scope: &Scope, rt_column: C) -> Condition {
    match scope {
        Scope::All => Condition::all(),
        Scope::Rw { rw } => Condition::all().add(rt_column.in_subquery(rt_ids_in_rw(*rw))),
        Scope::Rt { rt_id, .. } | Scope::Household { rt_id, .. } => {
            Condition::all().add(rt_column.eq(*rt_id))
        }
        Scope::Unassigned => Condition::any(),
    }
}

/// Residents visible to the scope: staff by RT, WARGA self and family.
pub fn residents(scope: &Scope) -> Condition {
    use entity::resident::Column;

    match scope {
        Scope::Household {
            resident_id,
            family_id,
            ..
        } => {
            let mut condition = Condition::any().add(Column::Id.eq(*resident_id));
            if let Some(family_id) = family_id {
                condition = condition.add(Column::FamilyId.eq(*family_id));
            }
            condition
        }
        _ => by_rt(scope, Column::RtId),
    }
}

/// Sub-select of the ids of residents visible to the scope.
pub fn resident_ids(scope: &Scope) -> SelectStatement {
    entity::prelude::Resident::find()
        .select_only()
        .column(entity::resident::Column::Id)
        .filter(residents(scope))
        .into_query()
}

/// Content published for an RW and optionally narrowed to one RT (events, forum posts).
pub fn area<R: ColumnTrait, T: ColumnTrait>(scope: &Scope, rw_column: R, rt_column: T) -> Condition {
    match scope {
        Scope::All => Condition::all(),
        Scope::Rw { rw } => Condition::all().add(rw_column.eq(*rw)),
        Scope::Rt { rt_id, rw } | Scope::Household { rt_id, rw, .. } => Condition::all()
            .add(rw_column.eq(*rw))
            .add(
                Condition::any()
                    .add(rt_column.is_null())
                    .add(rt_column.eq(*rt_id)),
            ),
        Scope::Unassigned => Condition::any(),
    }
}
