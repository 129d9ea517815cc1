//! Territory a logged-in user may see and manage.
//!
//! ADMIN covers everything, RW every RT sharing its RW number, RT its own RT, and WARGA
//! only the household of the resident linked to the account.

use crate::model::user::Role;

/// Location of one RT, used when checking coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Territory {
    pub rt_id: i32,
    pub rw: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// ADMIN.
    All,
    /// RW chairman.
    Rw { rw: i32 },
    /// RT chairman.
    Rt { rt_id: i32, rw: i32 },
    /// WARGA linked to a resident record.
    Household {
        resident_id: i32,
        family_id: Option<i32>,
        rt_id: i32,
        rw: i32,
    },
    /// Account without a usable territory (staff missing its RT, unlinked WARGA).
    Unassigned,
}

impl Scope {
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::All | Self::Rw { .. } | Self::Rt { .. })
    }

    /// ADMIN or RW.
    pub fn is_rw_or_admin(&self) -> bool {
        matches!(self, Self::All | Self::Rw { .. })
    }

    pub fn home_rw(&self) -> Option<i32> {
        match self {
            Self::Rw { rw } | Self::Rt { rw, .. } | Self::Household { rw, .. } => Some(*rw),
            Self::All | Self::Unassigned => None,
        }
    }

    pub fn home_rt(&self) -> Option<i32> {
        match self {
            Self::Rt { rt_id, .. } | Self::Household { rt_id, .. } => Some(*rt_id),
            _ => None,
        }
    }

    /// Whether the user manages the given RT (staff only).
    pub fn manages(&self, territory: Territory) -> bool {
        match self {
            Self::All => true,
            Self::Rw { rw } => *rw == territory.rw,
            Self::Rt { rt_id, .. } => *rt_id == territory.rt_id,
            Self::Household { .. } | Self::Unassigned => false,
        }
    }

    /// Whether content published for an RW, optionally narrowed to one RT, is visible.
    pub fn sees_area(&self, rw: i32, rt_id: Option<i32>) -> bool {
        match self {
            Self::All => true,
            Self::Rw { rw: own_rw } => *own_rw == rw,
            Self::Rt {
                rt_id: own_rt,
                rw: own_rw,
            }
            | Self::Household {
                rt_id: own_rt,
                rw: own_rw,
                ..
            } => *own_rw == rw && rt_id.is_none_or(|id| id == *own_rt),
            Self::Unassigned => false,
        }
    }

    /// Whether the user may see a resident record.
    ///
    /// Staff see residents of RTs they manage; WARGA see themselves and members of their
    /// own family.
    pub fn covers_resident(
        &self,
        resident_id: i32,
        family_id: Option<i32>,
        territory: Territory,
    ) -> bool {
        match self {
            Self::Household {
                resident_id: own_id,
                family_id: own_family,
                ..
            } => *own_id == resident_id || (own_family.is_some() && *own_family == family_id),
            _ => self.manages(territory),
        }
    }

    /// Derives the scope from a user's role and territory columns.
    ///
    /// `household` is the linked resident's `(resident_id, family_id, rt_id)` and `rt_rw`
    /// the RW of the RT referenced by the user or resident, both looked up by the caller.
    pub fn resolve(
        role: Role,
        user_rt_id: Option<i32>,
        user_rw: Option<i32>,
        rt_rw: Option<i32>,
        household: Option<(i32, Option<i32>, i32)>,
    ) -> Self {
        match role {
            Role::Admin => Self::All,
            Role::Rw => match user_rw {
                Some(rw) => Self::Rw { rw },
                None => Self::Unassigned,
            },
            Role::Rt => match (user_rt_id, rt_rw) {
                (Some(rt_id), Some(rw)) => Self::Rt { rt_id, rw },
                _ => Self::Unassigned,
            },
            Role::Warga => match (household, rt_rw) {
                (Some((resident_id, family_id, rt_id)), Some(rw)) => Self::Household {
                    resident_id,
                    family_id,
                    rt_id,
                    rw,
                },
                _ => Self::Unassigned,
            },
        }
    }
}
