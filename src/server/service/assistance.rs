//! Social assistance programs and recipient proposals.
//!
//! Programs are published by ADMIN (optionally for every RW) or by an RW for its own RW.
//! Staff propose residents they manage; RW or ADMIN approve or reject proposals and staff
//! record the distribution. Residents with accounts are told about every change.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{assistance::RecipientStatus, notification::NotificationKind},
    server::{
        data::{
            assistance::{AssistanceRepository, RecipientRepository},
            resident::ResidentRepository,
        },
        error::AppError,
        model::{
            assistance::{
                Assistance, AssistanceParams, Recipient, RecipientAction, RecipientView,
            },
            notification::NewNotification,
            page::{PageRequest, Paginated},
            resident::Resident,
            rt::trim_opt,
            scope::Scope,
            user::CurrentUser,
        },
        service::{notification::NotificationService, resident::ResidentService, rt::RtService},
        util::validate::Validator,
    },
};

pub struct AssistanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssistanceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        current: &CurrentUser,
        page: PageRequest,
    ) -> Result<Paginated<Assistance>, AppError> {
        Ok(AssistanceRepository::new(self.db)
            .get_paginated(page, &current.scope)
            .await?)
    }

    pub async fn get_by_id(&self, current: &CurrentUser, id: i32) -> Result<Assistance, AppError> {
        self.find_visible(current, id).await
    }

    /// Publishes a program. RW staff always publish for their own RW.
    pub async fn create(
        &self,
        current: &CurrentUser,
        mut params: AssistanceParams,
    ) -> Result<Assistance, AppError> {
        params.validate()?;

        match current.scope {
            Scope::All => {}
            Scope::Rw { rw } => {
                current.ensure(
                    params.rw.is_none_or(|requested| requested == rw),
                    "programs can only be published for the user's own RW",
                )?;
                params.rw = Some(rw);
            }
            _ => current.ensure(false, "publishing programs requires ADMIN or RW")?,
        }

        let program = AssistanceRepository::new(self.db)
            .create(params, current.id())
            .await?;

        tracing::info!(
            "User {} published assistance program {} ({})",
            current.id(),
            program.id,
            program.assistance_type
        );

        Ok(program)
    }

    pub async fn update(
        &self,
        current: &CurrentUser,
        id: i32,
        mut params: AssistanceParams,
    ) -> Result<Assistance, AppError> {
        params.validate()?;

        let program = self.find(id).await?;
        self.ensure_owns(current, &program)?;
        if params.rw.is_none() && !matches!(current.scope, Scope::All) {
            params.rw = program.rw;
        }
        current.ensure(
            matches!(current.scope, Scope::All) || params.rw == program.rw,
            "programs cannot be moved to another RW",
        )?;

        AssistanceRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Assistance program not found".to_string()))
    }

    pub async fn delete(&self, current: &CurrentUser, id: i32) -> Result<(), AppError> {
        let program = self.find(id).await?;
        self.ensure_owns(current, &program)?;

        AssistanceRepository::new(self.db)
            .deactivate(program.id)
            .await?;

        tracing::info!(
            "User {} deactivated assistance program {}",
            current.id(),
            program.id
        );

        Ok(())
    }

    /// Recipients of a visible program whose residents the user may see.
    pub async fn get_recipients(
        &self,
        current: &CurrentUser,
        id: i32,
        page: PageRequest,
    ) -> Result<Paginated<RecipientView>, AppError> {
        let program = self.find_visible(current, id).await?;

        if current.scope == Scope::Unassigned {
            return Ok(Paginated::empty(page));
        }

        let recipients = RecipientRepository::new(self.db)
            .get_paginated(program.id, page, &current.scope)
            .await?;

        let resident_ids: Vec<i32> = recipients.items.iter().map(|r| r.resident_id).collect();
        let residents: HashMap<i32, Resident> = ResidentRepository::new(self.db)
            .find_by_ids(&resident_ids)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        Ok(recipients.map(|recipient| {
            let (resident_name, resident_nik) = residents
                .get(&recipient.resident_id)
                .map(|r| (r.name.clone(), r.nik.clone()))
                .unwrap_or_default();

            RecipientView {
                recipient,
                resident_name,
                resident_nik,
            }
        }))
    }

    /// Proposes a resident the user manages for a program.
    ///
    /// # Returns
    /// - `Ok(RecipientView)` - Recipient with status DIUSULKAN
    /// - `Err(AppError::BadRequest)` - Resident lives outside the program's RW
    /// - `Err(AppError::Conflict)` - Resident already proposed for this program
    pub async fn propose(
        &self,
        current: &CurrentUser,
        id: i32,
        resident_id: i32,
        notes: Option<String>,
    ) -> Result<RecipientView, AppError> {
        let notes = trim_opt(notes);
        Validator::new()
            .max_length_opt("notes", notes.as_deref(), 1000)
            .finish()?;

        let program = self.find_visible(current, id).await?;

        let resident_service = ResidentService::new(self.db);
        let resident = resident_service.find(resident_id).await?;
        resident_service.ensure_manages(current, &resident).await?;

        if let Some(program_rw) = program.rw {
            let territory = RtService::new(self.db).territory(resident.rt_id).await?;
            if territory.rw != program_rw {
                return Err(AppError::BadRequest(format!(
                    "Program is only open to residents of RW {:03}",
                    program_rw
                )));
            }
        }

        let repo = RecipientRepository::new(self.db);

        if repo.exists(program.id, resident.id).await? {
            return Err(AppError::Conflict(
                "Resident is already proposed for this program".to_string(),
            ));
        }

        let recipient = repo
            .create(program.id, resident.id, current.id(), notes)
            .await?;

        tracing::info!(
            "User {} proposed resident {} for assistance program {}",
            current.id(),
            resident.id,
            program.id
        );

        Ok(self.notify(&program, recipient, resident).await)
    }

    /// DIUSULKAN → DISETUJUI; ADMIN or RW only.
    pub async fn approve(
        &self,
        current: &CurrentUser,
        id: i32,
        recipient_id: i32,
    ) -> Result<RecipientView, AppError> {
        current.ensure(
            current.scope.is_rw_or_admin(),
            "approving recipients requires ADMIN or RW",
        )?;

        self.transition(current, id, recipient_id, RecipientAction::Approve)
            .await
    }

    /// DIUSULKAN → DITOLAK; ADMIN or RW only.
    pub async fn reject(
        &self,
        current: &CurrentUser,
        id: i32,
        recipient_id: i32,
    ) -> Result<RecipientView, AppError> {
        current.ensure(
            current.scope.is_rw_or_admin(),
            "rejecting recipients requires ADMIN or RW",
        )?;

        self.transition(current, id, recipient_id, RecipientAction::Reject)
            .await
    }

    /// DISETUJUI → DISALURKAN, stamping the distribution time.
    pub async fn distribute(
        &self,
        current: &CurrentUser,
        id: i32,
        recipient_id: i32,
    ) -> Result<RecipientView, AppError> {
        self.transition(current, id, recipient_id, RecipientAction::Distribute)
            .await
    }

    async fn transition(
        &self,
        current: &CurrentUser,
        id: i32,
        recipient_id: i32,
        action: RecipientAction,
    ) -> Result<RecipientView, AppError> {
        let program = self.find_visible(current, id).await?;

        let recipient = RecipientRepository::new(self.db)
            .find(program.id, recipient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        let resident = ResidentRepository::new(self.db)
            .find_by_ids(&[recipient.resident_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("Resident not found".to_string()))?;
        ResidentService::new(self.db)
            .ensure_manages(current, &resident)
            .await?;

        let next = recipient.status.apply(action)?;
        let distributed_at = (next == RecipientStatus::Distributed).then(Utc::now);

        let updated = RecipientRepository::new(self.db)
            .transition(recipient.id, recipient.status, next, distributed_at)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(
                    "Recipient was changed by someone else, reload and retry".to_string(),
                )
            })?;

        tracing::info!(
            "User {} moved recipient {} of program {} from {} to {}",
            current.id(),
            updated.id,
            program.id,
            recipient.status,
            updated.status
        );

        Ok(self.notify(&program, updated, resident).await)
    }

    /// Tells the resident's linked accounts about the recipient's status.
    async fn notify(
        &self,
        program: &Assistance,
        recipient: Recipient,
        resident: Resident,
    ) -> RecipientView {
        let message = match recipient.status {
            RecipientStatus::Proposed => {
                format!("{} was proposed for {}", resident.name, program.name)
            }
            RecipientStatus::Approved => {
                format!("{} was approved for {}", resident.name, program.name)
            }
            RecipientStatus::Distributed => {
                format!("{} received {}", resident.name, program.name)
            }
            RecipientStatus::Rejected => {
                format!("{} was not approved for {}", resident.name, program.name)
            }
        };

        NotificationService::new(self.db)
            .send_to_residents(
                &[resident.id],
                NewNotification::new(
                    NotificationKind::Assistance,
                    format!("Assistance {}", recipient.status),
                    message,
                    Some(program.id),
                ),
            )
            .await;

        RecipientView {
            recipient,
            resident_name: resident.name,
            resident_nik: resident.nik,
        }
    }

    async fn find(&self, id: i32) -> Result<Assistance, AppError> {
        AssistanceRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assistance program not found".to_string()))
    }

    /// Programs for every RW are visible to all; RW programs to that RW.
    async fn find_visible(&self, current: &CurrentUser, id: i32) -> Result<Assistance, AppError> {
        let program = self.find(id).await?;

        let visible = match (current.scope, program.rw) {
            (Scope::All, _) | (_, None) => true,
            (scope, Some(rw)) => scope.home_rw() == Some(rw),
        };
        current.ensure(visible, "assistance program of another RW")?;

        Ok(program)
    }

    /// ADMIN owns every program, RW staff the programs of their RW.
    fn ensure_owns(&self, current: &CurrentUser, program: &Assistance) -> Result<(), AppError> {
        let owns = match current.scope {
            Scope::All => true,
            Scope::Rw { rw } => program.rw == Some(rw),
            _ => false,
        };

        current.ensure(owns, "assistance program outside the user's RW")
    }
}
