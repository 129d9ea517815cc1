//! Document requests (surat pengantar) and their approval workflow.

use chrono::{DateTime, Datelike, Utc};
use sea_orm::DbErr;

use crate::{
    model::document::{DocumentDto, DocumentStatus, DocumentType},
    server::{
        error::AppError,
        model::page::PageRequest,
        service::upload::public_url,
        util::{
            multipart::MultipartForm,
            parse::{parse_form_field, parse_stored},
            validate::Validator,
        },
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: i32,
    pub resident_id: i32,
    pub requested_by: i32,
    pub document_type: DocumentType,
    pub purpose: String,
    pub status: DocumentStatus,
    pub letter_number: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub attachment_path: Option<String>,
    pub processed_by: Option<i32>,
    pub signed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Converts into the API representation; `resident_name` is looked up by the caller.
    pub fn into_dto(self, resident_name: String) -> DocumentDto {
        DocumentDto {
            id: self.id,
            resident_id: self.resident_id,
            resident_name,
            requested_by: self.requested_by,
            document_type: self.document_type,
            purpose: self.purpose,
            status: self.status,
            letter_number: self.letter_number,
            notes: self.notes,
            rejection_reason: self.rejection_reason,
            attachment_url: self.attachment_path.as_deref().map(public_url),
            processed_by: self.processed_by,
            signed_by: self.signed_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        }
    }

    pub fn from_entity(entity: entity::document::Model) -> Result<Self, DbErr> {
        Ok(Self {
            document_type: parse_stored("document.document_type", &entity.document_type)?,
            status: parse_stored("document.status", &entity.status)?,
            id: entity.id,
            resident_id: entity.resident_id,
            requested_by: entity.requested_by,
            purpose: entity.purpose,
            letter_number: entity.letter_number,
            notes: entity.notes,
            rejection_reason: entity.rejection_reason,
            attachment_path: entity.attachment_path,
            processed_by: entity.processed_by,
            signed_by: entity.signed_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            completed_at: entity.completed_at,
        })
    }
}

/// Document together with the name of the resident it is for.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentView {
    pub document: Document,
    pub resident_name: String,
}

impl DocumentView {
    pub fn into_dto(self) -> DocumentDto {
        self.document.into_dto(self.resident_name)
    }
}

/// Step a staff member takes on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentAction {
    Process,
    Approve,
    Sign,
    Complete,
    Reject,
}

impl DocumentAction {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Approve => "approve",
            Self::Sign => "sign",
            Self::Complete => "complete",
            Self::Reject => "reject",
        }
    }
}

impl DocumentStatus {
    /// Status reached by applying `action`, or a 400 when the step is not allowed.
    ///
    /// DIAJUKAN → DIPROSES → DISETUJUI → DITANDATANGANI → SELESAI; DITOLAK from any
    /// state before signing.
    pub fn apply(self, action: DocumentAction) -> Result<Self, AppError> {
        use DocumentAction as A;
        use DocumentStatus as S;

        match (self, action) {
            (S::Submitted, A::Process) => Ok(S::Processing),
            (S::Processing, A::Approve) => Ok(S::Approved),
            (S::Approved, A::Sign) => Ok(S::Signed),
            (S::Signed, A::Complete) => Ok(S::Completed),
            (S::Submitted | S::Processing | S::Approved, A::Reject) => Ok(S::Rejected),
            (status, action) => Err(AppError::BadRequest(format!(
                "Cannot {} a document with status {}",
                action.verb(),
                status
            ))),
        }
    }

    /// Requests still waiting on staff (not yet finished or rejected).
    pub fn is_pending(&self) -> bool {
        !matches!(self, Self::Completed | Self::Rejected)
    }
}

impl DocumentType {
    /// Abbreviation used in letter numbers.
    pub fn letter_code(&self) -> &'static str {
        match self {
            Self::Domicile => "SKD",
            Self::Introduction => "SP",
            Self::Business => "SKU",
            Self::LowIncome => "SKTM",
            Self::Death => "SKM",
            Self::Relocation => "SPD",
        }
    }
}

const ROMAN_MONTHS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

pub fn roman_month(month: u32) -> &'static str {
    ROMAN_MONTHS[(month.clamp(1, 12) - 1) as usize]
}

/// Formats `NNN/CODE/RTxxx/RWxxx/<roman month>/<year>`.
pub fn format_letter_number(
    sequence: u64,
    document_type: DocumentType,
    rt_number: i32,
    rw: i32,
    signed_at: DateTime<Utc>,
) -> String {
    format!(
        "{:03}/{}/RT{:03}/RW{:03}/{}/{}",
        sequence,
        document_type.letter_code(),
        rt_number,
        rw,
        roman_month(signed_at.month()),
        signed_at.year()
    )
}

/// SQL LIKE pattern matching every letter number of one type, RW and year.
pub fn letter_number_pattern(document_type: DocumentType, rw: i32, year: i32) -> String {
    format!(
        "%/{}/RT%/RW{:03}/%/{}",
        document_type.letter_code(),
        rw,
        year
    )
}

#[derive(Debug, Clone)]
pub struct CreateDocumentParams {
    pub resident_id: i32,
    pub document_type: DocumentType,
    pub purpose: String,
}

impl CreateDocumentParams {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        Ok(Self {
            resident_id: parse_form_field("resident_id", form.require("resident_id")?)?,
            document_type: parse_form_field("document_type", form.require("document_type")?)?,
            purpose: form.text("purpose").unwrap_or_default().trim().to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .required("purpose", &self.purpose)
            .length("purpose", &self.purpose, 5, 500)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    pub page: PageRequest,
    pub status: Option<DocumentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn follows_happy_path() {
        let mut status = DocumentStatus::Submitted;
        for action in [
            DocumentAction::Process,
            DocumentAction::Approve,
            DocumentAction::Sign,
            DocumentAction::Complete,
        ] {
            status = status.apply(action).unwrap();
        }

        assert_eq!(status, DocumentStatus::Completed);
    }

    #[test]
    fn rejects_only_before_signing() {
        for status in [
            DocumentStatus::Submitted,
            DocumentStatus::Processing,
            DocumentStatus::Approved,
        ] {
            assert_eq!(
                status.apply(DocumentAction::Reject).unwrap(),
                DocumentStatus::Rejected
            );
        }

        for status in [
            DocumentStatus::Signed,
            DocumentStatus::Completed,
            DocumentStatus::Rejected,
        ] {
            assert!(matches!(
                status.apply(DocumentAction::Reject),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn refuses_skipping_steps() {
        assert!(DocumentStatus::Submitted
            .apply(DocumentAction::Approve)
            .is_err());
        assert!(DocumentStatus::Processing.apply(DocumentAction::Sign).is_err());
        assert!(DocumentStatus::Approved
            .apply(DocumentAction::Complete)
            .is_err());
        assert!(DocumentStatus::Completed
            .apply(DocumentAction::Process)
            .is_err());
    }

    #[test]
    fn formats_letter_number() {
        let signed_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();

        assert_eq!(
            format_letter_number(7, DocumentType::Domicile, 3, 5, signed_at),
            "007/SKD/RT003/RW005/III/2026"
        );
        assert_eq!(
            format_letter_number(120, DocumentType::LowIncome, 12, 1, signed_at),
            "120/SKTM/RT012/RW001/III/2026"
        );
    }

    #[test]
    fn converts_months_to_roman() {
        assert_eq!(roman_month(1), "I");
        assert_eq!(roman_month(9), "IX");
        assert_eq!(roman_month(12), "XII");
    }

    #[test]
    fn pattern_matches_type_rw_and_year() {
        assert_eq!(
            letter_number_pattern(DocumentType::Introduction, 2, 2026),
            "%/SP/RT%/RW002/%/2026"
        );
    }
}
