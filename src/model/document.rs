use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

db_enum! {
    DocumentType {
        Domicile => "SURAT_DOMISILI",
        Introduction => "SURAT_PENGANTAR",
        Business => "SURAT_KETERANGAN_USAHA",
        LowIncome => "SURAT_KETERANGAN_TIDAK_MAMPU",
        Death => "SURAT_KEMATIAN",
        Relocation => "SURAT_PINDAH",
    }
}

db_enum! {
    /// Request workflow: DIAJUKAN, DIPROSES, DISETUJUI, DITANDATANGANI, SELESAI, with
    /// DITOLAK reachable before signing.
    DocumentStatus {
        Submitted => "DIAJUKAN",
        Processing => "DIPROSES",
        Approved => "DISETUJUI",
        Signed => "DITANDATANGANI",
        Completed => "SELESAI",
        Rejected => "DITOLAK",
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct DocumentDto {
    pub id: i32,
    pub resident_id: i32,
    pub resident_name: String,
    pub requested_by: i32,
    pub document_type: DocumentType,
    pub purpose: String,
    pub status: DocumentStatus,
    pub letter_number: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub attachment_url: Option<String>,
    pub processed_by: Option<i32>,
    pub signed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Multipart form accepted by `POST /api/documents`.
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct CreateDocumentForm {
    pub resident_id: i32,
    pub document_type: DocumentType,
    pub purpose: String,
    /// Optional supporting file (jpg, png or pdf).
    #[schema(value_type = Option<String>, format = Binary)]
    pub attachment: Option<Vec<u8>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct ApproveDocumentDto {
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct RejectDocumentDto {
    pub reason: String,
}
