pub use super::complaint::Entity as Complaint;
pub use super::document::Entity as Document;
pub use super::event::Entity as Event;
pub use super::event_participant::Entity as EventParticipant;
pub use super::family::Entity as Family;
pub use super::forum_comment::Entity as ForumComment;
pub use super::forum_like::Entity as ForumLike;
pub use super::forum_post::Entity as ForumPost;
pub use super::notification::Entity as Notification;
pub use super::resident::Entity as Resident;
pub use super::rt::Entity as Rt;
pub use super::social_assistance::Entity as SocialAssistance;
pub use super::social_assistance_recipient::Entity as SocialAssistanceRecipient;
pub use super::user::Entity as User;
