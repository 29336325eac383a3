//! Domain entities - the objects the client passes around.

mod credentials;
mod image;
mod job;
mod session;
mod user;

pub use credentials::{LoginCredentials, Registration};
pub use image::{ACCEPTED_MIME_TYPES, ColorizedImage, ImageKind, ImageUpload, mime_for_path};
pub use job::{
    JobStatus, ProcessingJob, UploadHistoryEntry, UploadStatus, string_or_number,
};
pub use session::{AuthOutcome, TokenPair};
pub use user::{ProfileUpdate, User, UserStats};
