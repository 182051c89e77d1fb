//! UI layer for desktop GUI: app shell, screens, dialogs and theme.

pub mod app;
pub mod dashboard;
pub mod dialogs;
pub mod landing;
pub mod records;
pub mod theme;

pub use app::PatientRecordsApp;
