//! Playlist collaboration, membership and audit components
//!
//! All components take their stores as constructor-injected
//! `Arc<dyn …>` handles and are cheap to clone into request handlers.
//!
//! The boundary is expected to call [`AccessGuard::verify_access`] before any
//! [`MembershipManager`] mutation or [`ActivityRecorder::get_activities`]
//! listing. [`CollaborationManager`] and [`PlaylistExporter`] run their owner
//! checks themselves.

mod access;
mod activity;
mod collaboration;
mod export;
mod membership;

pub use access::AccessGuard;
pub use activity::ActivityRecorder;
pub use collaboration::CollaborationManager;
pub use export::PlaylistExporter;
pub use membership::MembershipManager;
