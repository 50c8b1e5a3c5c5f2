//! Organize multi-file camera recordings into per-session directories.
//!
//! Files are grouped by the recording identifier in their name,
//! each group gets a prefix and a destination directory,
//! and files are renamed to `{prefix}_{chapter}.{EXT}` without overwriting
//! anything unless the user explicitly allows it.

mod config;
mod decision;
mod error;
mod executor;
mod group;
mod organizer;
mod pattern;
mod planner;
mod resolver;
mod workspace;

pub use config::{ClipSortConfig, DEFAULT_EXTENSIONS, OrganizeConfig};
pub use decision::{AutoDecisions, DecisionPort, OverwriteDecision};
pub use error::{Diagnostic, DiagnosticKind, OrganizeError, OrganizeResult};
pub use executor::{Operation, PlacementAction, execute};
pub use group::{ChapterEntry, GroupMap, list_video_files};
pub use organizer::{Organizer, RunReport, RunStatus};
pub use pattern::{DEFAULT_PATTERN, FilePattern};
pub use planner::{PlanStep, PrefixCarry, Session, SessionPlanner, is_valid_prefix};
pub use resolver::{ConflictResolver, Resolution};
pub use workspace::{DirectoryStatus, Workspace};
