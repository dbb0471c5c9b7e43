//! # report_core - Construction Project Report Engine
//!
//! `report_core` turns one construction project and its ordered material
//! list into a paginated report: statistics are aggregated once, sections
//! are laid out onto pages with deterministic page breaks, and the finished
//! page model is encoded to PDF.
//!
//! ## Design Philosophy
//!
//! - **Deterministic layout**: the same input gives the same text on the same pages
//! - **JSON-First**: records, stats, configuration and the page model serialize with serde
//! - **Rich Errors**: one structured error type with stable codes
//! - **Bounded generation**: encoding streams through a bounded channel under a timeout
//!
//! ## Quick Start
//!
//! ```rust
//! use report_core::assembler::{render_document, ReportConfig};
//! use report_core::materials::{Material, MaterialCategory, Unit};
//! use report_core::project::Project;
//!
//! let project = Project::new("p-1", "Clinic Extension", "Nouakchott").with_budget(1000.0);
//! let materials = vec![
//!     Material::new("Steel beam", MaterialCategory::Construction, Unit::Piece, 2.0, 300.0),
//!     Material::new("Cable tray", MaterialCategory::Electrical, Unit::Meter, 20.0, 30.0),
//! ];
//!
//! let document = render_document(&project, &materials, &ReportConfig::default());
//! assert!(document.contains_text("The project is over budget by $200.00."));
//! ```
//!
//! ## Modules
//!
//! - [`project`] / [`materials`] - input records
//! - [`stats`] - totals, averages, category breakdown, cost extremes
//! - [`format`] - locale-aware money, numbers, percentages, dates, text cleanup
//! - [`layout`] - cursor, canvas, page model and paginated tables
//! - [`sections`] - the report's sections and footer
//! - [`assembler`] - configuration and the generation entry points
//! - [`stream`] / [`pdf`] - chunked encoding and the Typst PDF backend
//! - [`file_io`] - snapshots, configuration files and atomic report writes
//! - [`errors`] - structured error types

pub mod assembler;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod layout;
pub mod materials;
pub mod numeric;
pub mod pdf;
pub mod project;
pub mod sections;
pub mod stats;
pub mod stream;

// Re-export commonly used types at crate root for convenience
pub use assembler::{generate_report, render_document, ReportConfig, ReportGenerator, ReportKind};
pub use errors::{ReportError, ReportResult};
pub use file_io::{load_snapshot, save_report, ProjectSnapshot};
pub use layout::RenderedDocument;
pub use materials::{Material, MaterialCategory, Unit};
pub use project::{Project, ProjectStatus};
pub use stats::{compute_stats, Stats};
