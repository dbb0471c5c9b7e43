//! # Document Assembler
//!
//! Drives one report from input records to a byte buffer:
//!
//! 1. reject a missing project with [`ReportError::NotFound`]
//! 2. compute [`Stats`](crate::stats::Stats) once
//! 3. run the report's sections in order over a fresh canvas
//! 4. stamp footers now that the page count is known
//! 5. encode on a blocking worker, streaming chunks through a bounded channel
//! 6. collect the chunks under [`ReportConfig::timeout_secs`]
//!
//! Layout and encoding for one report run sequentially on that one worker.
//! The caller's records are cloned into it, so concurrent reports share
//! nothing but the font set.
//!
//! ## Example
//!
//! ```rust,no_run
//! use report_core::assembler::generate_report;
//! use report_core::project::Project;
//!
//! # async fn run() -> report_core::errors::ReportResult<()> {
//! let project = Project::new("p-1", "Clinic Extension", "Nouakchott");
//! let pdf = generate_report(Some(&project), &[]).await?;
//! assert!(pdf.starts_with(b"%PDF"));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ReportError, ReportResult};
use crate::format::LocaleId;
use crate::layout::{Canvas, PageSetup, RenderedDocument};
use crate::materials::Material;
use crate::pdf::TypstPdfEncoder;
use crate::project::Project;
use crate::sections::{footer, Section, SectionContext, MATERIALS_LIST, PROJECT_REPORT, SECTION_GAP};
use crate::stats::compute_stats;
use crate::stream::{chunk_channel, collect, ChannelSink, DocumentEncoder, DEFAULT_CHUNK_SIZE};

/// Default bound on one generation call.
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Which document to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Full project report with summary, analysis and materials table
    #[default]
    Project,
    /// Materials grouped by category
    #[serde(alias = "materials")]
    MaterialsList,
}

impl ReportKind {
    pub fn sections(&self) -> &'static [Section] {
        match self {
            ReportKind::Project => PROJECT_REPORT,
            ReportKind::MaterialsList => MATERIALS_LIST,
        }
    }

    /// Document title for a project.
    pub fn title(&self, project: &Project) -> String {
        match self {
            ReportKind::Project => format!("Project Report - {}", project.name),
            ReportKind::MaterialsList => format!("Materials List - {}", project.name),
        }
    }
}

/// Settings for report generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub locale: LocaleId,
    /// Upper bound on encoding + collection, in seconds
    pub timeout_secs: f64,
    /// Bytes per streamed chunk
    pub chunk_size: usize,
    pub page: PageSetup,
    /// Fixed generation timestamp; `None` uses the current time
    pub generated_at: Option<DateTime<Utc>>,
    pub kind: ReportKind,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            locale: LocaleId::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            page: PageSetup::default(),
            generated_at: None,
            kind: ReportKind::default(),
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> ReportResult<()> {
        self.timeout()?;
        if self.chunk_size == 0 {
            return Err(ReportError::invalid_input("chunk_size", "0", "must be at least 1 byte"));
        }
        if !self.page.is_finite() {
            return Err(ReportError::invalid_input(
                "page",
                format!("{:?}", self.page),
                "dimensions and margins must be finite",
            ));
        }
        if self.page.content_width() <= 0.0 || self.page.content_height() <= 0.0 {
            return Err(ReportError::invalid_input(
                "page",
                format!("{}x{}", self.page.width, self.page.height),
                "margins leave no room for content",
            ));
        }
        Ok(())
    }

    /// The generation bound as a `Duration`; rejects non-positive and unrepresentable values.
    pub fn timeout(&self) -> ReportResult<Duration> {
        match Duration::try_from_secs_f64(self.timeout_secs) {
            Ok(limit) if !limit.is_zero() => Ok(limit),
            _ => Err(ReportError::invalid_input(
                "timeout_secs",
                self.timeout_secs.to_string(),
                "must be a positive number of seconds within range",
            )),
        }
    }
}

/// Lay out a report without encoding it.
pub fn render_document(project: &Project, materials: &[Material], config: &ReportConfig) -> RenderedDocument {
    let stats = compute_stats(materials);
    let locale = config.locale.locale();
    let ctx = SectionContext {
        project,
        materials,
        stats: &stats,
        locale: &locale,
        generated_at: config.generated_at.unwrap_or_else(Utc::now),
    };

    let mut canvas = Canvas::new(config.page);
    for section in config.kind.sections() {
        if (section.render)(&ctx, &mut canvas) {
            debug!("section '{}' ends on page {}", section.name, canvas.page_index() + 1);
            canvas.gap(SECTION_GAP);
        } else {
            debug!("section '{}' skipped", section.name);
        }
    }
    footer::stamp(&ctx, &mut canvas);
    canvas.finish(config.kind.title(project))
}

/// Report generator bound to a configuration and an encoder.
#[derive(Clone)]
pub struct ReportGenerator {
    config: ReportConfig,
    encoder: Arc<dyn DocumentEncoder>,
}

impl ReportGenerator {
    /// Generator producing PDF output.
    pub fn new(config: ReportConfig) -> ReportResult<Self> {
        config.validate()?;
        Ok(ReportGenerator {
            config,
            encoder: Arc::new(TypstPdfEncoder),
        })
    }

    pub fn with_encoder<E: DocumentEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Lay out the report synchronously.
    pub fn render(&self, project: Option<&Project>, materials: &[Material]) -> ReportResult<RenderedDocument> {
        let project = project.ok_or(ReportError::NotFound)?;
        Ok(render_document(project, materials, &self.config))
    }

    /// Lay out and encode the report, collecting its bytes under the timeout.
    pub async fn generate(&self, project: Option<&Project>, materials: &[Material]) -> ReportResult<Vec<u8>> {
        let Some(project) = project else {
            warn!("report requested without a project");
            return Err(ReportError::NotFound);
        };
        let limit = self.config.timeout()?;

        let project = project.clone();
        let materials = materials.to_vec();
        let config = self.config.clone();
        let encoder = Arc::clone(&self.encoder);
        let started = Instant::now();

        let (tx, mut rx) = chunk_channel();
        let producer = tokio::task::spawn_blocking(move || -> ReportResult<(Uuid, usize)> {
            let document = render_document(&project, &materials, &config);
            debug!(
                "report {} laid out: {} page(s), {} material(s)",
                document.id(),
                document.page_count(),
                materials.len()
            );
            let mut sink = ChannelSink::new(tx, config.chunk_size);
            encoder.encode(&document, &mut sink)?;
            Ok((document.id(), document.page_count()))
        });

        let outcome = tokio::time::timeout(limit, async {
            let buffer = collect(&mut rx).await;
            (buffer, producer.await)
        })
        .await;

        let (buffer, joined) = match outcome {
            Ok(done) => done,
            Err(_) => {
                // Closing the channel makes the producer's next emit fail.
                drop(rx);
                warn!("report generation exceeded {:.1}s, output discarded", limit.as_secs_f64());
                return Err(ReportError::GenerationTimeout {
                    seconds: limit.as_secs_f64(),
                });
            }
        };

        let (id, pages) = match joined {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => {
                warn!("report encoding failed: {e}");
                return Err(match e {
                    ReportError::StreamFailure { .. } => e,
                    other => ReportError::stream_failure(other.to_string()),
                });
            }
            Err(e) => {
                warn!("report worker failed: {e}");
                return Err(ReportError::stream_failure(format!("render worker failed: {e}")));
            }
        };

        if buffer.is_empty() {
            warn!("report {id} encoded to zero bytes");
            return Err(ReportError::EmptyOutput);
        }

        info!(
            "report {id} generated: {pages} page(s), {} bytes in {:.0?}",
            buffer.len(),
            started.elapsed()
        );
        Ok(buffer)
    }
}

impl std::fmt::Debug for ReportGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportGenerator").field("config", &self.config).finish()
    }
}

/// Generate a PDF project report with the default configuration.
pub async fn generate_report(project: Option<&Project>, materials: &[Material]) -> ReportResult<Vec<u8>> {
    ReportGenerator::new(ReportConfig::default())?
        .generate(project, materials)
        .await
}
