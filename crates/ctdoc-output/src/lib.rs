//! Clinical document output.
//!
//! Assemblers walk a fixed section outline and produce an in-memory
//! [`Document`]. A [`DocumentBackend`] turns that document into a file;
//! [`DocxBackend`] writes Office Open XML through `docx-rs`.

pub mod backend;
pub mod crf;
pub mod dmp;
pub mod document;
mod docx;
pub mod dvp;
pub mod error;
pub mod styles;
pub mod user_guide;

pub use backend::{DocumentBackend, DocxBackend};
pub use crf::CrfAssembler;
pub use dmp::{DataManagementRole, DmpAssembler, DmpDomain, DmpValidationCheck, Milestone};
pub use document::{Block, Document, Table};
pub use docx::render_docx;
pub use dvp::DvpAssembler;
pub use error::{OutputError, Result};
pub use styles::{DocumentStyles, PageSetup, StyleProfile, StyleReport, validate_style};
pub use user_guide::{
    GuideField, GuideForm, ScreenshotPlaceholder, SystemInfo, UserGuide, UserGuideAssembler,
    write_screenshot_list,
};
