// SPDX-License-Identifier: MIT OR Apache-2.0
//! Calling layer of the Cycles for Max shader exporter.
//!
//! Provides:
//! - [`SceneDocument`]: the render engine and selected objects read from the host
//! - [`ExportSettings`]: versioned RON settings
//! - [`ExportOperator`]: finds the first exportable shader and writes it

pub mod export;
pub mod scene;
pub mod settings;

pub use export::{ExportOperator, ExportReport, OperatorError};
pub use scene::{Material, SceneDocument, SceneError, SceneObject};
pub use settings::{ExportSettings, SettingsError};
