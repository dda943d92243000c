//! Registry-facing layer for package age checking
//!
//! This module fetches package metadata from the registry and provides the
//! building blocks the validation engine combines into a decision.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Metadata   │────▶│   Resolve   │
//! │  (fetch)    │     │  (types)    │     │ (version)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │ Registries  │                         │     Age     │
//! │   (npm)     │                         │   (days)    │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`age`]: Publish timestamp to age-in-days calculation
//! - [`error`]: Error types for registry operations
//! - [`registry`]: Registry trait for fetching metadata from remote sources
//! - [`registries`]: Concrete registry implementations (npm)
//! - [`resolve`]: Version resolution and numeric version ordering
//! - [`types`]: Common types like `PackageSpec` and `RegistryMetadata`

pub mod age;
pub mod error;
pub mod registries;
pub mod registry;
pub mod resolve;
pub mod types;
