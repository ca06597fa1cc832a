//! Processing Orchestrator (C5), ported from `PALDManager.process_enhanced_pald`
//! in `original_source/src/logic/pald.py`: wires the Schema Registry, Light
//! Extractor, Diff Engine, and Bias Job Manager into a single
//! Extract → Diff → Bias → Persist → Respond pipeline.

pub mod artifact;
pub mod pipeline;
pub mod types;

pub use artifact::{Artifact, ArtifactStatistics, ArtifactStore, ExportFilter, ExportedArtifact, InMemoryArtifactStore, InputHashes};
pub use pipeline::Orchestrator;
pub use types::{ProcessingMetadata, ProcessingRequest, ProcessingResponse};
