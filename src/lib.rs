//! `pald` — PALD core analysis and orchestration subsystem.
//!
//! This crate is a thin CLI (`pald`) over the `pald-*` library family: schema
//! registry (C1), light extractor (C2), diff engine (C3), bias job manager
//! (C4), processing orchestrator (C5), and prerequisite validator (C6). The
//! CLI exercises the pipeline end-to-end for manual inspection and smoke
//! testing — it is a development aid, not a deployment target.

pub mod cli;
