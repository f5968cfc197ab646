//! Fenceline - Virtual Fencing Cost Assistant
//!
//! Compares the lifetime cost of virtual fencing (GPS-collar livestock
//! containment) against traditional metal fencing, and answers common
//! rancher questions by matching them against a fixed set of explanations.

pub mod commands;
pub mod config;
pub mod cost;
pub mod embedding;
pub mod error;
pub mod knowledge;
pub mod matcher;
pub mod report;
pub mod similarity;
