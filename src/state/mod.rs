/// State management module
/// 
/// This module handles all application state, including:
/// - The session for the open folder: working set, selection, histograms (session.rs)
/// - Shared data structures (data.rs)
/// - User settings persisted as JSON (settings.rs)

pub mod data;
pub mod session;
pub mod settings;
