// ABOUTME: Re-exports helper modules for stride-score
// ABOUTME: Provides JSON file input and result output utilities

pub mod io;
