// ABOUTME: Re-exports command modules for stride-score
// ABOUTME: Provides activity scoring, batch scoring, and rank/zone inspection commands

pub mod inspect;
pub mod score;
