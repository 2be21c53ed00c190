// Matching and scoring of keyword sets against resume text.

pub mod explicit;
pub mod matcher;
pub mod scorer;
