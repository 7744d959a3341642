//! Built-in signature tables, grouped by ecosystem

mod ai;
mod data;
mod effect;
mod infra;
mod javascript;
mod languages;
mod web;

use super::signature::TechSignature;

/// Every built-in table in registration order
pub const BUILTIN_TABLES: &[&[TechSignature]] = &[
    effect::SIGNATURES,
    javascript::SIGNATURES,
    web::SIGNATURES,
    data::SIGNATURES,
    languages::SIGNATURES,
    ai::SIGNATURES,
    infra::SIGNATURES,
];

pub fn builtin() -> impl Iterator<Item = &'static TechSignature> {
    BUILTIN_TABLES.iter().flat_map(|table| table.iter())
}
