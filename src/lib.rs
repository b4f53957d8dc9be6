//! Folio - a personal portfolio blog store
//!
//! This library provides the blog post store, its REST API, a client for
//! that API and the view state of the public and admin blog pages.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod views;

#[cfg(test)]
mod testing;
