#[macro_use]
extern crate diesel;

pub mod availability;
pub mod booking_db;
pub mod config;
pub mod service;
pub mod session;
pub mod validation;
pub mod web;
