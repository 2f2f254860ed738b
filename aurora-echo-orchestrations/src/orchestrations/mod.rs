//! Multi-step flows composed from activities

pub mod promote_instance;
