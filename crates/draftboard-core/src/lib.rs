// Library root: the UI-independent draft board engine. The host UI owns
// rendering and input; everything it displays is derived here.

pub mod catalog;
pub mod config;
pub mod db;
pub mod draft;
pub mod guidance;
pub mod query;
pub mod session;
pub mod store;
