#[macro_use]
extern crate log;

mod db;
pub use db::DatabaseHandler;

mod media;
pub use media::MediaStore;

mod type_impl;
