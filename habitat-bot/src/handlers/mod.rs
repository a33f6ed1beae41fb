//! Message handlers: logging, commands, photo intake with classification, geotagging.

mod command_handler;
mod location_handler;
mod logging_handler;
mod photo_handler;
pub mod replies;

pub use command_handler::CommandHandler;
pub use location_handler::LocationHandler;
pub use logging_handler::LoggingHandler;
pub use photo_handler::{file_extension, local_photo_path, PhotoHandler};
