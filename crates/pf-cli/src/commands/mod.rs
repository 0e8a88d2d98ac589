pub mod dispatch;
pub mod domains;
pub mod generate;
pub mod history;
pub mod schema;
pub mod shared;
pub mod template;
pub mod validate;
