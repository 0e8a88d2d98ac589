mod history;
mod schema;
mod template;

pub use history::HistoryCommands;
pub use schema::SchemaCommands;
pub use template::TemplateCommands;
