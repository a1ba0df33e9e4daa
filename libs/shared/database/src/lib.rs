pub mod postgrest;
pub mod query;
pub mod state;

pub use postgrest::PostgrestClient;
pub use query::TableQuery;
pub use state::AppState;
